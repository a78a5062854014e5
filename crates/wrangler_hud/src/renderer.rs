//! Per-session HUD renderer.
//!
//! [`HudRenderer`] is created when a session starts and lives exactly as
//! long as its draw handlers. Each [`HudRenderer::draw`] call reads the
//! host clock and session snapshot and returns a fresh [`DrawList`], or
//! `None` when the callback fired for a viewport other than the one that
//! started the session.

use glam::{Vec2, Vec3, Vec4};
use wrangler_core::timing::Fade;
use wrangler_scene::{DrawStage, Host, LightProperty, Mode, ObjectId, RAY_DISTANCE, RegionId, SceneObject};

use crate::draw::DrawList;
use crate::help::{HelpContext, HelpLine, formatted_help};
use crate::labels::ValueContext;
use crate::overlay::{OverlayInput, orbit_visualization};
use crate::panel::{PanelContent, value_panel};

/// Duration of the help panel open/close fade.
pub const HELP_FADE_DURATION: f64 = 0.1;

const HELP_TEXT_SIZE: f32 = 12.0;
const HELP_LINE_HEIGHT: f32 = 18.0;
const HELP_KEY_COLUMN: f32 = 130.0;
const HELP_MARGIN: f32 = 20.0;
const HELP_WIDTH: f32 = 280.0;

/// Session values the HUD reads each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudState {
    pub light: ObjectId,
    pub mode: Mode,
    pub is_paused: bool,
    pub active_property: Option<LightProperty>,
    pub hovered_property: Option<LightProperty>,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub current_power: f32,
    pub current_distance: f32,
    pub current_z_rotation: f32,
    pub hit_normal: Option<Vec3>,
}

#[derive(Debug, Clone)]
pub struct HudRenderer {
    region: RegionId,
    help_fade: Fade,
    hovered: Option<LightProperty>,
    hover_start: Option<f64>,
    last_wheel: Option<f64>,
}

impl HudRenderer {
    #[must_use]
    pub fn new(region: RegionId, show_help: bool) -> Self {
        Self {
            region,
            help_fade: Fade::settled(if show_help { 1.0 } else { 0.0 }),
            hovered: None,
            hover_start: None,
            last_wheel: None,
        }
    }

    #[must_use]
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Starts the open or close animation of the help panel.
    pub fn set_help_visible(&mut self, visible: bool, now: f64) {
        let target = if visible { 1.0 } else { 0.0 };
        if self.help_fade.target() != target {
            self.help_fade.retarget(target, now, HELP_FADE_DURATION);
        }
    }

    #[must_use]
    pub fn help_visible(&self) -> bool {
        self.help_fade.target() > 0.5
    }

    #[must_use]
    pub fn help_opacity(&self, now: f64) -> f32 {
        self.help_fade.value(now)
    }

    /// Whether frames are still changing without input.
    #[must_use]
    pub fn is_animating(&self, now: f64) -> bool {
        self.help_fade.is_animating(now)
    }

    /// Restarts the tooltip delay when the hovered property changes.
    pub fn set_hovered(&mut self, property: Option<LightProperty>, now: f64) {
        if property != self.hovered {
            self.hovered = property;
            self.hover_start = property.map(|_| now);
        }
    }

    pub fn note_wheel(&mut self, now: f64) {
        self.last_wheel = Some(now);
    }

    pub fn draw<H: Host + ?Sized>(
        &mut self,
        host: &H,
        stage: DrawStage,
        region: RegionId,
        state: &HudState,
        now: f64,
    ) -> Option<DrawList> {
        if region != self.region {
            return None;
        }
        let view = host.view().filter(|v| v.region == self.region)?;
        let object = host.object(state.light)?;
        let light = object.as_light()?;
        self.set_hovered(state.hovered_property, now);
        let accent = host.theme_accent();

        let list = match stage {
            DrawStage::View3d => orbit_visualization(&OverlayInput {
                view,
                light: object,
                center: target_point(host, object, state.mode),
                mode: state.mode,
                z_rotation: state.current_z_rotation,
                hit_normal: state.hit_normal,
                accent,
            }),
            DrawStage::Overlay2d => {
                let ctx = ValueContext {
                    power: state.current_power,
                    distance: state.current_distance,
                    z_rotation: state.current_z_rotation,
                    units: host.props().unit_system,
                };
                let content = PanelContent {
                    active: state.active_property,
                    hovered: self.hovered,
                    hover_start: self.hover_start,
                    last_wheel: self.last_wheel,
                    now,
                };
                let anchor = view.location_3d_to_region_2d(target_point(host, object, state.mode));
                match (anchor, content.text(&light.data, &ctx)) {
                    (Some(anchor), Some(text)) => value_panel(anchor, &text, accent.extend(1.0)),
                    _ => DrawList::new(DrawStage::Overlay2d),
                }
            }
            DrawStage::Help => {
                let ctx = HelpContext {
                    mode: state.mode,
                    light_type: light.light_type(),
                    is_paused: state.is_paused,
                    shift: state.shift,
                    alt: state.alt,
                    ctrl: state.ctrl,
                    engine: &host.props().render_engine,
                };
                self.help_panel(&ctx, view.size, now)
            }
        };
        Some(list)
    }

    fn help_panel(&self, ctx: &HelpContext<'_>, region_size: Vec2, now: f64) -> DrawList {
        let mut list = DrawList::new(DrawStage::Help);
        let opacity = self.help_fade.value(now);
        let left = region_size.x - HELP_WIDTH - HELP_MARGIN;
        let white = |alpha: f32| Vec4::new(1.0, 1.0, 1.0, alpha);

        if opacity < 1.0 {
            list.text(
                Vec2::new(region_size.x - 110.0 - HELP_MARGIN, HELP_MARGIN),
                "Controls [Q]",
                white(0.7 * (1.0 - opacity)),
                HELP_TEXT_SIZE,
            );
        }
        if opacity <= 0.0 {
            return list;
        }

        let lines = formatted_help(ctx);
        let height = lines.len() as f32 * HELP_LINE_HEIGHT;
        list.rect(
            Vec2::new(left - 10.0, HELP_MARGIN - 10.0),
            Vec2::new(left + HELP_WIDTH, HELP_MARGIN + height),
            Vec4::new(0.0, 0.0, 0.0, 0.5 * opacity),
            6.0,
        );
        let mut y = HELP_MARGIN + height - HELP_LINE_HEIGHT;
        for line in lines {
            match line {
                HelpLine::Shortcut { key, description } => {
                    list.text(Vec2::new(left, y), key, white(0.6 * opacity), HELP_TEXT_SIZE);
                    list.text(
                        Vec2::new(left + HELP_KEY_COLUMN, y),
                        description,
                        white(opacity),
                        HELP_TEXT_SIZE,
                    );
                }
                HelpLine::Header(title) => list.text(Vec2::new(left, y), title, white(0.8 * opacity), HELP_TEXT_SIZE),
                HelpLine::Blank => {}
            }
            y -= HELP_LINE_HEIGHT;
        }
        list
    }
}

/// The point the HUD anchors to: the orbit centre in ORBIT, otherwise the
/// surface the light aims at, or the light itself when nothing is hit.
#[must_use]
pub fn target_point<H: Host + ?Sized>(host: &H, object: &SceneObject, mode: Mode) -> Vec3 {
    if mode == Mode::Orbit
        && let Some(center) = object.as_light().and_then(|l| l.metadata.orbit_center)
    {
        return center;
    }
    host.ray_cast(object.location, object.forward(), RAY_DISTANCE)
        .map_or(object.location, |hit| hit.point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrangler_core::math::aim_euler;
    use wrangler_scene::{Light, LightData, LightKind, LightType, MemoryHost, ViewState};

    fn scene() -> (MemoryHost, ObjectId) {
        let view = ViewState::perspective(
            RegionId(7),
            Vec2::new(800.0, 600.0),
            Vec3::new(6.0, -6.0, 5.0),
            Vec3::ZERO,
            Vec3::Z,
            50.0_f32.to_radians(),
        );
        let mut host = MemoryHost::new().with_floor(0.0).with_view(view);
        let light = Light::new(LightData::new(LightKind::default_for(LightType::Area), 100.0));
        let id = host.add_object(
            SceneObject::light("Key", light)
                .with_location(Vec3::new(0.0, 0.0, 2.0))
                .with_rotation(aim_euler(Vec3::NEG_Z, 0.0)),
        );
        (host, id)
    }

    fn state(light: ObjectId) -> HudState {
        HudState {
            light,
            mode: Mode::Direct,
            is_paused: false,
            active_property: None,
            hovered_property: None,
            shift: false,
            alt: false,
            ctrl: false,
            current_power: 100.0,
            current_distance: 2.0,
            current_z_rotation: 0.0,
            hit_normal: Some(Vec3::Z),
        }
    }

    #[test]
    fn foreign_region_is_ignored() {
        let (host, id) = scene();
        let mut hud = HudRenderer::new(RegionId(7), false);
        assert!(hud.draw(&host, DrawStage::View3d, RegionId(8), &state(id), 0.0).is_none());
        assert!(hud.draw(&host, DrawStage::View3d, RegionId(7), &state(id), 0.0).is_some());
    }

    #[test]
    fn collapsed_help_shows_hint() {
        let (host, id) = scene();
        let mut hud = HudRenderer::new(RegionId(7), false);
        let list = hud.draw(&host, DrawStage::Help, RegionId(7), &state(id), 0.0).unwrap();
        assert_eq!(list.texts().collect::<Vec<_>>(), ["Controls [Q]"]);
    }

    #[test]
    fn help_fades_in() {
        let (host, id) = scene();
        let mut hud = HudRenderer::new(RegionId(7), false);
        hud.set_help_visible(true, 1.0);
        assert!(hud.is_animating(1.05));
        assert!((hud.help_opacity(1.05) - 0.5).abs() < 1e-3);
        let list = hud.draw(&host, DrawStage::Help, RegionId(7), &state(id), 2.0).unwrap();
        assert!(list.texts().any(|t| t == "Hide Controls"));
        assert!(list.texts().all(|t| t != "Controls [Q]"));
    }

    #[test]
    fn active_property_panel() {
        let (host, id) = scene();
        let mut hud = HudRenderer::new(RegionId(7), false);
        let mut s = state(id);
        s.active_property = Some(LightProperty::Power);
        let list = hud.draw(&host, DrawStage::Overlay2d, RegionId(7), &s, 0.0).unwrap();
        assert_eq!(list.texts().collect::<Vec<_>>(), ["100 W"]);
    }

    #[test]
    fn target_point_follows_forward_ray() {
        let (host, id) = scene();
        let object = host.object(id).unwrap();
        assert!(target_point(&host, object, Mode::Direct).length() < 1e-4);
    }
}
