//! The modal controller: session lifecycle and event handling.
//!
//! A [`ModalController`] holds at most one [`ModalSession`]. The host calls
//! [`ModalController::invoke`] to start editing the active light, feeds
//! every viewport event to [`ModalController::handle_event`] until it stops
//! returning [`ModalResult::RunningModal`], and pulls overlays through
//! [`ModalController::draw`] from the three registered draw handlers.
//!
//! Every exit path (finalize, cancel, or the light vanishing under the
//! session) goes through one release routine that removes draw handlers and
//! restores cursor, theme, overlays and visibility.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use wrangler_core::color::paused_tint;
use wrangler_core::math::{forward_from_euler, roll_from_euler};
use wrangler_core::{Result, WranglerError};
use wrangler_hud::{DrawList, HudRenderer};
use wrangler_scene::props::FALSE_COLOR;
use wrangler_scene::{
    AdjustmentModeEntry, AreaParams, AreaShape, CursorStyle, DrawStage, Host, LightKind, LightMetadata, LightProperty,
    LightType, LinkRole, Mode, ObjectId, RAY_DISTANCE, RegionId, ReportLevel, SpotParams,
};

use crate::dispatch::{
    MIN_DISTANCE, MIN_SIZE, MIN_SPOT_SIZE_DEG, MIN_SPREAD_DEG, PROPORTIONAL_STEP, PropertyDispatcher, blend_step,
    distance_step, power_step, proportional, rotation_step, spot_size_step, spread_step, sun_angle_step,
};
use crate::input::{EventKind, ModalEvent, Modifiers};
use crate::isolation::{hide_volume_cubes, remove_volume_cubes, restore_volume_cubes, revert_isolation, toggle_hide, toggle_isolation};
use crate::keyframes::auto_key;
use crate::linking::link_object_under_cursor;
use crate::positioner::{apply_z_rotation, orbit_snap, orbit_step, place_for_mode};
use crate::power::PowerCompensator;
use crate::raycast::AdaptiveRaycast;
use crate::session::ModalSession;
use crate::snapshot::LightStateSnapshot;
use crate::tracking::{clear_tracking, restore_tracking};

/// Light displacement that counts as "moved since the last session".
const MOVED_THRESHOLD: f32 = 0.001;
/// Forward-axis agreement below which the light counts as turned.
const TURNED_DOT: f32 = 0.999;

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalResult {
    /// The event was consumed; keep delivering events.
    RunningModal,
    Finished,
    Cancelled,
    /// Not handled here; the host may process it.
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InvokeOptions {
    /// Mode key that started the session, if any.
    pub start_mode: Option<Mode>,
    pub started_with_tab: bool,
    pub from_gizmo: bool,
    /// Window coordinates of the cursor at invoke.
    pub mouse: Vec2,
}

impl InvokeOptions {
    #[must_use]
    pub fn at(mouse: Vec2) -> Self {
        Self {
            mouse,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.start_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn from_tab(mut self) -> Self {
        self.started_with_tab = true;
        self
    }

    #[must_use]
    pub fn from_gizmo(mut self) -> Self {
        self.from_gizmo = true;
        self
    }
}

#[derive(Debug, Default)]
pub struct ModalController {
    session: Option<ModalSession>,
}

impl ModalController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&ModalSession> {
        self.session.as_ref()
    }

    // ========================================================================
    // Invoke
    // ========================================================================

    fn check_preconditions<H: Host + ?Sized>(host: &H) -> Result<(ObjectId, RegionId)> {
        let region = host.view().ok_or(WranglerError::InvalidRegion)?.region;
        let id = host.active_object().ok_or(WranglerError::NoActiveLight)?;
        let object = host.object(id).ok_or(WranglerError::NoActiveLight)?;
        if !object.is_light() {
            return Err(WranglerError::NotALight(object.name.clone()));
        }
        Ok((id, region))
    }

    /// Starts a session on the active light.
    ///
    /// Precondition failures are reported to the user at WARNING level and
    /// leave the scene untouched.
    pub fn invoke<H: Host + ?Sized>(&mut self, host: &mut H, options: InvokeOptions) -> Result<()> {
        if self.session.is_some() {
            return Err(WranglerError::SessionAlreadyActive);
        }
        let (light, region) = match Self::check_preconditions(host) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("Interactive mode not started: {err}");
                host.report(ReportLevel::Warning, &err.to_string());
                return Err(err);
            }
        };
        let snapshot = host
            .object(light)
            .and_then(LightStateSnapshot::capture)
            .ok_or(WranglerError::NoActiveLight)?;

        let tracking = clear_tracking(host, light);
        let prefs = host.preferences().clone();
        let metadata = snapshot.metadata.clone();
        let mode = options.start_mode.unwrap_or_else(|| metadata.mode());
        if options.start_mode.is_some()
            && let Some(l) = host.light_mut(light)
        {
            l.metadata.last_mode = Some(mode);
        }

        let was_isolated = host.props().is_isolated;
        let original_overlays = host.props().show_overlays;
        let show_help = host.props().show_help || prefs.show_help_by_default;
        {
            let props = host.props_mut();
            props.is_interactive_mode_active = true;
            props.last_mode = Some(mode);
            if prefs.hide_viewport_overlays {
                props.show_overlays = false;
            }
        }

        let is_paused = if metadata.newly_created || options.from_gizmo {
            false
        } else if prefs.adjustment_mode_entry == AdjustmentModeEntry::AlwaysInactive {
            true
        } else {
            metadata.pause_state()
        };

        let (location, rotation_euler) = host
            .object(light)
            .map_or((snapshot.location, snapshot.rotation_euler), |o| (o.location, o.rotation_euler));
        let light_type = snapshot.light_type();
        let current_power = snapshot.data.energy;
        let moved = Self::moved_since_last_session(&metadata, location, rotation_euler);

        let original_theme = match host.props().untinted_accent {
            Some(accent) => {
                log::debug!("Recovering the theme accent left tinted by an interrupted session");
                accent
            }
            None => host.theme_accent(),
        };

        let mut session = ModalSession {
            light,
            light_type,
            region,
            mode,
            is_paused,
            started_with_tab: options.started_with_tab,
            from_gizmo: options.from_gizmo,
            modifiers: Modifiers::empty(),
            active_property: None,
            hovered_property: None,
            current_power,
            current_distance: metadata.offset(),
            current_z_rotation: roll_from_euler(rotation_euler),
            last_hit: None,
            last_normal: None,
            orbit_center: metadata.orbit_center.filter(|_| !moved),
            start_mouse: Some(options.mouse),
            first_event_skipped: false,
            snapshot,
            tracking,
            original_theme,
            original_overlays,
            was_isolated,
            previous_view_transform: None,
            hidden_volumes: Vec::new(),
            draw_handles: SmallVec::new(),
            compensator: PowerCompensator::new(prefs.use_calculated_light),
            raycast: AdaptiveRaycast::new(prefs.normal_smoothing, prefs.visualize_raycast),
            hud: HudRenderer::new(region, show_help),
        };

        if mode == Mode::Orbit {
            if moved {
                log::debug!("Light moved since the last session, re-establishing the orbit centre");
            }
            Self::ensure_orbit_center(host, &mut session);
            Self::sync_orbit_distance(host, &mut session);
        } else if !is_paused {
            Self::reposition_from_mouse(host, &mut session, options.mouse);
        }

        for stage in [DrawStage::View3d, DrawStage::Overlay2d, DrawStage::Help] {
            session.draw_handles.push(host.add_draw_handler(stage));
        }
        session.hidden_volumes = hide_volume_cubes(host);

        Self::apply_theme(host, &session);
        Self::apply_cursor(host, &session);
        Self::refresh_status(host, &session);
        host.tag_redraw();

        log::info!(
            "Interactive session started on '{}' ({}){}",
            session.snapshot.name,
            mode.display_name(),
            if is_paused { " (paused)" } else { "" }
        );
        self.session = Some(session);
        Ok(())
    }

    fn moved_since_last_session(metadata: &LightMetadata, location: Vec3, rotation_euler: Vec3) -> bool {
        match (metadata.last_known_loc, metadata.last_known_rot) {
            (Some(known_loc), Some(known_rot)) => {
                known_loc.distance(location) > MOVED_THRESHOLD
                    || forward_from_euler(known_rot).dot(forward_from_euler(rotation_euler)) < TURNED_DOT
            }
            _ => false,
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Routes one event to the session.
    pub fn handle_event<H: Host + ?Sized>(&mut self, host: &mut H, event: &ModalEvent) -> ModalResult {
        let Some(session) = self.session.as_mut() else {
            return ModalResult::PassThrough;
        };
        if event.region.is_some_and(|region| region != session.region) {
            return ModalResult::PassThrough;
        }
        if !session.first_event_skipped {
            session.first_event_skipped = true;
            return ModalResult::RunningModal;
        }
        if host.object(session.light).is_none() {
            log::warn!("Edited light '{}' disappeared, ending the session", session.snapshot.name);
            if let Some(session) = self.session.take() {
                Self::release(host, session);
            }
            return ModalResult::Cancelled;
        }

        if let Some(flag) = event.kind.modifier() {
            Self::on_modifier(host, session, flag, event);
            return ModalResult::RunningModal;
        }

        match event.kind {
            EventKind::RightMouse | EventKind::Escape if event.is_press() => {
                let revert_linking = event.kind == EventKind::Escape;
                if let Err(err) = self.cancel(host, revert_linking) {
                    log::warn!("Cancel failed: {err}");
                }
                return ModalResult::Cancelled;
            }
            EventKind::LeftMouse | EventKind::Return if event.is_press() => {
                if let Err(err) = self.finalize(host) {
                    log::warn!("Finalize failed: {err}");
                }
                return ModalResult::Finished;
            }
            EventKind::Tab if event.is_release() => {
                if session.started_with_tab {
                    session.started_with_tab = false;
                } else {
                    if let Err(err) = self.finalize(host) {
                        log::warn!("Finalize failed: {err}");
                    }
                    return ModalResult::Finished;
                }
            }
            EventKind::MouseMove => Self::on_mouse_move(host, session, event),
            kind if kind.is_wheel_like() => {
                if let Some(direction) = event.wheel_direction()
                    && direction != 0.0
                    && (kind == EventKind::TrackpadPan || event.is_press())
                {
                    Self::on_wheel(host, session, event, direction);
                }
            }
            kind if event.is_press() && kind.mode_slot().is_some() => {
                if let Some(mode) = kind.mode_slot() {
                    Self::on_mode_key(host, session, mode, event.mouse);
                }
            }
            EventKind::Q if event.is_press() => {
                let visible = !session.hud.help_visible();
                host.props_mut().show_help = visible;
                session.hud.set_help_visible(visible, host.now());
            }
            EventKind::F if event.is_press() => Self::toggle_false_color(host, session),
            EventKind::Space if event.is_press() => Self::toggle_light_type(host, session),
            EventKind::I if event.is_press() => toggle_isolation(host, session.light),
            EventKind::H if event.is_press() => toggle_hide(host, session.light),
            EventKind::L if event.is_press() => {
                let role = if (session.modifiers | event.modifiers).contains(Modifiers::SHIFT) {
                    LinkRole::Blocker
                } else {
                    LinkRole::Receiver
                };
                link_object_under_cursor(host, session.light, event.mouse, role);
            }
            EventKind::Other => return ModalResult::PassThrough,
            _ => {}
        }
        host.tag_redraw();
        ModalResult::RunningModal
    }

    fn on_modifier<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession, flag: Modifiers, event: &ModalEvent) {
        if event.is_press() {
            session.modifiers.insert(flag);
            if flag == Modifiers::ALT && session.light_type == LightType::Area {
                session.compensator.latch_distance(session.current_power, session.current_distance);
            }
        } else if event.is_release() {
            session.modifiers.remove(flag);
            session.active_property = None;
        }
        Self::refresh_hover(host, session);
        host.tag_redraw();
    }

    fn on_mouse_move<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession, event: &ModalEvent) {
        session.active_property = None;
        if session.is_paused {
            return;
        }
        match session.mode {
            Mode::Orbit => Self::orbit(host, session, event),
            Mode::Reflect | Mode::Direct => Self::reposition_from_mouse(host, session, event.mouse),
        }
    }

    fn on_mode_key<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession, mode: Mode, mouse: Vec2) {
        if mode == session.mode {
            session.is_paused = !session.is_paused;
            if !session.is_paused {
                session.start_mouse = Some(mouse);
            }
            log::debug!("{} {}", mode.display_name(), if session.is_paused { "paused" } else { "resumed" });
        } else {
            session.mode = mode;
            session.is_paused = false;
            session.raycast.reset();
            if let Some(light) = host.light_mut(session.light) {
                light.metadata.last_mode = Some(mode);
            }
            host.props_mut().last_mode = Some(mode);

            if mode == Mode::Orbit {
                if let Some(sample) = session.raycast.sample(&*host, mouse, host.now()) {
                    session.orbit_center = Some(sample.point);
                    if let Some(light) = host.light_mut(session.light) {
                        light.metadata.orbit_center = Some(sample.point);
                        light.metadata.target = Some(sample.point);
                    }
                }
                session.start_mouse = Some(mouse);
                Self::ensure_orbit_center(host, session);
                Self::sync_orbit_distance(host, session);
            } else {
                Self::reposition_from_mouse(host, session, mouse);
            }
            log::debug!("Switched to {}", mode.display_name());
        }
        Self::apply_theme(host, session);
        Self::apply_cursor(host, session);
        Self::refresh_status(host, session);
    }

    fn toggle_false_color<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession) {
        let current = host.props().view_transform.clone();
        if current != FALSE_COLOR {
            session.previous_view_transform = Some(current);
            host.props_mut().view_transform = FALSE_COLOR.to_string();
            host.report(ReportLevel::Info, "Switched to False Color mode");
        } else if let Some(previous) = session.previous_view_transform.take() {
            host.report(ReportLevel::Info, &format!("Restored to {previous} view transform"));
            host.props_mut().view_transform = previous;
        } else {
            host.report(ReportLevel::Info, "Already in False Color mode");
        }
    }

    /// SPACE: rebuilds a SPOT as an AREA covering the same footprint at the
    /// current distance, or the reverse.
    fn toggle_light_type<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession) {
        let Some(object) = host.object(session.light) else {
            return;
        };
        let Some(light) = object.as_light() else {
            return;
        };
        let distance = session.current_distance;
        let kind = match light.data.kind {
            LightKind::Spot(spot) => {
                let width = (2.0 * distance * (spot.spot_size * 0.5).tan()).max(MIN_SIZE);
                LightKind::Area(AreaParams {
                    shape: AreaShape::Square,
                    size_x: width,
                    size_y: width,
                    spread: (PI * (1.0 - spot.spot_blend)).clamp(MIN_SPREAD_DEG.to_radians(), PI),
                })
            }
            LightKind::Area(area) => LightKind::Spot(SpotParams {
                spot_size: (2.0 * (area.width() * 0.5).atan2(distance)).clamp(MIN_SPOT_SIZE_DEG.to_radians(), PI),
                spot_blend: (1.0 - area.spread / PI).clamp(0.0, 1.0),
            }),
            LightKind::Point(_) | LightKind::Sun(_) => return,
        };

        let mut replacement = object.clone();
        if let Some(light) = replacement.as_light_mut() {
            light.data.kind = kind;
        }
        host.remove_object(session.light);
        let id = host.add_object(replacement);
        host.set_active_object(Some(id));

        session.light = id;
        session.light_type = kind.light_type();
        session.active_property = None;
        session.compensator.reset();
        log::debug!("Converted light to {}", session.light_type.as_str());
        Self::refresh_hover(host, session);
    }

    // ========================================================================
    // Positioning
    // ========================================================================

    fn reposition_from_mouse<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession, mouse: Vec2) {
        let now = host.now();
        let Some(sample) = session.raycast.sample(&*host, mouse, now) else {
            return;
        };
        session.last_hit = Some(sample.point);
        session.last_normal = Some(sample.normal);
        if let Some(light) = host.light_mut(session.light) {
            light.metadata.target = Some(sample.point);
        }
        Self::place_at_hit(host, session);
    }

    /// Re-places the light from the cached hit.
    fn place_at_hit<H: Host + ?Sized>(host: &mut H, session: &ModalSession) {
        let (Some(hit), Some(normal)) = (session.last_hit, session.last_normal) else {
            return;
        };
        let Some(object) = host.object(session.light) else {
            return;
        };
        let placement = place_for_mode(
            &*host,
            object,
            session.mode,
            hit,
            normal,
            session.current_distance,
            session.current_z_rotation,
        );
        if let Some(object) = host.object_mut(session.light) {
            placement.apply(object);
        }
    }

    /// Lazily establishes the orbit centre along the light's forward axis.
    fn ensure_orbit_center<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession) -> Option<Vec3> {
        if let Some(center) = session.orbit_center {
            return Some(center);
        }
        let object = host.object(session.light)?;
        let (location, forward) = (object.location, object.forward());
        let center = host
            .ray_cast(location, forward, RAY_DISTANCE)
            .map_or(location + forward * session.current_distance, |hit| hit.point);
        session.orbit_center = Some(center);
        if let Some(light) = host.light_mut(session.light) {
            light.metadata.orbit_center = Some(center);
            light.metadata.target = Some(center);
        }
        log::debug!("Orbit centre set to {center}");
        Some(center)
    }

    fn sync_orbit_distance<H: Host + ?Sized>(host: &H, session: &mut ModalSession) {
        if let (Some(center), Some(object)) = (session.orbit_center, host.object(session.light)) {
            let distance = object.location.distance(center);
            if distance >= MIN_DISTANCE {
                session.current_distance = distance;
            }
        }
    }

    fn orbit<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession, event: &ModalEvent) {
        let Some(center) = Self::ensure_orbit_center(host, session) else {
            return;
        };
        let Some(location) = host.object(session.light).map(|o| o.location) else {
            return;
        };
        let modifiers = session.modifiers | event.modifiers;
        let sensitivity = host.preferences().orbit_sensitivity;
        let start = session.start_mouse.unwrap_or(event.mouse);
        session.start_mouse = Some(event.mouse);

        let Some(view) = host.view() else {
            return;
        };
        let placement = if modifiers.contains(Modifiers::CTRL) {
            orbit_snap(view, location, center, session.current_z_rotation)
        } else {
            Some(orbit_step(
                view,
                location,
                center,
                event.mouse - start,
                sensitivity,
                modifiers.contains(Modifiers::SHIFT),
                session.current_z_rotation,
            ))
        };
        if let Some(placement) = placement
            && let Some(object) = host.object_mut(session.light)
        {
            placement.apply(object);
            if let Some(light) = object.as_light_mut() {
                light.metadata.target = Some(center);
            }
        }
    }

    // ========================================================================
    // Property Editing
    // ========================================================================

    fn on_wheel<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession, event: &ModalEvent, direction: f32) {
        let now = host.now();
        session.hud.note_wheel(now);

        let trackpad = event.kind == EventKind::TrackpadPan;
        let modifiers = session.modifiers | event.modifiers;
        let Some(property) = PropertyDispatcher::resolve(modifiers, session.light_type) else {
            return;
        };
        if property == LightProperty::Power || session.active_property.is_some_and(|p| p != property) {
            session.compensator.reset();
        }
        session.active_property = Some(property);

        match property {
            LightProperty::Rotation => Self::edit_rotation(host, session, direction, trackpad),
            LightProperty::Distance => Self::edit_distance(host, session, direction),
            _ => Self::edit_light_data(host, session, property, direction, trackpad),
        }

        if session.light_type != LightType::Sun && session.mode != Mode::Orbit {
            Self::place_at_hit(host, session);
        }
    }

    fn edit_rotation<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession, direction: f32, trackpad: bool) {
        session.current_z_rotation = rotation_step(session.current_z_rotation, direction, trackpad);
        let Some(object) = host.object_mut(session.light) else {
            return;
        };
        let aim = match (session.mode, session.orbit_center) {
            (Mode::Orbit, Some(center)) => center - object.location,
            _ => object.forward(),
        };
        object.rotation_euler = apply_z_rotation(aim, session.current_z_rotation);
    }

    fn edit_distance<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession, direction: f32) {
        let old = session.current_distance;
        let new = distance_step(old, direction);
        session.current_distance = new;

        let Some(object) = host.object_mut(session.light) else {
            return;
        };
        if session.mode == Mode::Orbit
            && let Some(center) = session.orbit_center
        {
            let outward = (object.location - center).try_normalize().unwrap_or(-object.forward());
            object.location = center + outward * new;
            object.rotation_euler = apply_z_rotation(center - object.location, session.current_z_rotation);
        }
        if let Some(light) = object.as_light_mut()
            && matches!(light.data.kind, LightKind::Area(_) | LightKind::Spot(_))
        {
            session.current_power = session.compensator.distance_changed(session.current_power, old, new);
            light.data.energy = session.current_power;
        }
    }

    fn edit_light_data<H: Host + ?Sized>(
        host: &mut H,
        session: &mut ModalSession,
        property: LightProperty,
        direction: f32,
        trackpad: bool,
    ) {
        let Some(light) = host.light_mut(session.light) else {
            return;
        };
        let power = session.current_power;
        let compensator = &mut session.compensator;
        let grow = |value: f32| proportional(value, direction, PROPORTIONAL_STEP).max(MIN_SIZE);
        // Trackpads scroll blend and spread the natural way round.
        let spread_direction = if trackpad { -direction } else { direction };

        let new_power = match (property, &mut light.data.kind) {
            (LightProperty::Power, _) => Some(power_step(power, direction, session.light_type)),
            (LightProperty::Size, LightKind::Area(area)) => {
                let old = area.area();
                area.size_x = grow(area.size_x);
                area.size_y = if area.shape.has_independent_y() {
                    grow(area.size_y)
                } else {
                    area.size_x
                };
                Some(compensator.area_resized(power, old, area.area()))
            }
            (LightProperty::SizeX, LightKind::Area(area)) => {
                area.promote_shape();
                let old = area.area();
                area.size_x = grow(area.size_x);
                Some(compensator.area_resized(power, old, area.area()))
            }
            (LightProperty::SizeY, LightKind::Area(area)) => {
                area.promote_shape();
                let old = area.area();
                area.size_y = grow(area.size_y);
                Some(compensator.area_resized(power, old, area.area()))
            }
            (LightProperty::Size, LightKind::Spot(spot)) => {
                let old = spot.spot_size;
                spot.spot_size = spot_size_step(old, direction);
                Some(compensator.spot_resized(power, old, spot.spot_size))
            }
            (LightProperty::Size, LightKind::Point(point)) => {
                point.shadow_soft_size = grow(point.shadow_soft_size);
                None
            }
            (LightProperty::Size, LightKind::Sun(sun)) => {
                sun.angle = sun_angle_step(sun.angle, direction);
                None
            }
            (LightProperty::Spread, LightKind::Spot(spot)) => {
                spot.spot_blend = blend_step(spot.spot_blend, spread_direction);
                None
            }
            (LightProperty::Spread, LightKind::Area(area)) => {
                let old = area.spread;
                area.spread = spread_step(old, spread_direction);
                Some(compensator.spread_changed(power, old, area.spread))
            }
            _ => None,
        };

        if let Some(new_power) = new_power {
            session.current_power = new_power;
            light.data.energy = new_power;
        }
    }

    // ========================================================================
    // Session Feedback
    // ========================================================================

    fn refresh_hover<H: Host + ?Sized>(host: &mut H, session: &mut ModalSession) {
        let hovered = PropertyDispatcher::hovered(session.modifiers, session.light_type);
        if hovered != session.hovered_property {
            session.hovered_property = hovered;
            session.hud.set_hovered(hovered, host.now());
        }
        Self::refresh_status(host, session);
    }

    fn refresh_status<H: Host + ?Sized>(host: &mut H, session: &ModalSession) {
        let text = session.status_text(&host.props().render_engine);
        host.set_status_text(Some(text));
    }

    fn apply_theme<H: Host + ?Sized>(host: &mut H, session: &ModalSession) {
        let (accent, untinted) = if session.is_paused {
            (paused_tint(session.original_theme), Some(session.original_theme))
        } else {
            (session.original_theme, None)
        };
        host.props_mut().untinted_accent = untinted;
        host.set_theme_accent(accent);
    }

    fn apply_cursor<H: Host + ?Sized>(host: &mut H, session: &ModalSession) {
        let style = if session.mode == Mode::Orbit && !session.is_paused {
            CursorStyle::None
        } else {
            CursorStyle::Default
        };
        host.set_cursor(style);
    }

    /// Overlay for one draw callback. `None` for foreign viewports or when
    /// no session is running.
    pub fn draw<H: Host + ?Sized>(&mut self, host: &H, stage: DrawStage, region: RegionId) -> Option<DrawList> {
        let session = self.session.as_mut()?;
        let state = session.hud_state();
        session.hud.draw(host, stage, region, &state, host.now())
    }

    // ========================================================================
    // Exit Paths
    // ========================================================================

    /// Commits the session and records its state on the light.
    pub fn finalize<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let mut session = self.session.take().ok_or(WranglerError::NoSession)?;
        session.compensator.reset();
        let light = session.light;

        let Some(object) = host.object_mut(light) else {
            let name = session.snapshot.name.clone();
            Self::release(host, session);
            return Err(WranglerError::ObjectNotFound(name));
        };
        let (location, rotation_euler) = (object.location, object.rotation_euler);
        let orbit_center = match session.mode {
            Mode::Orbit => session.orbit_center,
            Mode::Reflect | Mode::Direct => session.last_hit,
        };
        if let Some(l) = object.as_light_mut() {
            let meta = &mut l.metadata;
            meta.last_mode = Some(session.mode);
            meta.last_offset = Some(session.current_distance);
            meta.last_pause_state = Some(session.is_paused);
            meta.last_z_rotation = Some(session.current_z_rotation);
            meta.last_known_loc = Some(location);
            meta.last_known_rot = Some(rotation_euler);
            if orbit_center.is_some() {
                meta.orbit_center = orbit_center;
            }
            meta.newly_created = false;
        }

        auto_key(host, light);
        log::info!(
            "Interactive session finished on '{}' ({}, distance {:.3})",
            session.snapshot.name,
            session.mode.display_name(),
            session.current_distance
        );
        Self::release(host, session);
        Ok(())
    }

    /// Reverts the light to its pre-session state. `revert_linking` also
    /// undoes light linking changes (ESC; right click keeps them).
    pub fn cancel<H: Host + ?Sized>(&mut self, host: &mut H, revert_linking: bool) -> Result<()> {
        let mut session = self.session.take().ok_or(WranglerError::NoSession)?;
        session.compensator.reset();
        let snapshot = session.snapshot.clone();

        if host.object(session.light).is_none() {
            log::warn!("Light '{}' vanished before cancel", snapshot.name);
        } else if snapshot.metadata.newly_created {
            remove_volume_cubes(host, &snapshot.name);
            host.remove_object(session.light);
            host.set_active_object(None);
            log::info!("Removed newly created light '{}'", snapshot.name);
        } else {
            let current_type = host.light(session.light).map(wrangler_scene::Light::light_type);
            if current_type == Some(snapshot.light_type()) {
                if let Some(object) = host.object_mut(session.light) {
                    snapshot.restore_onto(object);
                }
            } else {
                session.light = Self::replace_with_snapshot(host, session.light, &snapshot);
            }
            if revert_linking && let Some(light) = host.light_mut(session.light) {
                light.linking = snapshot.linking.clone();
            }
            if let Some(record) = &session.tracking {
                restore_tracking(host, session.light, record);
            }
            log::info!("Interactive session cancelled on '{}'", snapshot.name);
        }
        Self::release(host, session);
        Ok(())
    }

    /// Swaps the intermediate light for one of the captured type.
    fn replace_with_snapshot<H: Host + ?Sized>(host: &mut H, id: ObjectId, snapshot: &LightStateSnapshot) -> ObjectId {
        let Some(mut replacement) = host.remove_object(id) else {
            return id;
        };
        replacement.name.clone_from(&snapshot.name);
        if let Some(light) = replacement.as_light_mut() {
            light.data.kind = snapshot.kind();
        }
        snapshot.restore_onto(&mut replacement);
        let new_id = host.add_object(replacement);
        host.set_active_object(Some(new_id));
        log::debug!("Restored '{}' as {}", snapshot.name, snapshot.light_type().as_str());
        new_id
    }

    /// Undoes everything the session changed outside the light itself.
    fn release<H: Host + ?Sized>(host: &mut H, session: ModalSession) {
        for handle in session.draw_handles {
            host.remove_draw_handler(handle);
        }
        if !session.was_isolated && host.props().is_isolated {
            revert_isolation(host);
        }
        if let Some(object) = host.object_mut(session.light) {
            object.hide_viewport = session.snapshot.hide_viewport;
        }
        restore_volume_cubes(host, &session.hidden_volumes);

        host.set_cursor(CursorStyle::Default);
        host.set_status_text(None);
        host.set_theme_accent(session.original_theme);

        let props = host.props_mut();
        props.untinted_accent = None;
        if let Some(previous) = session.previous_view_transform {
            props.view_transform = previous;
        }
        props.is_interactive_mode_active = false;
        props.show_overlays = session.original_overlays;
        host.tag_redraw();
    }
}
