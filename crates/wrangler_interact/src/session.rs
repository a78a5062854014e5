//! State of one running interactive session.

use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use wrangler_hud::{HelpContext, HudRenderer, HudState, status_bar_text};
use wrangler_scene::{DrawHandle, LightProperty, LightType, Mode, ObjectId, RegionId, RenderEngine};

use crate::input::Modifiers;
use crate::power::PowerCompensator;
use crate::raycast::AdaptiveRaycast;
use crate::snapshot::LightStateSnapshot;
use crate::tracking::TrackingRecord;

/// Coarse session state. Modes are orthogonal to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Positioning,
    Paused,
}

/// Everything a session owns between invoke and finalize or cancel.
#[derive(Debug)]
pub struct ModalSession {
    pub light: ObjectId,
    pub light_type: LightType,
    pub region: RegionId,
    pub mode: Mode,
    pub is_paused: bool,
    pub started_with_tab: bool,
    pub from_gizmo: bool,

    pub modifiers: Modifiers,
    pub active_property: Option<LightProperty>,
    pub hovered_property: Option<LightProperty>,

    pub current_power: f32,
    pub current_distance: f32,
    pub current_z_rotation: f32,

    pub last_hit: Option<Vec3>,
    pub last_normal: Option<Vec3>,
    pub orbit_center: Option<Vec3>,
    /// Cursor position orbit deltas are measured from.
    pub start_mouse: Option<Vec2>,

    pub(crate) first_event_skipped: bool,
    pub(crate) snapshot: LightStateSnapshot,
    pub(crate) tracking: Option<TrackingRecord>,
    pub(crate) original_theme: Vec3,
    pub(crate) original_overlays: bool,
    pub(crate) was_isolated: bool,
    /// View transform to return to when false color was switched on here.
    pub(crate) previous_view_transform: Option<String>,
    pub(crate) hidden_volumes: Vec<(ObjectId, bool)>,
    pub(crate) draw_handles: SmallVec<[DrawHandle; 3]>,
    pub(crate) compensator: PowerCompensator,
    pub(crate) raycast: AdaptiveRaycast,
    pub(crate) hud: HudRenderer,
}

impl ModalSession {
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.is_paused {
            SessionState::Paused
        } else {
            SessionState::Positioning
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &LightStateSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn raycast(&self) -> &AdaptiveRaycast {
        &self.raycast
    }

    #[must_use]
    pub fn hud(&self) -> &HudRenderer {
        &self.hud
    }

    #[must_use]
    pub fn hud_state(&self) -> HudState {
        HudState {
            light: self.light,
            mode: self.mode,
            is_paused: self.is_paused,
            active_property: self.active_property,
            hovered_property: self.hovered_property,
            shift: self.modifiers.contains(Modifiers::SHIFT),
            alt: self.modifiers.contains(Modifiers::ALT),
            ctrl: self.modifiers.contains(Modifiers::CTRL),
            current_power: self.current_power,
            current_distance: self.current_distance,
            current_z_rotation: self.current_z_rotation,
            hit_normal: self.last_normal,
        }
    }

    /// Status-bar line for the current mode, light and modifiers.
    #[must_use]
    pub fn status_text(&self, engine: &RenderEngine) -> String {
        status_bar_text(&HelpContext {
            mode: self.mode,
            light_type: self.light_type,
            is_paused: self.is_paused,
            shift: self.modifiers.contains(Modifiers::SHIFT),
            alt: self.modifiers.contains(Modifiers::ALT),
            ctrl: self.modifiers.contains(Modifiers::CTRL),
            engine,
        })
    }
}
