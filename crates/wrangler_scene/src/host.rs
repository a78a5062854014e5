//! Host Contract
//!
//! [`Host`] is the single seam between the interactive editor and the 3D
//! application it runs in.
//!
//! # Overview
//!
//! The editor needs four things from the host:
//! - a scene query: [`Host::ray_cast`]
//! - object handles with typed light data
//! - the active viewport's projection: [`Host::view`]
//! - UI plumbing: redraw, cursor, status text, reports and draw handlers
//!
//! Everything else (undo, persistence, rendering) stays with the host.

use glam::Vec3;

use crate::light::Light;
use crate::object::{ObjectId, SceneObject};
use crate::prefs::Preferences;
use crate::props::SceneProps;
use crate::view::ViewState;

/// Reach of scene queries issued by the editor.
pub const RAY_DISTANCE: f32 = 10_000.0;

/// Result of a successful scene ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub object: Option<ObjectId>,
}

/// Severity of a user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    /// Cursor hidden.
    None,
}

/// The three overlays a session registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawStage {
    /// World-space orbit and measurement lines.
    View3d,
    /// Screen-space value panel.
    Overlay2d,
    /// Help panel.
    Help,
}

/// Registration token returned by [`Host::add_draw_handler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawHandle(pub u64);

pub trait Host {
    // ========================================================================
    // Scene Queries
    // ========================================================================

    /// Nearest hit along `direction` within `distance`. Lights, empties and
    /// hidden objects are never hit.
    fn ray_cast(&self, origin: Vec3, direction: Vec3, distance: f32) -> Option<RayHit>;

    /// The viewport the current operator runs in, `None` outside a 3D view.
    fn view(&self) -> Option<&ViewState>;

    // ========================================================================
    // Objects
    // ========================================================================

    fn object(&self, id: ObjectId) -> Option<&SceneObject>;
    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject>;
    /// Links a new object into the scene. The name may be made unique.
    fn add_object(&mut self, object: SceneObject) -> ObjectId;
    fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject>;
    fn object_ids(&self) -> Vec<ObjectId>;
    fn active_object(&self) -> Option<ObjectId>;
    fn set_active_object(&mut self, id: Option<ObjectId>);

    // ========================================================================
    // Scene State
    // ========================================================================

    fn props(&self) -> &SceneProps;
    fn props_mut(&mut self) -> &mut SceneProps;
    fn preferences(&self) -> &Preferences;

    // ========================================================================
    // UI
    // ========================================================================

    /// Wall clock in seconds.
    fn now(&self) -> f64;
    fn report(&mut self, level: ReportLevel, message: &str);
    fn tag_redraw(&mut self);
    fn set_cursor(&mut self, style: CursorStyle);
    fn set_status_text(&mut self, text: Option<String>);
    fn add_draw_handler(&mut self, stage: DrawStage) -> DrawHandle;
    fn remove_draw_handler(&mut self, handle: DrawHandle);
    fn theme_accent(&self) -> Vec3;
    fn set_theme_accent(&mut self, color: Vec3);

    // ========================================================================
    // Animation
    // ========================================================================

    /// Whether the data path of `id` already carries animation.
    fn is_animated(&self, id: ObjectId, path: &str) -> bool;
    fn insert_keyframe(&mut self, id: ObjectId, path: &str, frame: i32);

    // ========================================================================
    // Provided
    // ========================================================================

    fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.object_ids()
            .into_iter()
            .find(|&id| self.object(id).is_some_and(|o| o.name == name))
    }

    fn light(&self, id: ObjectId) -> Option<&Light> {
        self.object(id).and_then(SceneObject::as_light)
    }

    fn light_mut(&mut self, id: ObjectId) -> Option<&mut Light> {
        self.object_mut(id).and_then(SceneObject::as_light_mut)
    }

    /// All light objects in the scene.
    fn light_ids(&self) -> Vec<ObjectId> {
        self.object_ids()
            .into_iter()
            .filter(|&id| self.object(id).is_some_and(SceneObject::is_light))
            .collect()
    }
}
