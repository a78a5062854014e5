//! Scene objects as seen by the interactive editor.

use glam::{Quat, Vec3};
use slotmap::new_key_type;
use wrangler_core::math;

use crate::light::Light;

new_key_type! {
    /// Handle to an object in the host scene.
    pub struct ObjectId;
}

// ============================================================================
// Object Payloads
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyDisplay {
    #[default]
    PlainAxes,
    Arrows,
    Sphere,
    Cube,
}

/// Simple collision shapes for the in-memory scene, centred on the object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Infinite plane through the object location.
    Plane { normal: Vec3 },
    /// Axis-aligned box.
    Cuboid { half_extents: Vec3 },
    Sphere { radius: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectData {
    Light(Light),
    Empty(EmptyDisplay),
    Mesh(Collider),
}

// ============================================================================
// Constraints
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackAxis {
    X,
    Y,
    Z,
    NegX,
    NegY,
    #[default]
    NegZ,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpAxis {
    X,
    #[default]
    Y,
    Z,
}

/// A "track to" constraint aiming the owner at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackConstraint {
    pub name: String,
    pub target: Option<ObjectId>,
    pub track_axis: TrackAxis,
    pub up_axis: UpAxis,
}

// ============================================================================
// SceneObject
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub location: Vec3,
    /// Host `XYZ` Euler angles.
    pub rotation_euler: Vec3,
    pub scale: Vec3,
    pub hide_viewport: bool,
    pub collections: Vec<String>,
    pub constraints: Vec<TrackConstraint>,
    /// Volume cube generated by the gobo pipeline.
    pub is_gobo_volume: bool,
    /// Name of the light a volume cube belongs to.
    pub volume_parent_light: Option<String>,
    pub data: ObjectData,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            location: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
            hide_viewport: false,
            collections: Vec::new(),
            constraints: Vec::new(),
            is_gobo_volume: false,
            volume_parent_light: None,
            data,
        }
    }

    #[must_use]
    pub fn light(name: impl Into<String>, light: Light) -> Self {
        Self::new(name, ObjectData::Light(light))
    }

    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, ObjectData::Empty(EmptyDisplay::default()))
    }

    #[must_use]
    pub fn mesh(name: impl Into<String>, collider: Collider) -> Self {
        Self::new(name, ObjectData::Mesh(collider))
    }

    #[must_use]
    pub fn with_location(mut self, location: Vec3) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_euler: Vec3) -> Self {
        self.rotation_euler = rotation_euler;
        self
    }

    #[must_use]
    pub fn as_light(&self) -> Option<&Light> {
        match &self.data {
            ObjectData::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_light_mut(&mut self) -> Option<&mut Light> {
        match &mut self.data {
            ObjectData::Light(light) => Some(light),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_light(&self) -> bool {
        matches!(self.data, ObjectData::Light(_))
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        math::quat_from_euler(self.rotation_euler)
    }

    /// Local `-Z` in world space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}
