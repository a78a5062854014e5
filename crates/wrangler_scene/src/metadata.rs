//! Per-light editor annotations.
//!
//! These are stored on the light itself so they survive between sessions and
//! can be read by the viewport gizmo. Every point is a plain value, never an
//! object handle.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance from target to light used when a light has never been placed.
pub const DEFAULT_OFFSET: f32 = 2.0;

/// How a surface hit maps to a light transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// Mirror the view ray about the surface normal.
    Reflect,
    /// Sit along the surface normal.
    #[default]
    Direct,
    /// Rotate around a fixed pivot.
    Orbit,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reflect => "REFLECT",
            Self::Direct => "DIRECT",
            Self::Orbit => "ORBIT",
        }
    }

    /// Keyboard slot: 1 = Reflect, 2 = Orbit, 3 = Direct.
    #[must_use]
    pub fn slot(self) -> u8 {
        match self {
            Self::Reflect => 1,
            Self::Orbit => 2,
            Self::Direct => 3,
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Reflect => "Reflect Mode",
            Self::Orbit => "Orbit Mode",
            Self::Direct => "Direct Mode",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auxiliary fields attached to a light.
///
/// `None` means "never written", which is distinct from a written default:
/// cancelling a session deletes fields that did not exist before it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_offset: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_pause_state: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_z_rotation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbit_center: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_known_loc: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_known_rot: Option<Vec3>,
    /// Fixed aim direction that overrides REFLECT/DIRECT placement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_direction: Option<Vec3>,
    pub newly_created: bool,
}

impl LightMetadata {
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.last_mode.unwrap_or_default()
    }

    #[must_use]
    pub fn offset(&self) -> f32 {
        self.last_offset.unwrap_or(DEFAULT_OFFSET)
    }

    #[must_use]
    pub fn pause_state(&self) -> bool {
        self.last_pause_state.unwrap_or(false)
    }

    #[must_use]
    pub fn z_rotation(&self) -> f32 {
        self.last_z_rotation.unwrap_or(0.0)
    }
}
