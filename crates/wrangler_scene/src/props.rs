//! Scene-level state owned by the host and shared with other components.

use std::fmt;

use glam::Vec3;
use wrangler_core::UnitSystem;

use crate::metadata::Mode;
use crate::object::ObjectId;

/// View transform name that maps luminance to discrete hues.
pub const FALSE_COLOR: &str = "False Color";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderEngine {
    #[default]
    Cycles,
    EeveeNext,
    Eevee,
    Workbench,
    Other(String),
}

impl RenderEngine {
    /// Engines that implement light and shadow linking.
    #[must_use]
    pub fn supports_light_linking(&self) -> bool {
        matches!(self, Self::Cycles | Self::EeveeNext)
    }
}

impl fmt::Display for RenderEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycles => f.write_str("CYCLES"),
            Self::EeveeNext => f.write_str("BLENDER_EEVEE_NEXT"),
            Self::Eevee => f.write_str("BLENDER_EEVEE"),
            Self::Workbench => f.write_str("BLENDER_WORKBENCH"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Auto-keying flags of the host's tool settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyingSettings {
    pub auto_keying: bool,
    /// Only key channels that are already animated.
    pub only_insert_available: bool,
    pub location: bool,
    pub rotation: bool,
}

impl Default for KeyingSettings {
    fn default() -> Self {
        Self {
            auto_keying: false,
            only_insert_available: false,
            location: true,
            rotation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneProps {
    /// Gizmos and selection handlers defer while this is set.
    pub is_interactive_mode_active: bool,
    pub is_isolated: bool,
    /// Viewport visibility of every light before isolation.
    pub isolation_states: Vec<(ObjectId, bool)>,
    pub show_help: bool,
    pub last_mode: Option<Mode>,
    pub render_engine: RenderEngine,
    pub unit_system: UnitSystem,
    pub view_transform: String,
    pub show_overlays: bool,
    pub keying: KeyingSettings,
    pub frame_current: i32,
    /// Theme accent from before the paused tint. Present only while the tint
    /// is on screen, so a session the host tore down can still be undone.
    pub untinted_accent: Option<Vec3>,
}

impl Default for SceneProps {
    fn default() -> Self {
        Self {
            is_interactive_mode_active: false,
            is_isolated: false,
            isolation_states: Vec::new(),
            show_help: false,
            last_mode: None,
            render_engine: RenderEngine::default(),
            unit_system: UnitSystem::default(),
            view_transform: "AgX".to_string(),
            show_overlays: true,
            keying: KeyingSettings::default(),
            frame_current: 1,
            untinted_accent: None,
        }
    }
}
