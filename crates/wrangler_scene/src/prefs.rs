//! Add-on preferences.
//!
//! The host owns persistence; it hands the core a JSON document which is
//! parsed into [`Preferences`] and range-checked.
//!
//! ```rust,ignore
//! let prefs = Preferences::from_json_str(r#"{ "orbit_sensitivity": 0.5 }"#)?;
//! assert_eq!(prefs.initial_light_distance, 1.5);
//! ```

use serde::{Deserialize, Serialize};
use wrangler_core::{Result, WranglerError};

/// How a session that re-enters an existing light decides its pause state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentModeEntry {
    /// Resume with the pause state the light was left in.
    #[default]
    LastUsed,
    /// Always start paused.
    AlwaysInactive,
}

/// Blend used when averaging sampled normals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalSmoothing {
    #[default]
    Lerp,
    Slerp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Distance from the surface a new light is placed at.
    pub initial_light_distance: f32,
    pub initial_light_power: f32,
    pub initial_light_size: f32,
    /// Keep illuminance constant while size, distance or spread change.
    pub use_calculated_light: bool,
    pub adjustment_mode_entry: AdjustmentModeEntry,
    pub orbit_sensitivity: f32,
    pub show_help_by_default: bool,
    pub hide_viewport_overlays: bool,
    /// Move new lights into a "Lights" collection.
    pub organize_lights: bool,
    pub use_scrim_for_area_lights: bool,
    /// Angular tolerance for trusting a stored gizmo target, in degrees.
    pub gizmo_target_tolerance_deg: f32,
    pub normal_smoothing: NormalSmoothing,
    /// Keep the last sample pattern around for debug drawing.
    pub visualize_raycast: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            initial_light_distance: 1.5,
            initial_light_power: 10.0,
            initial_light_size: 1.0,
            use_calculated_light: true,
            adjustment_mode_entry: AdjustmentModeEntry::LastUsed,
            orbit_sensitivity: 1.0,
            show_help_by_default: false,
            hide_viewport_overlays: true,
            organize_lights: false,
            use_scrim_for_area_lights: true,
            gizmo_target_tolerance_deg: 0.2,
            normal_smoothing: NormalSmoothing::Lerp,
            visualize_raycast: false,
        }
    }
}

impl Preferences {
    /// Parses a preference document; missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let prefs: Self = serde_json::from_str(json)?;
        prefs.validate()?;
        Ok(prefs)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every value against its accepted range.
    pub fn validate(&self) -> Result<()> {
        check(
            "initial_light_distance",
            self.initial_light_distance >= 0.1,
            "must be at least 0.1",
        )?;
        check(
            "initial_light_power",
            self.initial_light_power >= 0.0,
            "must not be negative",
        )?;
        check(
            "initial_light_size",
            self.initial_light_size >= 0.01,
            "must be at least 0.01",
        )?;
        check(
            "orbit_sensitivity",
            (0.1..=2.0).contains(&self.orbit_sensitivity),
            "must be within [0.1, 2.0]",
        )?;
        check(
            "gizmo_target_tolerance_deg",
            self.gizmo_target_tolerance_deg >= 0.0,
            "must not be negative",
        )
    }
}

fn check(key: &str, ok: bool, reason: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(WranglerError::InvalidPreference {
            key: key.to_string(),
            reason: reason.to_string(),
        })
    }
}
