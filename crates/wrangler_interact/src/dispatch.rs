//! Modifier-to-property dispatch and per-tick step rules.
//!
//! | Keys        | Light    | Property   | Step                      |
//! |-------------|----------|------------|---------------------------|
//! | Z           | non-SUN  | Rotation   | ±5° per tick              |
//! | Shift+Ctrl  | AREA     | SizeY      | ±5 %                      |
//! | Shift+Alt   | AREA     | SizeX      | ±5 %                      |
//! | Shift       | any      | Size       | ±5 %                      |
//! | Ctrl        | SPOT     | Spread     | ±0.05 blend               |
//! | Ctrl        | AREA     | Spread     | ±5° above 4°, else ±1°    |
//! | Alt         | non-SUN  | Distance   | ±5 % of current           |
//! | (none)      | any      | Power      | ±5 % (SUN ±0.5 %)         |
//!
//! The first matching row wins. Combinations without a row are ignored.

use std::f32::consts::PI;

use wrangler_core::math::wrap_angle;
use wrangler_scene::{LightProperty, LightType};

use crate::input::Modifiers;

pub const PROPORTIONAL_STEP: f32 = 0.05;
pub const SUN_POWER_STEP: f32 = 0.005;
pub const ROTATION_STEP_DEG: f32 = 5.0;
pub const BLEND_STEP: f32 = 0.05;

pub const MIN_POWER: f32 = 0.01;
pub const MIN_SIZE: f32 = 0.01;
pub const MIN_DISTANCE: f32 = 0.01;
pub const MIN_SPOT_SIZE_DEG: f32 = 1.0;
pub const MIN_SUN_ANGLE_DEG: f32 = 0.1;
pub const MIN_SPREAD_DEG: f32 = 1.0;

pub struct PropertyDispatcher;

impl PropertyDispatcher {
    /// Property a wheel tick edits. `None` for unrecognized combinations.
    #[must_use]
    pub fn resolve(modifiers: Modifiers, light_type: LightType) -> Option<LightProperty> {
        let is_sun = light_type == LightType::Sun;
        let is_area = light_type == LightType::Area;
        let shift = modifiers.contains(Modifiers::SHIFT);
        let ctrl = modifiers.contains(Modifiers::CTRL);
        let alt = modifiers.contains(Modifiers::ALT);

        if modifiers.contains(Modifiers::Z) {
            return (!is_sun).then_some(LightProperty::Rotation);
        }
        if shift && ctrl {
            return is_area.then_some(LightProperty::SizeY);
        }
        if shift && alt {
            return is_area.then_some(LightProperty::SizeX);
        }
        if shift {
            return Some(LightProperty::Size);
        }
        if ctrl {
            return matches!(light_type, LightType::Spot | LightType::Area).then_some(LightProperty::Spread);
        }
        if alt {
            return (!is_sun).then_some(LightProperty::Distance);
        }
        Some(LightProperty::Power)
    }

    /// Property the HUD hints at while modifiers are held. Nothing is
    /// hovered without modifiers.
    #[must_use]
    pub fn hovered(modifiers: Modifiers, light_type: LightType) -> Option<LightProperty> {
        if modifiers.is_empty() {
            return None;
        }
        Self::resolve(modifiers, light_type)
    }
}

// ============================================================================
// Step Rules
// ============================================================================

/// `value` grown or shrunk by `fraction` per unit of `direction`.
#[must_use]
pub fn proportional(value: f32, direction: f32, fraction: f32) -> f32 {
    value * (1.0 + fraction * direction)
}

#[must_use]
pub fn power_step(power: f32, direction: f32, light_type: LightType) -> f32 {
    let fraction = if light_type == LightType::Sun {
        SUN_POWER_STEP
    } else {
        PROPORTIONAL_STEP
    };
    proportional(power, direction, fraction).max(MIN_POWER)
}

/// Wheel-up rotates by −5°, wheel-down by +5°. Trackpads scale by the
/// vertical delta.
#[must_use]
pub fn rotation_step(roll: f32, direction: f32, trackpad: bool) -> f32 {
    let degrees = if trackpad {
        -ROTATION_STEP_DEG * direction
    } else if direction < 0.0 {
        ROTATION_STEP_DEG
    } else {
        -ROTATION_STEP_DEG
    };
    wrap_angle(roll + degrees.to_radians())
}

/// Alt+wheel-up moves the light closer.
#[must_use]
pub fn distance_step(distance: f32, direction: f32) -> f32 {
    let adjustment = PROPORTIONAL_STEP * distance * direction.abs();
    if direction > 0.0 {
        (distance - adjustment).max(MIN_DISTANCE)
    } else {
        distance + adjustment
    }
}

#[must_use]
pub fn spot_size_step(spot_size: f32, direction: f32) -> f32 {
    proportional(spot_size, direction, PROPORTIONAL_STEP).clamp(MIN_SPOT_SIZE_DEG.to_radians(), PI)
}

#[must_use]
pub fn sun_angle_step(angle: f32, direction: f32) -> f32 {
    proportional(angle, direction, PROPORTIONAL_STEP).clamp(MIN_SUN_ANGLE_DEG.to_radians(), PI)
}

#[must_use]
pub fn blend_step(blend: f32, direction: f32) -> f32 {
    (blend + BLEND_STEP * direction).clamp(0.0, 1.0)
}

/// Coarse 5° steps for wide spreads, fine 1° steps near the minimum.
#[must_use]
pub fn spread_step(spread: f32, direction: f32) -> f32 {
    let degrees = spread.to_degrees();
    let step = if direction > 0.0 {
        if degrees >= 4.0 { 5.0 } else { 1.0 }
    } else if degrees > 6.0 {
        5.0
    } else {
        1.0
    };
    (spread + (step * direction).to_radians()).clamp(MIN_SPREAD_DEG.to_radians(), PI)
}
