//! Display units for lengths, angles and power.
//!
//! Lengths escalate automatically: `mm → cm → m` in metric and
//! `th → ″ → ′` (sixteenths, inches, feet) in imperial.

use serde::{Deserialize, Serialize};

const INCHES_PER_METER: f32 = 39.3701;

/// The host's unit system preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

/// A concrete display unit for lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Millimeter,
    Centimeter,
    Meter,
    /// Sixteenths of an inch.
    Sixteenth,
    Inch,
    Foot,
}

impl LengthUnit {
    /// Picks the unit for a length given in meters.
    #[must_use]
    pub fn for_length(meters: f32, system: UnitSystem) -> Self {
        match system {
            UnitSystem::Imperial => {
                let inches = meters * INCHES_PER_METER;
                if inches < 1.0 {
                    Self::Sixteenth
                } else if inches < 12.0 {
                    Self::Inch
                } else {
                    Self::Foot
                }
            }
            UnitSystem::Metric => {
                if meters < 0.01 {
                    Self::Millimeter
                } else if meters < 1.0 {
                    Self::Centimeter
                } else {
                    Self::Meter
                }
            }
        }
    }

    /// Converts meters into this unit.
    #[must_use]
    pub fn convert(self, meters: f32) -> f32 {
        match self {
            Self::Millimeter => meters * 1000.0,
            Self::Centimeter => meters * 100.0,
            Self::Meter => meters,
            Self::Sixteenth => meters * INCHES_PER_METER * 16.0,
            Self::Inch => meters * INCHES_PER_METER,
            Self::Foot => meters * INCHES_PER_METER / 12.0,
        }
    }

    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Millimeter => " mm",
            Self::Centimeter => " cm",
            Self::Meter => " m",
            Self::Sixteenth => " th",
            Self::Inch => "″",
            Self::Foot => "′",
        }
    }

    /// Coarse units show whole numbers, large units one trimmed decimal.
    fn has_decimal(self) -> bool {
        matches!(self, Self::Meter | Self::Foot | Self::Inch)
    }
}

/// Formats a length with an automatically chosen unit.
#[must_use]
pub fn format_length(meters: f32, system: UnitSystem) -> String {
    format_length_in(meters, LengthUnit::for_length(meters, system), false)
}

/// Formats a length in a fixed unit, optionally without the suffix.
#[must_use]
pub fn format_length_in(meters: f32, unit: LengthUnit, hide_unit: bool) -> String {
    let value = unit.convert(meters);
    let number = if unit.has_decimal() {
        trim_decimal(&format!("{value:.1}"))
    } else {
        format!("{value:.0}")
    };
    if hide_unit {
        number
    } else {
        format!("{number}{}", unit.suffix())
    }
}

/// Formats a `width × height` pair sharing the unit of the larger side.
#[must_use]
pub fn format_length_pair(width: f32, height: f32, system: UnitSystem) -> String {
    let unit = LengthUnit::for_length(width.max(height), system);
    format!(
        "{} × {}",
        format_length_in(width, unit, true),
        format_length_in(height, unit, false)
    )
}

/// Formats an angle given in radians as whole degrees.
#[must_use]
pub fn format_angle(radians: f32) -> String {
    format!("{}°", radians.to_degrees().round() as i32)
}

/// Formats emitted power in watts with `mW`/`kW` escalation.
#[must_use]
pub fn format_power(watts: f32) -> String {
    if watts >= 1000.0 {
        format!("{:.1} kW", watts / 1000.0)
    } else if watts < 1.0 {
        format!("{:.0} mW", watts * 1000.0)
    } else {
        format!("{watts:.0} W")
    }
}

fn trim_decimal(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}
