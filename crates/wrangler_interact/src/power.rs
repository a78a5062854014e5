//! Illuminance-preserving power compensation.
//!
//! When a geometric property changes, power is rescaled from the value it
//! had when the edit sequence started (the latch), not from the previous
//! tick. Undoing an edit within one sequence therefore lands exactly on the
//! reference power.

use wrangler_core::math::cone_solid_angle;

/// Below this cone angle, solid-angle ratios use an eighth root so narrow
/// cones do not jump.
const NARROW_CONE_DEG: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LatchKind {
    AreaSize,
    SpotSize,
    Distance,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Latch {
    kind: LatchKind,
    reference_power: f32,
    reference_value: f32,
}

#[derive(Debug, Clone, Default)]
pub struct PowerCompensator {
    enabled: bool,
    latch: Option<Latch>,
}

impl PowerCompensator {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled, latch: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Ends the current edit sequence.
    pub fn reset(&mut self) {
        self.latch = None;
    }

    #[must_use]
    pub fn is_latched(&self) -> bool {
        self.latch.is_some()
    }

    fn latched(&mut self, kind: LatchKind, power: f32, value: f32) -> Latch {
        match self.latch {
            Some(latch) if latch.kind == kind => latch,
            _ => {
                let latch = Latch {
                    kind,
                    reference_power: power,
                    reference_value: value,
                };
                log::debug!("Latched {kind:?} reference: power {power}, value {value}");
                self.latch = Some(latch);
                latch
            }
        }
    }

    /// Latches the distance reference ahead of an edit, as an Alt press does
    /// for area lights.
    pub fn latch_distance(&mut self, power: f32, distance: f32) {
        if self.enabled {
            self.latched(LatchKind::Distance, power, distance);
        }
    }

    /// Area light resized from `old_area` to `new_area`: power follows the
    /// square root of the area ratio.
    pub fn area_resized(&mut self, power: f32, old_area: f32, new_area: f32) -> f32 {
        if !self.enabled {
            return power;
        }
        let latch = self.latched(LatchKind::AreaSize, power, old_area);
        if latch.reference_value <= 0.0 {
            return power;
        }
        latch.reference_power * (new_area / latch.reference_value).sqrt()
    }

    /// Spot cone changed from `old_angle` to `new_angle`: power is divided by
    /// the solid-angle ratio's root to keep the beam's axial intensity.
    pub fn spot_resized(&mut self, power: f32, old_angle: f32, new_angle: f32) -> f32 {
        if !self.enabled {
            return power;
        }
        let latch = self.latched(LatchKind::SpotSize, power, old_angle);
        let reference = cone_solid_angle(latch.reference_value);
        if reference <= 0.0 {
            return power;
        }
        let ratio = cone_solid_angle(new_angle) / reference;
        latch.reference_power / ratio.powf(cone_exponent(new_angle))
    }

    /// Light moved from `old_distance` to `new_distance`: inverse square law.
    pub fn distance_changed(&mut self, power: f32, old_distance: f32, new_distance: f32) -> f32 {
        if !self.enabled {
            return power;
        }
        let latch = self.latched(LatchKind::Distance, power, old_distance);
        if latch.reference_value <= 0.0 {
            return power;
        }
        latch.reference_power * (new_distance / latch.reference_value).powi(2)
    }

    /// Area spread changed: multiplies the current power by the solid-angle
    /// ratio's root. Spread edits do not latch, and they end any running
    /// sequence since the latched reference power no longer holds.
    pub fn spread_changed(&mut self, power: f32, old_spread: f32, new_spread: f32) -> f32 {
        if !self.enabled {
            return power;
        }
        let old = cone_solid_angle(old_spread);
        if old <= 0.0 {
            return power;
        }
        self.reset();
        power * (cone_solid_angle(new_spread) / old).powf(cone_exponent(new_spread))
    }
}

fn cone_exponent(angle: f32) -> f32 {
    if angle < NARROW_CONE_DEG.to_radians() { 0.125 } else { 0.5 }
}
