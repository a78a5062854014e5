//! Light Data Model
//!
//! A light is a tagged record: shared emission fields ([`LightData::energy`],
//! [`LightData::color`]) plus a per-variant payload in [`LightKind`]. Every
//! per-variant operation the interactive editor needs dispatches on that
//! payload (floor clearance here, snapshot/restore and HUD formatting in the
//! crates above).

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;

use crate::linking::LightLinking;
use crate::metadata::LightMetadata;

/// Lowest clearance kept between a light and the floor below it.
pub const MIN_FLOOR_CLEARANCE: f32 = 0.1;

// ============================================================================
// Variant Tags
// ============================================================================

/// The four light variants the host knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LightType {
    Point,
    Spot,
    Area,
    Sun,
}

impl LightType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "POINT",
            Self::Spot => "SPOT",
            Self::Area => "AREA",
            Self::Sun => "SUN",
        }
    }
}

impl fmt::Display for LightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outline of an area light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AreaShape {
    #[default]
    Square,
    Rectangle,
    Disk,
    Ellipse,
}

impl AreaShape {
    /// Whether `size_y` is independent of `size_x`.
    #[must_use]
    pub fn has_independent_y(self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse)
    }

    /// The two-axis counterpart of a uniform shape.
    #[must_use]
    pub fn promoted(self) -> Self {
        match self {
            Self::Square => Self::Rectangle,
            Self::Disk => Self::Ellipse,
            other => other,
        }
    }
}

// ============================================================================
// Variant Payloads
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointParams {
    pub shadow_soft_size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotParams {
    /// Full cone angle in radians.
    pub spot_size: f32,
    pub spot_blend: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaParams {
    pub shape: AreaShape,
    pub size_x: f32,
    /// Only meaningful for `RECTANGLE` and `ELLIPSE`.
    pub size_y: f32,
    pub spread: f32,
}

impl AreaParams {
    #[must_use]
    pub fn width(&self) -> f32 {
        self.size_x
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        if self.shape.has_independent_y() {
            self.size_y
        } else {
            self.size_x
        }
    }

    #[must_use]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Switches `SQUARE`/`DISK` to their two-axis shapes, keeping the current
    /// size on both axes. Returns `true` when the shape changed.
    pub fn promote_shape(&mut self) -> bool {
        if self.shape.has_independent_y() {
            return false;
        }
        self.size_y = self.size_x;
        self.shape = self.shape.promoted();
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunParams {
    /// Angular diameter in radians.
    pub angle: f32,
}

/// Per-variant light parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    Point(PointParams),
    Spot(SpotParams),
    Area(AreaParams),
    Sun(SunParams),
}

impl LightKind {
    /// Host defaults for a freshly added light of `light_type`.
    #[must_use]
    pub fn default_for(light_type: LightType) -> Self {
        match light_type {
            LightType::Point => Self::Point(PointParams {
                shadow_soft_size: 0.25,
            }),
            LightType::Spot => Self::Spot(SpotParams {
                spot_size: 45.0_f32.to_radians(),
                spot_blend: 0.15,
            }),
            LightType::Area => Self::Area(AreaParams {
                shape: AreaShape::Square,
                size_x: 1.0,
                size_y: 1.0,
                spread: PI,
            }),
            LightType::Sun => Self::Sun(SunParams {
                angle: 0.526_f32.to_radians(),
            }),
        }
    }

    #[must_use]
    pub fn light_type(&self) -> LightType {
        match self {
            Self::Point(_) => LightType::Point,
            Self::Spot(_) => LightType::Spot,
            Self::Area(_) => LightType::Area,
            Self::Sun(_) => LightType::Sun,
        }
    }

    /// Height the light must keep above a floor so its body does not sink
    /// into it.
    ///
    /// Area lights use the lowest rotated corner, spots the cone radius at
    /// `distance`, points half their shadow radius. Suns have no body.
    #[must_use]
    pub fn floor_clearance(&self, rotation: Quat, distance: f32) -> f32 {
        match self {
            Self::Area(area) => {
                let (hw, hh) = (area.width() * 0.5, area.height() * 0.5);
                [
                    Vec3::new(-hw, -hh, 0.0),
                    Vec3::new(hw, -hh, 0.0),
                    Vec3::new(hw, hh, 0.0),
                    Vec3::new(-hw, hh, 0.0),
                ]
                .into_iter()
                .map(|corner| (rotation * corner).z.abs())
                .fold(MIN_FLOOR_CLEARANCE, f32::max)
            }
            Self::Spot(spot) => MIN_FLOOR_CLEARANCE.max((spot.spot_size * 0.5).tan() * distance),
            Self::Point(point) => MIN_FLOOR_CLEARANCE.max(point.shadow_soft_size * 0.5),
            Self::Sun(_) => 0.0,
        }
    }
}

// ============================================================================
// Light
// ============================================================================

/// Emission data shared by every variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightData {
    pub kind: LightKind,
    pub energy: f32,
    pub color: Vec3,
}

impl LightData {
    #[must_use]
    pub fn new(kind: LightKind, energy: f32) -> Self {
        Self {
            kind,
            energy,
            color: Vec3::ONE,
        }
    }

    #[must_use]
    pub fn light_type(&self) -> LightType {
        self.kind.light_type()
    }
}

/// A light component: emission data, editor annotations and linking.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub data: LightData,
    pub metadata: LightMetadata,
    pub linking: LightLinking,
}

impl Light {
    #[must_use]
    pub fn new(data: LightData) -> Self {
        Self {
            data,
            metadata: LightMetadata::default(),
            linking: LightLinking::default(),
        }
    }

    #[must_use]
    pub fn light_type(&self) -> LightType {
        self.data.light_type()
    }
}

/// The properties an interactive edit can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightProperty {
    Power,
    /// Uniform size: area size, spot cone, point radius or sun angle.
    Size,
    SizeX,
    SizeY,
    /// Area spread or spot blend.
    Spread,
    Distance,
    Rotation,
}
