//! Property labels and value formatting for the value panel.

use wrangler_core::UnitSystem;
use wrangler_core::units::{format_angle, format_length, format_length_pair, format_power};
use wrangler_scene::{LightData, LightKind, LightProperty, LightType};

/// Session values that are not stored on the light itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueContext {
    pub power: f32,
    pub distance: f32,
    pub z_rotation: f32,
    pub units: UnitSystem,
}

/// Human name of `property` for a light of `light_type`.
#[must_use]
pub fn property_label(property: LightProperty, light_type: LightType) -> &'static str {
    match property {
        LightProperty::Power => match light_type {
            LightType::Sun => "Strength",
            _ => "Power",
        },
        LightProperty::Size => match light_type {
            LightType::Point => "Radius",
            LightType::Sun => "Angle",
            LightType::Spot => "Spot Size",
            LightType::Area => "Size",
        },
        LightProperty::SizeX => "Width",
        LightProperty::SizeY => "Height",
        LightProperty::Spread => match light_type {
            LightType::Spot => "Blend",
            _ => "Spread",
        },
        LightProperty::Distance => "Distance",
        LightProperty::Rotation => "Rotation",
    }
}

/// Formatted value of `property`, `None` when the light has no such value.
#[must_use]
pub fn format_property_value(light: &LightData, property: LightProperty, ctx: &ValueContext) -> Option<String> {
    let text = match (property, &light.kind) {
        (LightProperty::Power, LightKind::Sun(_)) => format!("{:.2}", ctx.power),
        (LightProperty::Power, _) => format_power(ctx.power),

        (LightProperty::Size, LightKind::Area(area)) => {
            if area.shape.has_independent_y() {
                format_length_pair(area.size_x, area.size_y, ctx.units)
            } else {
                format_length(area.size_x, ctx.units)
            }
        }
        (LightProperty::Size, LightKind::Spot(spot)) => format_angle(spot.spot_size),
        (LightProperty::Size, LightKind::Point(point)) => format_length(point.shadow_soft_size, ctx.units),
        (LightProperty::Size, LightKind::Sun(sun)) => format_angle(sun.angle),

        (LightProperty::SizeX, LightKind::Area(area)) => format_length(area.width(), ctx.units),
        (LightProperty::SizeY, LightKind::Area(area)) => format_length(area.height(), ctx.units),

        (LightProperty::Spread, LightKind::Spot(spot)) => format!("{:.0}%", spot.spot_blend * 100.0),
        (LightProperty::Spread, LightKind::Area(area)) => format_angle(area.spread),

        (LightProperty::Distance, kind) if kind.light_type() != LightType::Sun => {
            format_length(ctx.distance, ctx.units)
        }
        (LightProperty::Rotation, kind) if kind.light_type() != LightType::Sun => format_angle(ctx.z_rotation),

        _ => return None,
    };
    Some(text)
}

/// Text shown for a hovered property once the tooltip delay has passed.
///
/// Per-axis sizes show only their label: the value changes shape as soon
/// as the user scrolls.
#[must_use]
pub fn hover_text(light: &LightData, property: LightProperty, ctx: &ValueContext) -> String {
    let label = property_label(property, light.light_type());
    if matches!(property, LightProperty::SizeX | LightProperty::SizeY) {
        return label.to_string();
    }
    match format_property_value(light, property, ctx) {
        Some(value) => format!("{label}: {value}"),
        None => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrangler_scene::{AreaParams, AreaShape, SpotParams};

    fn ctx() -> ValueContext {
        ValueContext {
            power: 1500.0,
            distance: 2.5,
            z_rotation: 45.0_f32.to_radians(),
            units: UnitSystem::Metric,
        }
    }

    #[test]
    fn labels_depend_on_variant() {
        assert_eq!(property_label(LightProperty::Size, LightType::Point), "Radius");
        assert_eq!(property_label(LightProperty::Size, LightType::Sun), "Angle");
        assert_eq!(property_label(LightProperty::Spread, LightType::Spot), "Blend");
        assert_eq!(property_label(LightProperty::Power, LightType::Sun), "Strength");
    }

    #[test]
    fn rectangular_area_formats_pair() {
        let light = LightData::new(
            LightKind::Area(AreaParams {
                shape: AreaShape::Rectangle,
                size_x: 2.0,
                size_y: 0.5,
                spread: std::f32::consts::PI,
            }),
            10.0,
        );
        assert_eq!(
            format_property_value(&light, LightProperty::Size, &ctx()).as_deref(),
            Some("2 × 0.5 m")
        );
    }

    #[test]
    fn spot_blend_is_percent() {
        let light = LightData::new(
            LightKind::Spot(SpotParams {
                spot_size: 1.0,
                spot_blend: 0.25,
            }),
            10.0,
        );
        assert_eq!(
            format_property_value(&light, LightProperty::Spread, &ctx()).as_deref(),
            Some("25%")
        );
        assert_eq!(hover_text(&light, LightProperty::Power, &ctx()), "Power: 1.5 kW");
    }

    #[test]
    fn sun_has_no_distance() {
        let light = LightData::new(LightKind::default_for(LightType::Sun), 1.0);
        assert!(format_property_value(&light, LightProperty::Distance, &ctx()).is_none());
        assert_eq!(
            format_property_value(&light, LightProperty::Power, &ctx()).as_deref(),
            Some("1500.00")
        );
    }
}
