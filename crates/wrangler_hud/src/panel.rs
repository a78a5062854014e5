//! Screen-space value panel anchored above the target point.

use glam::{Vec2, Vec4};
use wrangler_core::timing::has_elapsed;
use wrangler_scene::{DrawStage, LightData, LightProperty};

use crate::draw::DrawList;
use crate::labels::{ValueContext, format_property_value, hover_text, property_label};

/// Seconds a hovered property waits before its tooltip appears, counted
/// both from hover start and from the last wheel tick.
pub const TOOLTIP_DELAY: f64 = 0.5;

const TEXT_SIZE: f32 = 13.0;
const CHAR_WIDTH: f32 = 7.5;
const PADDING: Vec2 = Vec2::new(10.0, 6.0);
const LIFT: f32 = 40.0;

/// What the panel should currently show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelContent {
    pub active: Option<LightProperty>,
    pub hovered: Option<LightProperty>,
    pub hover_start: Option<f64>,
    pub last_wheel: Option<f64>,
    pub now: f64,
}

impl PanelContent {
    /// The text to draw, if any.
    #[must_use]
    pub fn text(&self, light: &LightData, ctx: &ValueContext) -> Option<String> {
        if let Some(property) = self.active {
            return Some(
                format_property_value(light, property, ctx)
                    .unwrap_or_else(|| property_label(property, light.light_type()).to_string()),
            );
        }
        let hovered = self.hovered?;
        let hover_ready = self.hover_start.is_some() && has_elapsed(self.hover_start, self.now, TOOLTIP_DELAY);
        if !hover_ready || !has_elapsed(self.last_wheel, self.now, TOOLTIP_DELAY) {
            return None;
        }
        Some(hover_text(light, hovered, ctx))
    }
}

/// Draws `text` in a rounded panel centred above `anchor`.
#[must_use]
pub fn value_panel(anchor: Vec2, text: &str, accent: Vec4) -> DrawList {
    let mut list = DrawList::new(DrawStage::Overlay2d);
    let width = text.chars().count() as f32 * CHAR_WIDTH;
    let center = anchor + Vec2::new(0.0, LIFT);
    let half = Vec2::new(width * 0.5, TEXT_SIZE * 0.5) + PADDING;
    list.rect(center - half, center + half, Vec4::new(0.0, 0.0, 0.0, 0.6), 4.0);
    list.text(
        center - Vec2::new(width * 0.5, TEXT_SIZE * 0.5),
        text,
        accent,
        TEXT_SIZE,
    );
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrangler_core::UnitSystem;
    use wrangler_scene::{LightKind, LightType};

    fn ctx() -> ValueContext {
        ValueContext {
            power: 100.0,
            distance: 2.0,
            z_rotation: 0.0,
            units: UnitSystem::Metric,
        }
    }

    fn content(now: f64) -> PanelContent {
        PanelContent {
            active: None,
            hovered: Some(LightProperty::Distance),
            hover_start: Some(1.0),
            last_wheel: None,
            now,
        }
    }

    #[test]
    fn hover_waits_for_delay() {
        let light = LightData::new(LightKind::default_for(LightType::Area), 100.0);
        assert_eq!(content(1.2).text(&light, &ctx()), None);
        assert_eq!(content(1.6).text(&light, &ctx()).as_deref(), Some("Distance: 2 m"));
    }

    #[test]
    fn recent_wheel_suppresses_tooltip() {
        let light = LightData::new(LightKind::default_for(LightType::Area), 100.0);
        let mut c = content(2.0);
        c.last_wheel = Some(1.8);
        assert_eq!(c.text(&light, &ctx()), None);
    }

    #[test]
    fn active_property_shows_immediately() {
        let light = LightData::new(LightKind::default_for(LightType::Area), 100.0);
        let mut c = content(1.0);
        c.active = Some(LightProperty::Power);
        assert_eq!(c.text(&light, &ctx()).as_deref(), Some("100 W"));
    }
}
