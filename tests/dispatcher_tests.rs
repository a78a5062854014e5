//! Property dispatcher tests
//!
//! Tests for:
//! - Modifier to property routing
//! - Power, distance, spread and rotation steps

use glam::Vec3;
use light_wrangler::core::math::{aim_euler, forward_from_euler};
use light_wrangler::interact::Modifiers;
use light_wrangler::interact::dispatch::{
    MIN_SPREAD_DEG, PropertyDispatcher, distance_step, power_step, rotation_step, spread_step,
};
use light_wrangler::scene::{LightProperty, LightType};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

// ============================================================================
// Wheel Step Rules
// ============================================================================

#[test]
fn dispatch_table() {
    let area = LightType::Area;
    assert_eq!(PropertyDispatcher::resolve(Modifiers::empty(), area), Some(LightProperty::Power));
    assert_eq!(PropertyDispatcher::resolve(Modifiers::SHIFT, area), Some(LightProperty::Size));
    assert_eq!(PropertyDispatcher::resolve(Modifiers::SHIFT | Modifiers::CTRL, area), Some(LightProperty::SizeY));
    assert_eq!(PropertyDispatcher::resolve(Modifiers::SHIFT | Modifiers::ALT, area), Some(LightProperty::SizeX));
    assert_eq!(PropertyDispatcher::resolve(Modifiers::CTRL, LightType::Point), None);
    assert_eq!(PropertyDispatcher::resolve(Modifiers::ALT, LightType::Sun), None);
    assert_eq!(PropertyDispatcher::resolve(Modifiers::Z, LightType::Spot), Some(LightProperty::Rotation));
    assert_eq!(PropertyDispatcher::hovered(Modifiers::empty(), area), None);
}

#[test]
fn power_and_distance_steps() {
    assert!((power_step(100.0, 1.0, LightType::Area) - 105.0).abs() < 1e-3);
    assert!((power_step(100.0, -1.0, LightType::Area) - 95.0).abs() < 1e-3);
    assert!((distance_step(2.0, 1.0) - 1.9).abs() < 1e-5);
    assert!((distance_step(2.0, -1.0) - 2.1).abs() < 1e-5);
}

#[test]
fn spread_steps_refine_near_minimum() {
    let three = 3.0_f32.to_radians();
    assert!((spread_step(three, 1.0).to_degrees() - 4.0).abs() < 1e-3);
    let ten = 10.0_f32.to_radians();
    assert!((spread_step(ten, -1.0).to_degrees() - 5.0).abs() < 1e-3);
    let floor = MIN_SPREAD_DEG.to_radians();
    assert_eq!(spread_step(floor, -1.0), floor);
}

#[test]
fn rotation_step_wraps() {
    let near_limit = 178.0_f32.to_radians();
    let wrapped = rotation_step(near_limit, -1.0, false);
    assert!((wrapped.to_degrees() + 177.0).abs() < 1e-2);
    let orient = aim_euler(Vec3::NEG_Z, wrapped);
    assert!(vec3_approx(forward_from_euler(orient), Vec3::NEG_Z));
}
