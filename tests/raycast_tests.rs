//! Adaptive raycast tests
//!
//! Tests for:
//! - Sunflower sample pattern
//! - Centre hit and smoothed normal
//! - Velocity-driven pattern scale
//! - Normal blending across box edges

use glam::{Vec2, Vec3};
use light_wrangler::interact::AdaptiveRaycast;
use light_wrangler::interact::raycast::{SAMPLE_COUNT, sunflower_pattern};
use light_wrangler::scene::{Collider, Host, MemoryHost, NormalSmoothing, RegionId, SceneObject, ViewState};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

fn view_from(eye: Vec3) -> ViewState {
    ViewState::perspective(
        RegionId(1),
        Vec2::new(400.0, 400.0),
        eye,
        Vec3::ZERO,
        Vec3::Z,
        50.0_f32.to_radians(),
    )
}

// ============================================================================
// Adaptive Raycast
// ============================================================================

#[test]
fn pattern_starts_at_the_cursor() {
    let center = Vec2::new(50.0, 60.0);
    let pattern = sunflower_pattern(center, 75.0);
    assert_eq!(pattern.len(), SAMPLE_COUNT);
    assert_eq!(pattern[0], center);
    assert!(pattern.iter().all(|p| p.distance(center) <= 75.0 + EPSILON));
}

#[test]
fn sample_hits_floor_under_cursor() {
    let host = MemoryHost::new()
        .with_floor(0.0)
        .with_view(ViewState::perspective(
            RegionId(1),
            Vec2::new(200.0, 400.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            Vec3::Y,
            50.0_f32.to_radians(),
        ));
    let mut raycast = AdaptiveRaycast::new(NormalSmoothing::Lerp, false);

    let sample = raycast.sample(&host, Vec2::new(100.0, 200.0), 0.0).expect("floor hit");
    assert!(vec3_approx(sample.point, Vec3::ZERO));
    assert!(vec3_approx(sample.normal, Vec3::Z));
    assert_eq!(raycast.previous_normal(), Some(sample.normal));
}

#[test]
fn slow_cursor_shrinks_pattern() {
    let host = MemoryHost::new().with_floor(0.0).with_view(view_from(Vec3::new(0.0, -4.0, 4.0)));
    let mut raycast = AdaptiveRaycast::new(NormalSmoothing::Slerp, true);
    assert_eq!(raycast.pattern_scale(), 1.0);

    for step in 0..6 {
        raycast.sample(&host, Vec2::new(200.0 + step as f32 * 0.05, 200.0), f64::from(step));
    }
    assert!(raycast.pattern_scale() < 0.2);
    assert!(raycast.debug_pattern().is_some_and(|d| d.center_hit));
}

#[test]
fn box_edge_normal_is_blended() {
    let mut host = MemoryHost::new().with_view(view_from(Vec3::new(0.0, -6.0, 6.0)));
    host.add_object(SceneObject::mesh(
        "Box",
        Collider::Cuboid {
            half_extents: Vec3::splat(1.0),
        },
    ));
    let mut raycast = AdaptiveRaycast::new(NormalSmoothing::Lerp, false);
    let view = host.view().unwrap().clone();
    let edge = view
        .location_3d_to_region_2d(Vec3::new(0.0, -1.0, 1.0))
        .expect("edge visible");

    let sample = raycast.sample(&host, edge, 0.0).expect("box hit");
    assert!(sample.normal.y < 0.0);
    assert!(sample.normal.z > 0.0);
}
