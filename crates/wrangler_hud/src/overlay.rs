//! World-space measurement and orbit visualization.
//!
//! Everything scales with the on-screen ring radius, which is 5 % of the
//! region height measured at the target point. Lines are emitted twice:
//! solid with `LessEqual` and faint with `Greater`, so occluded parts stay
//! readable without hiding the scene.

use std::f32::consts::TAU;

use glam::{Vec3, Vec4};
use wrangler_core::math::{NEAR_ZERO, reflect, wrap_angle};
use wrangler_scene::{AreaShape, DrawStage, LightKind, Mode, SceneObject, ViewState};

use crate::draw::{DepthTest, DrawList};

const RING_SEGMENTS: usize = 64;
const SHAPE_SEGMENTS: usize = 32;
const MAX_DISTANCE_TICKS: usize = 64;
/// Occluded dash length as a fraction of one ring segment.
const DASH_FRACTION: f32 = 0.6;

const SOLID_ALPHA: f32 = 0.9;
const XRAY_ALPHA: f32 = 0.15;
const LABEL_SIZE: f32 = 11.0;

/// Inputs of one visualization frame.
#[derive(Debug, Clone, Copy)]
pub struct OverlayInput<'a> {
    pub view: &'a ViewState,
    pub light: &'a SceneObject,
    /// Orbit centre in ORBIT, the aimed-at surface point otherwise.
    pub center: Vec3,
    pub mode: Mode,
    pub z_rotation: f32,
    pub hit_normal: Option<Vec3>,
    pub accent: Vec3,
}

/// Orthonormal frame of the light's local XY plane.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: Vec3,
    y: Vec3,
}

impl Frame {
    fn point(&self, center: Vec3, radius: f32, angle: f32) -> Vec3 {
        center + (self.x * angle.cos() + self.y * angle.sin()) * radius
    }
}

/// Builds the 3D overlay. Returns an empty list when the target point is
/// off screen.
#[must_use]
pub fn orbit_visualization(input: &OverlayInput<'_>) -> DrawList {
    let mut list = DrawList::new(DrawStage::View3d);
    let view = input.view;
    if view.location_3d_to_region_2d(input.center).is_none() {
        return list;
    }
    let radius = view.pixel_size_at(input.center, 0.05 * view.size.y);
    if radius <= NEAR_ZERO {
        return list;
    }
    let tick = radius * 0.05;

    let rotation = input.light.rotation();
    let frame = Frame {
        x: rotation * Vec3::X,
        y: rotation * Vec3::Y,
    };
    let solid = input.accent.extend(SOLID_ALPHA);
    let xray = input.accent.extend(XRAY_ALPHA);

    let location = input.light.location;
    let offset = location - input.center;
    let distance = offset.length();
    let dir = offset.try_normalize().unwrap_or(-input.light.forward());

    list.segment_with_xray(input.center, location, solid, xray);
    distance_ticks(&mut list, input, &frame, dir, distance, radius, tick, solid);

    if input.mode == Mode::Orbit {
        orbit_ring(&mut list, input, &frame, radius, tick, solid, xray);
    }

    light_shape(&mut list, input, &frame, input.center + dir * radius, radius, solid, xray);

    if matches!(input.mode, Mode::Reflect | Mode::Direct) {
        let normal = input.hit_normal.and_then(Vec3::try_normalize).unwrap_or(dir);
        let half = input.accent.extend(0.5);
        list.segment_with_xray(input.center, input.center + normal * radius * 0.5, half, xray);
        if input.mode == Mode::Reflect {
            let incident = reflect(-dir, normal);
            list.segment_with_xray(input.center, input.center - incident * radius * 0.5, half, xray);
        }
    }

    list
}

fn distance_ticks(
    list: &mut DrawList,
    input: &OverlayInput<'_>,
    frame: &Frame,
    dir: Vec3,
    distance: f32,
    radius: f32,
    tick: f32,
    color: Vec4,
) {
    let spacing = radius * 0.25;
    let count = ((distance / spacing).floor() as usize).min(MAX_DISTANCE_TICKS);
    if count == 0 {
        return;
    }
    let mut vertices = Vec::with_capacity(count * 2);
    for i in 0..count {
        let pos = input.center + dir * spacing * (i + 1) as f32;
        vertices.push(pos - frame.y * tick);
        vertices.push(pos + frame.y * tick);
        if i == count / 2
            && let Some(at) = input.view.location_3d_to_region_2d(pos + frame.y * tick * 2.5)
        {
            list.text(at, format!("{distance:.1}m"), color, LABEL_SIZE);
        }
    }
    list.lines(vertices, color, DepthTest::LessEqual);
}

fn orbit_ring(list: &mut DrawList, input: &OverlayInput<'_>, frame: &Frame, radius: f32, tick: f32, solid: Vec4, xray: Vec4) {
    let step = TAU / RING_SEGMENTS as f32;
    let center = input.center;

    list.line_strip(
        (0..=RING_SEGMENTS).map(|i| frame.point(center, radius, i as f32 * step)),
        solid,
        DepthTest::LessEqual,
    );
    let dashes = (0..RING_SEGMENTS).step_by(2).flat_map(|i| {
        let a = i as f32 * step;
        [
            frame.point(center, radius, a),
            frame.point(center, radius, a + step * DASH_FRACTION),
        ]
    });
    list.lines(dashes.collect::<Vec<_>>(), xray, DepthTest::Greater);

    let roll = input.z_rotation;
    let mut markers = Vec::new();
    for degrees in (0..360).step_by(15) {
        let angle = (degrees as f32).to_radians();
        let length = if degrees % 45 == 0 { tick * 1.5 } else { tick };
        let inner = frame.point(center, radius, angle);
        let outer = frame.point(center, radius + length, angle);
        markers.push(inner);
        markers.push(outer);

        if degrees % 45 == 0
            && wrap_angle(roll - angle).abs() < 22.5_f32.to_radians()
            && let Some(at) = input.view.location_3d_to_region_2d(frame.point(center, radius + tick * 3.0, angle))
        {
            list.text(at, format!("{degrees}°"), solid, LABEL_SIZE);
        }
    }
    list.lines(markers, solid, DepthTest::LessEqual);
}

/// Miniature outline of the light body sitting on the measurement line.
fn light_shape(
    list: &mut DrawList,
    input: &OverlayInput<'_>,
    frame: &Frame,
    at: Vec3,
    radius: f32,
    solid: Vec4,
    xray: Vec4,
) {
    let size = radius * 0.4;
    let (half_x, half_y, rectangular) = match input.light.as_light().map(|l| &l.data.kind) {
        Some(LightKind::Area(area)) => {
            let longest = area.width().max(area.height()).max(NEAR_ZERO);
            let rectangular = matches!(area.shape, AreaShape::Square | AreaShape::Rectangle);
            (
                size * area.width() / longest,
                size * area.height() / longest,
                rectangular,
            )
        }
        _ => (size * 0.5, size * 0.5, false),
    };

    let outline: Vec<Vec3> = if rectangular {
        [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)]
            .into_iter()
            .map(|(sx, sy)| at + frame.x * (sx * half_x) + frame.y * (sy * half_y))
            .collect()
    } else {
        let step = TAU / SHAPE_SEGMENTS as f32;
        (0..=SHAPE_SEGMENTS)
            .map(|i| {
                let a = i as f32 * step;
                at + frame.x * (a.cos() * half_x) + frame.y * (a.sin() * half_y)
            })
            .collect()
    };
    list.line_strip(outline.iter().copied(), solid, DepthTest::LessEqual);
    list.line_strip(outline, xray, DepthTest::Greater);

    let forward = input.light.forward();
    list.segment_with_xray(at, at + forward * radius * 0.3, solid, xray);
}
