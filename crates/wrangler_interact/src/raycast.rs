//! Adaptive multi-sample surface raycast.
//!
//! A single ray gives a jittery normal on bevelled or noisy geometry. The
//! sampler casts a sunflower pattern of rays around the cursor, averages the
//! normals it finds and blends the result with the previous frame. The
//! pattern shrinks when the cursor moves slowly so fine positioning stays
//! precise.

use std::collections::VecDeque;
use std::f32::consts::PI;

use glam::{Quat, Vec2, Vec3};
use smallvec::SmallVec;
use wrangler_core::math::NEAR_ZERO;
use wrangler_scene::{Host, NormalSmoothing, RAY_DISTANCE, ViewState};

/// Rays per sample, including the centre ray.
pub const SAMPLE_COUNT: usize = 38;

/// Inline capacity for per-sample buffers. Must be a size smallvec supports.
pub type SampleBuf<T> = SmallVec<[T; 64]>;

const VELOCITY_WINDOW: usize = 30;
const MIN_VELOCITY_SAMPLES: usize = 3;
/// Cursor speeds in px/s that map to the smallest and full pattern.
const SLOW_VELOCITY: f32 = 7.0;
const FAST_VELOCITY: f32 = 50.0;
const MIN_PATTERN_SCALE: f32 = 0.1;
/// Pattern radius in pixels at full scale.
const BASE_RADIUS: f32 = 75.0;
const DENSITY_EXPONENT: f32 = 1.5;

const LERP_FACTOR: f32 = 0.2;
const SLERP_FACTOR: f32 = 0.3;

/// Sample offsets around `center`: the centre first, then points on a
/// Vogel spiral that thin out toward the rim.
#[must_use]
pub fn sunflower_pattern(center: Vec2, radius: f32) -> SampleBuf<Vec2> {
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
    let rings = (SAMPLE_COUNT - 1) as f32;
    let mut points = SmallVec::new();
    points.push(center);
    for i in 1..SAMPLE_COUNT {
        let r = radius * (i as f32 / rings).powf(DENSITY_EXPONENT);
        let theta = i as f32 * golden_angle;
        points.push(center + Vec2::new(theta.cos(), theta.sin()) * r);
    }
    points
}

/// World ray under a region pixel, starting at the near clip plane.
///
/// Orthographic cameras shoot parallel rays from the camera plane along the
/// camera's forward axis.
#[must_use]
pub fn view_ray(view: &ViewState, coord: Vec2) -> (Vec3, Vec3) {
    let near = view.near_clip();
    if view.is_ortho_camera()
        && let Some(camera) = view.camera.as_ref()
    {
        let forward = camera.forward();
        let origin = view.region_2d_to_location_3d(coord, camera.location()) + forward * near;
        return (origin, forward);
    }
    let direction = view.region_2d_to_vector_3d(coord);
    let origin = view.region_2d_to_origin_3d(coord) + direction * near;
    (origin, direction)
}

/// Centre hit with a smoothed surface normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Pattern of the last sample, kept for debug drawing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatternDebug {
    pub points: Vec<Vec2>,
    pub center_hit: bool,
}

#[derive(Debug, Clone)]
pub struct AdaptiveRaycast {
    smoothing: NormalSmoothing,
    speeds: VecDeque<f32>,
    last_cursor: Option<(Vec2, f64)>,
    previous_normal: Option<Vec3>,
    debug: Option<PatternDebug>,
}

impl AdaptiveRaycast {
    #[must_use]
    pub fn new(smoothing: NormalSmoothing, visualize: bool) -> Self {
        Self {
            smoothing,
            speeds: VecDeque::with_capacity(VELOCITY_WINDOW),
            last_cursor: None,
            previous_normal: None,
            debug: visualize.then(PatternDebug::default),
        }
    }

    /// Forgets cursor history and the smoothed normal.
    pub fn reset(&mut self) {
        self.speeds.clear();
        self.last_cursor = None;
        self.previous_normal = None;
    }

    #[must_use]
    pub fn previous_normal(&self) -> Option<Vec3> {
        self.previous_normal
    }

    #[must_use]
    pub fn debug_pattern(&self) -> Option<&PatternDebug> {
        self.debug.as_ref()
    }

    /// Pattern scale from the moving-average cursor speed.
    #[must_use]
    pub fn pattern_scale(&self) -> f32 {
        if self.speeds.len() < MIN_VELOCITY_SAMPLES {
            return 1.0;
        }
        let average = self.speeds.iter().sum::<f32>() / self.speeds.len() as f32;
        let t = ((average - SLOW_VELOCITY) / (FAST_VELOCITY - SLOW_VELOCITY)).clamp(0.0, 1.0);
        MIN_PATTERN_SCALE + (1.0 - MIN_PATTERN_SCALE) * t
    }

    fn track_velocity(&mut self, cursor: Vec2, timestamp: f64) {
        if let Some((last, time)) = self.last_cursor {
            let dt = (timestamp - time) as f32;
            if dt > 0.0 {
                if self.speeds.len() == VELOCITY_WINDOW {
                    self.speeds.pop_front();
                }
                self.speeds.push_back(cursor.distance(last) / dt);
            }
        }
        self.last_cursor = Some((cursor, timestamp));
    }

    /// Samples the surface under the window position `mouse`.
    ///
    /// Returns `None` when there is no 3D view or the centre ray misses.
    pub fn sample<H: Host + ?Sized>(&mut self, host: &H, mouse: Vec2, timestamp: f64) -> Option<SurfaceSample> {
        self.track_velocity(mouse, timestamp);
        let view = host.view()?;
        let center = view.window_to_region(mouse);

        let (origin, direction) = view_ray(view, center);
        let center_hit = host.ray_cast(origin, direction, RAY_DISTANCE);

        let mut radius = BASE_RADIUS * self.pattern_scale();
        if view.is_perspective
            && let Some(hit) = center_hit
        {
            let view_distance = hit.point.distance(view.view_position());
            radius *= (1.0 - 0.05 * view_distance).clamp(0.2, 1.0);
        }
        let pattern = sunflower_pattern(center, radius);

        if let Some(debug) = self.debug.as_mut() {
            debug.points = pattern.to_vec();
            debug.center_hit = center_hit.is_some();
        }
        let hit = center_hit?;

        let mut normals: SampleBuf<Vec3> = SmallVec::new();
        normals.extend(hit.normal.try_normalize());
        for &point in pattern.iter().skip(1) {
            let (origin, direction) = view_ray(view, point);
            if let Some(normal) = host
                .ray_cast(origin, direction, RAY_DISTANCE)
                .and_then(|h| h.normal.try_normalize())
            {
                normals.push(normal);
            }
        }

        let normal = self.smooth(&normals).unwrap_or(hit.normal);
        self.previous_normal = Some(normal);
        Some(SurfaceSample { point: hit.point, normal })
    }

    fn smooth(&self, normals: &[Vec3]) -> Option<Vec3> {
        if normals.is_empty() {
            return self.previous_normal;
        }
        if normals.len() == 1 && self.previous_normal.is_none() {
            return Some(normals[0]);
        }
        match self.smoothing {
            NormalSmoothing::Lerp => {
                let average = normals.iter().copied().sum::<Vec3>().try_normalize()?;
                Some(match self.previous_normal {
                    Some(prev) => prev.lerp(average, LERP_FACTOR).try_normalize().unwrap_or(average),
                    None => average,
                })
            }
            NormalSmoothing::Slerp => {
                let average = average_rotation(normals)?;
                let blended = match self.previous_normal {
                    Some(prev) => Quat::from_rotation_arc(Vec3::Z, prev).slerp(average, SLERP_FACTOR),
                    None => average,
                };
                Some((blended * Vec3::Z).normalize())
            }
        }
    }
}

/// Mean of the rotations taking world up onto each normal.
fn average_rotation(normals: &[Vec3]) -> Option<Quat> {
    let mut sum = glam::Vec4::ZERO;
    let mut reference: Option<Quat> = None;
    for &normal in normals {
        let mut q = Quat::from_rotation_arc(Vec3::Z, normal);
        let first = *reference.get_or_insert(q);
        if first.dot(q) < 0.0 {
            q = -q;
        }
        sum += glam::Vec4::from(q);
    }
    if sum.length_squared() < NEAR_ZERO * NEAR_ZERO {
        return None;
    }
    Some(Quat::from_vec4(sum).normalize())
}
