//! Light placement for the three interaction modes.
//!
//! - REFLECT: the light sits on the mirror reflection of the view ray, so
//!   the highlight lands under the cursor.
//! - DIRECT: the light sits on the surface normal.
//! - ORBIT: the light circles a fixed centre following mouse deltas.
//!
//! All placements aim local `-Z` at the target and then apply the session
//! roll.

use glam::{Vec2, Vec3};
use wrangler_core::math::{aim_euler, reflect, rotate_by_axis_angle};
use wrangler_scene::{Host, LightKind, Mode, SceneObject, ViewState};

/// Cosine of the snap cone used by Ctrl+orbit.
pub const SNAP_ALIGNMENT: f32 = 0.866;
/// Radians of orbit per pixel at sensitivity 1.
pub const ORBIT_SPEED: f32 = 0.005;
pub const PRECISE_FACTOR: f32 = 0.2;

/// Hit normals pointing further down than this skip floor correction.
const CEILING_NORMAL_Z: f32 = -0.707;
const FLOOR_PROBE_LIFT: f32 = 0.5;
const FLOOR_PROBE_DISTANCE: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub location: Vec3,
    pub rotation_euler: Vec3,
}

impl Placement {
    pub fn apply(&self, object: &mut SceneObject) {
        object.location = self.location;
        object.rotation_euler = self.rotation_euler;
    }
}

/// Rotation aiming `-Z` along `direction`, then rolled about local Z.
#[must_use]
pub fn apply_z_rotation(direction: Vec3, roll: f32) -> Vec3 {
    aim_euler(direction, roll)
}

/// Direction the view looks at `hit` from: the eye ray in perspective, the
/// view or camera axis in orthographic.
fn incident_direction(view: &ViewState, hit: Vec3) -> Vec3 {
    if view.is_ortho_camera()
        && let Some(camera) = view.camera.as_ref()
    {
        return camera.forward();
    }
    if view.is_perspective {
        (hit - view.view_position()).normalize_or_zero()
    } else {
        view.view_forward()
    }
}

/// Placement of `light` for a surface hit in REFLECT or DIRECT mode.
///
/// `ORBIT` is treated like `DIRECT`; orbit motion goes through [`orbit_step`].
#[must_use]
pub fn place_for_mode<H: Host + ?Sized>(
    host: &H,
    light: &SceneObject,
    mode: Mode,
    hit_point: Vec3,
    hit_normal: Vec3,
    distance: f32,
    roll: f32,
) -> Placement {
    let normal = hit_normal.normalize_or_zero();
    let override_direction = light
        .as_light()
        .and_then(|l| l.metadata.current_direction)
        .and_then(Vec3::try_normalize);

    let mut location = match (override_direction, mode, host.view()) {
        (Some(direction), _, _) => hit_point - direction * distance,
        (None, Mode::Reflect, Some(view)) => {
            let reflection = reflect(incident_direction(view, hit_point), normal).normalize_or_zero();
            hit_point + reflection * distance
        }
        _ => hit_point + normal * distance,
    };

    if normal.z >= CEILING_NORMAL_Z
        && let Some(kind) = light.as_light().map(|l| l.data.kind)
    {
        location = floor_corrected(host, location, &kind, light, distance);
    }

    Placement {
        location,
        rotation_euler: apply_z_rotation(hit_point - location, roll),
    }
}

/// Lifts `location` so the light body clears the floor below it.
fn floor_corrected<H: Host + ?Sized>(host: &H, location: Vec3, kind: &LightKind, light: &SceneObject, distance: f32) -> Vec3 {
    let probe = location + Vec3::Z * FLOOR_PROBE_LIFT;
    let Some(floor) = host.ray_cast(probe, Vec3::NEG_Z, FLOOR_PROBE_DISTANCE) else {
        return location;
    };
    let min_height = kind.floor_clearance(light.rotation(), distance);
    let lowest = floor.point.z + min_height;
    if location.z < lowest {
        log::trace!("Floor correction: z {} -> {lowest}", location.z);
        Vec3::new(location.x, location.y, lowest)
    } else {
        location
    }
}

/// Free orbit: the mouse delta rotates the light about `center` in the view
/// plane. Distance to `center` is preserved.
#[must_use]
pub fn orbit_step(
    view: &ViewState,
    location: Vec3,
    center: Vec3,
    delta: Vec2,
    sensitivity: f32,
    precise: bool,
    roll: f32,
) -> Placement {
    let mut speed = ORBIT_SPEED * sensitivity;
    if precise {
        speed *= PRECISE_FACTOR;
    }
    let axis = view.view_right() * -delta.y + view.view_up() * delta.x;
    let relative = rotate_by_axis_angle(location - center, axis * speed);
    let location = center + relative;
    Placement {
        location,
        rotation_euler: apply_z_rotation(center - location, roll),
    }
}

/// Ctrl+orbit: snaps onto the closest view axis through `center` when the
/// light is within 30° of it. `None` leaves the light where it is.
#[must_use]
pub fn orbit_snap(view: &ViewState, location: Vec3, center: Vec3, roll: f32) -> Option<Placement> {
    let relative = location - center;
    let distance = relative.length();
    let direction = relative.try_normalize()?;
    let axes = [view.view_right(), view.view_up(), -view.view_forward()];

    let (axis, alignment) = axes
        .into_iter()
        .map(|axis| (axis, direction.dot(axis)))
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))?;
    if alignment.abs() <= SNAP_ALIGNMENT {
        return None;
    }
    let location = center + axis * distance.copysign(alignment);
    Some(Placement {
        location,
        rotation_euler: apply_z_rotation(center - location, roll),
    })
}
