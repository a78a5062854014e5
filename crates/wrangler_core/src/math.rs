//! Orientation Math
//!
//! Helpers for aiming lights. Lights look down their local `-Z` axis and the
//! world is Z-up, so "aiming" means building a rotation whose `-Z` column
//! points at a target while the local `Y` axis stays as close to world up as
//! possible. Roll is an extra rotation about the local `Z` axis applied after
//! aiming.
//!
//! Euler angles follow the host convention: `XYZ` order applied extrinsically,
//! which is `R = Rz * Ry * Rx`.

use glam::{EulerRot, Mat3, Quat, Vec3};
use std::f32::consts::{PI, TAU};

/// World up axis.
pub const WORLD_UP: Vec3 = Vec3::Z;

/// Vectors shorter than this are treated as zero.
pub const NEAR_ZERO: f32 = 1e-4;

// ============================================================================
// Aiming
// ============================================================================

/// Rotation that maps local `-Z` onto `direction` with local `Y` tracking world up.
///
/// A zero direction yields identity. When `direction` is parallel to world up
/// the world `Y` axis is used as the secondary reference instead.
#[must_use]
pub fn track_quat(direction: Vec3) -> Quat {
    let Some(forward) = direction.try_normalize() else {
        return Quat::IDENTITY;
    };
    let z_axis = -forward;

    let mut y_axis = WORLD_UP - z_axis * WORLD_UP.dot(z_axis);
    if y_axis.length_squared() < 1e-8 {
        y_axis = Vec3::Y - z_axis * Vec3::Y.dot(z_axis);
    }
    let y_axis = y_axis.normalize();
    let x_axis = y_axis.cross(z_axis);

    Quat::from_mat3(&Mat3::from_cols(x_axis, y_axis, z_axis)).normalize()
}

/// Aims along `direction` and then rolls by `roll` radians about the local Z axis.
#[must_use]
pub fn aim_quat(direction: Vec3, roll: f32) -> Quat {
    track_quat(direction) * Quat::from_rotation_z(roll)
}

/// Same as [`aim_quat`], returned as host Euler angles.
#[must_use]
pub fn aim_euler(direction: Vec3, roll: f32) -> Vec3 {
    euler_from_quat(aim_quat(direction, roll))
}

// ============================================================================
// Euler Conversion
// ============================================================================

/// Converts host `XYZ` Euler angles into a quaternion.
#[must_use]
pub fn quat_from_euler(euler: Vec3) -> Quat {
    Quat::from_euler(EulerRot::ZYX, euler.z, euler.y, euler.x)
}

/// Converts a quaternion into host `XYZ` Euler angles.
#[must_use]
pub fn euler_from_quat(rotation: Quat) -> Vec3 {
    let (z, y, x) = rotation.to_euler(EulerRot::ZYX);
    Vec3::new(x, y, z)
}

/// World-space direction a light with the given Euler rotation points at.
#[must_use]
pub fn forward_from_euler(euler: Vec3) -> Vec3 {
    quat_from_euler(euler) * Vec3::NEG_Z
}

/// Extracts the roll component of an orientation.
///
/// The result is the angle that, passed to [`aim_quat`] together with the
/// orientation's own forward axis, reproduces the orientation.
#[must_use]
pub fn roll_from_euler(euler: Vec3) -> f32 {
    let rotation = quat_from_euler(euler);
    let aim = rotation * Vec3::NEG_Z;
    let up = rotation * Vec3::Y;
    let base_up = track_quat(aim) * Vec3::Y;

    let up_proj = (up - aim * up.dot(aim)).normalize_or_zero();
    let base_proj = (base_up - aim * base_up.dot(aim)).normalize_or_zero();

    up_proj.cross(base_proj).dot(aim).atan2(up_proj.dot(base_proj))
}

// ============================================================================
// Vector Helpers
// ============================================================================

/// Mirror reflection of `incident` about the plane with normal `normal`.
#[must_use]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Rotates `v` about the axis `axis_angle` by `|axis_angle|` radians.
#[must_use]
pub fn rotate_by_axis_angle(v: Vec3, axis_angle: Vec3) -> Vec3 {
    let angle = axis_angle.length();
    if angle < 1e-9 {
        return v;
    }
    Quat::from_axis_angle(axis_angle / angle, angle) * v
}

/// Wraps an angle into `[-π, π)`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Solid angle of a cone with full opening angle `angle`: `2π(1 − cos(θ/2))`.
#[must_use]
pub fn cone_solid_angle(angle: f32) -> f32 {
    TAU * (1.0 - (angle * 0.5).cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn vec3_approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn straight_down_is_identity() {
        let q = track_quat(Vec3::NEG_Z);
        assert!(vec3_approx(q * Vec3::X, Vec3::X));
        assert!(vec3_approx(q * Vec3::Y, Vec3::Y));
    }

    #[test]
    fn track_keeps_local_y_upright() {
        let dir = Vec3::new(1.0, 2.0, -0.5).normalize();
        let q = track_quat(dir);
        assert!(vec3_approx(q * Vec3::NEG_Z, dir));
        // Local X stays horizontal when Y tracks world up.
        assert!((q * Vec3::X).z.abs() < EPSILON);
        assert!((q * Vec3::Y).z > 0.0);
    }

    #[test]
    fn euler_round_trip() {
        let e = Vec3::new(0.3, -0.4, 1.2);
        let back = euler_from_quat(quat_from_euler(e));
        assert!(vec3_approx(e, back));
    }

    #[test]
    fn euler_matches_host_order() {
        // Rz * Ry * Rx applied to +X with only Z set rotates in the XY plane.
        let e = Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        assert!(vec3_approx(quat_from_euler(e) * Vec3::X, Vec3::Y));
    }

    #[test]
    fn roll_is_recovered() {
        let dir = Vec3::new(-0.3, 0.8, -0.6).normalize();
        for roll in [-2.5_f32, -0.7, 0.0, 0.4, 1.9] {
            let e = aim_euler(dir, roll);
            assert!((roll_from_euler(e) - roll).abs() < 1e-4, "roll {roll}");
        }
    }

    #[test]
    fn wrap_angle_range() {
        assert!((wrap_angle(PI + 0.1) - (-PI + 0.1)).abs() < EPSILON);
        assert!((wrap_angle(-PI - 0.1) - (PI - 0.1)).abs() < EPSILON);
        assert!((wrap_angle(0.5) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn reflect_flips_normal_component() {
        let r = reflect(Vec3::new(1.0, 0.0, -1.0), Vec3::Z);
        assert!(vec3_approx(r, Vec3::new(1.0, 0.0, 1.0)));
    }
}
