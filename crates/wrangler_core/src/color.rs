//! Theme color helpers.

use glam::Vec3;

/// Rec. 709 relative luminance.
#[must_use]
pub fn luminance(color: Vec3) -> f32 {
    color.dot(Vec3::new(0.2126, 0.7152, 0.0722))
}

/// Tint used for the active-object outline while positioning is paused:
/// the accent desaturated by half and lightened 30% toward white.
#[must_use]
pub fn paused_tint(accent: Vec3) -> Vec3 {
    let grey = Vec3::splat(luminance(accent));
    accent.lerp(grey, 0.5).lerp(Vec3::ONE, 0.3)
}
