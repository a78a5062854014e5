//! Placement of the viewport gizmo that re-enters interactive mode.
//!
//! The gizmo sits on the point the light aims at. While a session runs the
//! stored `target` is authoritative. Afterwards it is only trusted while the
//! light still points at it; otherwise the gizmo finds its own target.

use glam::Vec3;
use wrangler_scene::{Host, LightType, Mode, ObjectId, RAY_DISTANCE};

/// Offset used when nothing is hit and the light has no stored offset.
pub const GIZMO_FALLBACK_OFFSET: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoShape {
    /// Hollow ring, REFLECT.
    Ring,
    /// Filled disc, DIRECT.
    Disk,
    /// Rotation dial, ORBIT.
    Dial,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoStyle {
    pub shape: GizmoShape,
    pub align_view: bool,
    pub scale_basis: f32,
}

impl GizmoStyle {
    #[must_use]
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Reflect => Self {
                shape: GizmoShape::Ring,
                align_view: true,
                scale_basis: 0.055,
            },
            Mode::Direct => Self {
                shape: GizmoShape::Disk,
                align_view: true,
                scale_basis: 0.055,
            },
            Mode::Orbit => Self {
                shape: GizmoShape::Dial,
                align_view: false,
                scale_basis: 0.12,
            },
        }
    }
}

/// Where the gizmo location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource {
    Session,
    Stored,
    Raycast,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoPlacement {
    pub location: Vec3,
    pub style: GizmoStyle,
    pub source: TargetSource,
}

/// Resolves the gizmo for light `id`. Point lights have no gizmo.
#[must_use]
pub fn resolve_gizmo<H: Host + ?Sized>(host: &H, id: ObjectId) -> Option<GizmoPlacement> {
    let object = host.object(id)?;
    let light = object.as_light()?;
    if light.light_type() == LightType::Point {
        return None;
    }
    let meta = &light.metadata;
    let style = GizmoStyle::for_mode(meta.mode());
    let forward = object.forward();
    let place = |location, source| GizmoPlacement { location, style, source };

    if let Some(target) = meta.target {
        if host.props().is_interactive_mode_active {
            return Some(place(target, TargetSource::Session));
        }
        if let Some(to_target) = (target - object.location).try_normalize() {
            let angle = forward.dot(to_target).clamp(-1.0, 1.0).acos();
            if angle.to_degrees() <= host.preferences().gizmo_target_tolerance_deg {
                return Some(place(target, TargetSource::Stored));
            }
        }
    }

    if let Some(hit) = host.ray_cast(object.location, forward, RAY_DISTANCE) {
        return Some(place(hit.point, TargetSource::Raycast));
    }
    let offset = meta.last_offset.unwrap_or(GIZMO_FALLBACK_OFFSET);
    Some(place(object.location + forward * offset, TargetSource::Fallback))
}
