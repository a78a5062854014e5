//! In-memory reference host.
//!
//! [`MemoryHost`] keeps objects in a [`SlotMap`], answers ray casts against
//! simple colliders and records every UI side effect so callers can inspect
//! them afterwards.

use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use crate::host::{CursorStyle, DrawHandle, DrawStage, Host, RayHit, ReportLevel};
use crate::object::{Collider, ObjectData, ObjectId, SceneObject};
use crate::prefs::Preferences;
use crate::props::SceneProps;
use crate::view::ViewState;

/// A keyframe recorded by [`Host::insert_keyframe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyframe {
    pub object: ObjectId,
    pub path: String,
    pub frame: i32,
}

#[derive(Debug, Clone)]
pub struct MemoryHost {
    objects: SlotMap<ObjectId, SceneObject>,
    order: Vec<ObjectId>,
    active: Option<ObjectId>,
    view: Option<ViewState>,
    props: SceneProps,
    prefs: Preferences,
    clock: f64,
    theme_accent: Vec3,

    next_handle: u64,
    draw_handlers: FxHashMap<DrawHandle, DrawStage>,
    animated: FxHashSet<(ObjectId, String)>,

    pub reports: Vec<(ReportLevel, String)>,
    pub keyframes: Vec<Keyframe>,
    pub status_text: Option<String>,
    pub cursor: CursorStyle,
    pub redraw_count: usize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            order: Vec::new(),
            active: None,
            view: None,
            props: SceneProps::default(),
            prefs: Preferences::default(),
            clock: 0.0,
            theme_accent: Vec3::new(1.0, 0.627, 0.157),
            next_handle: 1,
            draw_handlers: FxHashMap::default(),
            animated: FxHashSet::default(),
            reports: Vec::new(),
            keyframes: Vec::new(),
            status_text: None,
            cursor: CursorStyle::Default,
            redraw_count: 0,
        }
    }

    /// Adds an infinite floor plane at `z`.
    #[must_use]
    pub fn with_floor(mut self, z: f32) -> Self {
        self.add_object(
            SceneObject::mesh("Floor", Collider::Plane { normal: Vec3::Z }).with_location(Vec3::new(0.0, 0.0, z)),
        );
        self
    }

    #[must_use]
    pub fn with_view(mut self, view: ViewState) -> Self {
        self.view = Some(view);
        self
    }

    #[must_use]
    pub fn with_preferences(mut self, prefs: Preferences) -> Self {
        self.prefs = prefs;
        self
    }

    pub fn set_view(&mut self, view: Option<ViewState>) {
        self.view = view;
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.prefs
    }

    pub fn set_time(&mut self, seconds: f64) {
        self.clock = seconds;
    }

    pub fn advance(&mut self, seconds: f64) {
        self.clock += seconds;
    }

    /// Marks a data path as animated so "only insert available" keys it.
    pub fn mark_animated(&mut self, id: ObjectId, path: &str) {
        self.animated.insert((id, path.to_string()));
    }

    #[must_use]
    pub fn draw_handler_count(&self) -> usize {
        self.draw_handlers.len()
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&(ReportLevel, String)> {
        self.reports.last()
    }

    fn unique_name(&self, base: &str) -> String {
        let taken = |name: &str| self.objects.values().any(|o| o.name == name);
        if !taken(base) {
            return base.to_string();
        }
        (1..)
            .map(|i| format!("{base}.{i:03}"))
            .find(|name| !taken(name))
            .unwrap_or_else(|| base.to_string())
    }
}

// ============================================================================
// Collider Intersection
// ============================================================================

fn intersect(collider: &Collider, center: Vec3, origin: Vec3, dir: Vec3) -> Option<(f32, Vec3)> {
    match *collider {
        Collider::Plane { normal } => {
            let n = normal.try_normalize()?;
            let denom = dir.dot(n);
            if denom.abs() < 1e-8 {
                return None;
            }
            let t = (center - origin).dot(n) / denom;
            (t > 0.0).then_some((t, n))
        }
        Collider::Sphere { radius } => {
            let oc = origin - center;
            let b = oc.dot(dir);
            let c = oc.length_squared() - radius * radius;
            let disc = b * b - c;
            if disc < 0.0 {
                return None;
            }
            let t = -b - disc.sqrt();
            if t <= 0.0 {
                return None;
            }
            Some((t, (origin + dir * t - center).normalize_or_zero()))
        }
        Collider::Cuboid { half_extents } => {
            let min = center - half_extents;
            let max = center + half_extents;
            let mut t_enter = f32::NEG_INFINITY;
            let mut t_exit = f32::INFINITY;
            let mut normal = Vec3::ZERO;
            for axis in 0..3 {
                if dir[axis].abs() < 1e-8 {
                    if origin[axis] < min[axis] || origin[axis] > max[axis] {
                        return None;
                    }
                    continue;
                }
                let inv = 1.0 / dir[axis];
                let (mut t0, mut t1) = ((min[axis] - origin[axis]) * inv, (max[axis] - origin[axis]) * inv);
                let mut face = Vec3::ZERO;
                face[axis] = -dir[axis].signum();
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                if t0 > t_enter {
                    t_enter = t0;
                    normal = face;
                }
                t_exit = t_exit.min(t1);
            }
            (t_enter <= t_exit && t_enter > 0.0).then_some((t_enter, normal))
        }
    }
}

// ============================================================================
// Host Implementation
// ============================================================================

impl Host for MemoryHost {
    fn ray_cast(&self, origin: Vec3, direction: Vec3, distance: f32) -> Option<RayHit> {
        let dir = direction.try_normalize()?;
        self.order
            .iter()
            .filter_map(|&id| {
                let object = self.objects.get(id)?;
                if object.hide_viewport {
                    return None;
                }
                let ObjectData::Mesh(collider) = &object.data else {
                    return None;
                };
                let (t, normal) = intersect(collider, object.location, origin, dir)?;
                (t <= distance).then_some((t, id, normal))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(t, id, normal)| RayHit {
                point: origin + dir * t,
                normal,
                object: Some(id),
            })
    }

    fn view(&self) -> Option<&ViewState> {
        self.view.as_ref()
    }

    fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    fn add_object(&mut self, mut object: SceneObject) -> ObjectId {
        object.name = self.unique_name(&object.name);
        let id = self.objects.insert(object);
        self.order.push(id);
        id
    }

    fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let removed = self.objects.remove(id)?;
        self.order.retain(|&o| o != id);
        if self.active == Some(id) {
            self.active = None;
        }
        log::debug!("Removed object '{}'", removed.name);
        Some(removed)
    }

    fn object_ids(&self) -> Vec<ObjectId> {
        self.order.clone()
    }

    fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    fn set_active_object(&mut self, id: Option<ObjectId>) {
        self.active = id;
    }

    fn props(&self) -> &SceneProps {
        &self.props
    }

    fn props_mut(&mut self) -> &mut SceneProps {
        &mut self.props
    }

    fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    fn now(&self) -> f64 {
        self.clock
    }

    fn report(&mut self, level: ReportLevel, message: &str) {
        self.reports.push((level, message.to_string()));
    }

    fn tag_redraw(&mut self) {
        self.redraw_count += 1;
    }

    fn set_cursor(&mut self, style: CursorStyle) {
        self.cursor = style;
    }

    fn set_status_text(&mut self, text: Option<String>) {
        self.status_text = text;
    }

    fn add_draw_handler(&mut self, stage: DrawStage) -> DrawHandle {
        let handle = DrawHandle(self.next_handle);
        self.next_handle += 1;
        self.draw_handlers.insert(handle, stage);
        handle
    }

    fn remove_draw_handler(&mut self, handle: DrawHandle) {
        self.draw_handlers.remove(&handle);
    }

    fn theme_accent(&self) -> Vec3 {
        self.theme_accent
    }

    fn set_theme_accent(&mut self, color: Vec3) {
        self.theme_accent = color;
    }

    fn is_animated(&self, id: ObjectId, path: &str) -> bool {
        self.animated.contains(&(id, path.to_string()))
    }

    fn insert_keyframe(&mut self, id: ObjectId, path: &str, frame: i32) {
        self.keyframes.push(Keyframe {
            object: id,
            path: path.to_string(),
            frame,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_hit_from_above() {
        let host = MemoryHost::new().with_floor(0.0);
        let hit = host.ray_cast(Vec3::new(1.0, 2.0, 5.0), Vec3::NEG_Z, 100.0).unwrap();
        assert!((hit.point - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn nearest_collider_wins() {
        let mut host = MemoryHost::new().with_floor(0.0);
        host.add_object(
            SceneObject::mesh(
                "Box",
                Collider::Cuboid {
                    half_extents: Vec3::splat(0.5),
                },
            )
            .with_location(Vec3::new(0.0, 0.0, 0.5)),
        );
        let hit = host.ray_cast(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, 100.0).unwrap();
        assert!((hit.point.z - 1.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn hidden_objects_are_ignored() {
        let mut host = MemoryHost::new().with_floor(0.0);
        let floor = host.object_ids()[0];
        host.object_mut(floor).unwrap().hide_viewport = true;
        assert!(host.ray_cast(Vec3::Z, Vec3::NEG_Z, 100.0).is_none());
    }

    #[test]
    fn names_are_made_unique() {
        let mut host = MemoryHost::new();
        let a = host.add_object(SceneObject::empty("Target"));
        let b = host.add_object(SceneObject::empty("Target"));
        assert_eq!(host.object(a).unwrap().name, "Target");
        assert_eq!(host.object(b).unwrap().name, "Target.001");
    }
}
