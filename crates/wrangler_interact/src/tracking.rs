//! Track-to constraints removed while a light is edited.
//!
//! A constrained light cannot be moved freely, so the session strips its
//! constraints on entry and puts them back on cancel. A target empty that
//! nothing else references is deleted with the constraints and rebuilt from
//! the record if the session is cancelled.

use glam::Vec3;
use wrangler_core::math::aim_euler;
use wrangler_scene::{EmptyDisplay, Host, ObjectData, ObjectId, SceneObject, TrackConstraint};

/// Enough of the target object to rebuild it.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRecord {
    pub id: ObjectId,
    pub name: String,
    pub location: Vec3,
    pub rotation_euler: Vec3,
    pub scale: Vec3,
    /// Display type when the target is an empty.
    pub display: Option<EmptyDisplay>,
    pub collections: Vec<String>,
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingRecord {
    pub constraints: Vec<TrackConstraint>,
    pub target: Option<TargetRecord>,
}

fn is_referenced_elsewhere<H: Host + ?Sized>(host: &H, target: ObjectId, owner: ObjectId) -> bool {
    host.object_ids().into_iter().filter(|&id| id != owner).any(|id| {
        host.object(id)
            .is_some_and(|o| o.constraints.iter().any(|c| c.target == Some(target)))
    })
}

/// Strips the track-to constraints of `light`, keeping its orientation
/// aimed at the old target. Returns `None` when there was nothing to strip.
pub fn clear_tracking<H: Host + ?Sized>(host: &mut H, light: ObjectId) -> Option<TrackingRecord> {
    let object = host.object(light)?;
    if object.constraints.is_empty() {
        return None;
    }
    let constraints = object.constraints.clone();
    let light_location = object.location;

    let target = constraints
        .iter()
        .find_map(|c| c.target)
        .and_then(|id| host.object(id).map(|t| (id, t)))
        .map(|(id, t)| TargetRecord {
            id,
            name: t.name.clone(),
            location: t.location,
            rotation_euler: t.rotation_euler,
            scale: t.scale,
            display: match t.data {
                ObjectData::Empty(display) => Some(display),
                _ => None,
            },
            collections: t.collections.clone(),
            deleted: false,
        });

    if let Some(object) = host.object_mut(light) {
        object.constraints.clear();
        if let Some(target) = &target {
            object.rotation_euler = aim_euler(target.location - light_location, 0.0);
        }
    }

    let target = target.map(|mut record| {
        if record.display.is_some() && !is_referenced_elsewhere(host, record.id, light) {
            host.remove_object(record.id);
            record.deleted = true;
            log::debug!("Removed unused tracking target '{}'", record.name);
        }
        record
    });

    log::debug!("Cleared {} tracking constraint(s)", constraints.len());
    Some(TrackingRecord { constraints, target })
}

/// Puts the recorded constraints back on `light`, rebuilding the target
/// empty when it no longer exists.
pub fn restore_tracking<H: Host + ?Sized>(host: &mut H, light: ObjectId, record: &TrackingRecord) {
    let mut remap: Option<(ObjectId, ObjectId)> = None;
    if let Some(target) = &record.target
        && host.object(target.id).is_none()
    {
        if !target.deleted {
            log::warn!("Tracking target '{}' disappeared during the session, recreating it", target.name);
        }
        let mut empty = SceneObject::new(
            target.name.clone(),
            ObjectData::Empty(target.display.unwrap_or_default()),
        );
        empty.location = target.location;
        empty.rotation_euler = target.rotation_euler;
        empty.scale = target.scale;
        empty.collections = target.collections.clone();
        remap = Some((target.id, host.add_object(empty)));
    }

    let constraints = record
        .constraints
        .iter()
        .cloned()
        .map(|mut c| {
            if let Some((old, new)) = remap
                && c.target == Some(old)
            {
                c.target = Some(new);
            }
            c
        })
        .collect();
    match host.object_mut(light) {
        Some(object) => object.constraints = constraints,
        None => log::warn!("Cannot restore tracking: light is gone"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrangler_core::math::forward_from_euler;
    use wrangler_scene::{Light, LightData, LightKind, LightType, MemoryHost};

    fn tracked_scene() -> (MemoryHost, ObjectId, ObjectId) {
        let mut host = MemoryHost::new();
        let target = host.add_object(SceneObject::empty("Target").with_location(Vec3::new(0.0, 0.0, 0.0)));
        let mut light = SceneObject::light(
            "Key",
            Light::new(LightData::new(LightKind::default_for(LightType::Spot), 10.0)),
        )
        .with_location(Vec3::new(0.0, -4.0, 3.0));
        light.constraints.push(TrackConstraint {
            name: "Track To".to_string(),
            target: Some(target),
            track_axis: Default::default(),
            up_axis: Default::default(),
        });
        let light = host.add_object(light);
        (host, light, target)
    }

    #[test]
    fn clearing_keeps_aim_and_deletes_unused_empty() {
        let (mut host, light, target) = tracked_scene();
        let record = clear_tracking(&mut host, light).unwrap();
        assert!(host.object(target).is_none());
        assert!(record.target.as_ref().unwrap().deleted);
        let object = host.object(light).unwrap();
        assert!(object.constraints.is_empty());
        let expected = Vec3::new(0.0, 4.0, -3.0).normalize();
        assert!((forward_from_euler(object.rotation_euler) - expected).length() < 1e-4);
    }

    #[test]
    fn restore_rebuilds_target() {
        let (mut host, light, _) = tracked_scene();
        let record = clear_tracking(&mut host, light).unwrap();
        restore_tracking(&mut host, light, &record);
        let new_target = host.object(light).unwrap().constraints[0].target.unwrap();
        let rebuilt = host.object(new_target).unwrap();
        assert_eq!(rebuilt.name, "Target");
        assert_eq!(rebuilt.location, Vec3::ZERO);
    }

    #[test]
    fn shared_target_survives() {
        let (mut host, light, target) = tracked_scene();
        let mut other = SceneObject::empty("Other");
        other.constraints = host.object(light).unwrap().constraints.clone();
        host.add_object(other);
        let record = clear_tracking(&mut host, light).unwrap();
        assert!(host.object(target).is_some());
        assert!(!record.target.unwrap().deleted);
    }
}
