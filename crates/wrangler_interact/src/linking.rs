//! L / Shift+L: cycling the object under the cursor through a light's
//! receiver or blocker collection.
//!
//! Each press moves the object one step: absent, included, excluded, absent.

use glam::Vec2;
use wrangler_core::{Result, WranglerError};
use wrangler_scene::{Host, LinkRole, LinkState, ObjectId, RAY_DISTANCE, ReportLevel};

use crate::raycast::view_ray;

/// What a link toggle did to the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    Included { first: bool },
    Excluded { only: bool },
    Removed,
}

impl LinkChange {
    #[must_use]
    pub fn message(self, role: LinkRole, object: &str, light: &str) -> String {
        match (self, role) {
            (Self::Included { first: true }, LinkRole::Blocker) => {
                format!("{object} is now the only object that casts shadow from {light}")
            }
            (Self::Included { first: false }, LinkRole::Blocker) => format!("{object} now casts shadow from {light}"),
            (Self::Included { first: true }, LinkRole::Receiver) => {
                format!("{object} is now the only object that receives light from {light}")
            }
            (Self::Included { first: false }, LinkRole::Receiver) => {
                format!("{object} now receives light from {light}")
            }
            (Self::Excluded { only: true }, LinkRole::Blocker) => {
                format!("{object}, the only blocker, no longer casts shadow from {light}")
            }
            (Self::Excluded { only: false }, LinkRole::Blocker) => {
                format!("{object} no longer casts shadow from {light}")
            }
            (Self::Excluded { only: true }, LinkRole::Receiver) => {
                format!("{object}, the only receiver, now ignores light from {light}")
            }
            (Self::Excluded { only: false }, LinkRole::Receiver) => format!("{object} now ignores light from {light}"),
            (Self::Removed, LinkRole::Blocker) => {
                format!("{object} removed from shadow linking collection for {light}")
            }
            (Self::Removed, LinkRole::Receiver) => {
                format!("{object} removed from light linking collection for {light}")
            }
        }
    }
}

fn collection_shared<H: Host + ?Sized>(host: &H, light: ObjectId, role: LinkRole, name: &str) -> bool {
    host.light_ids().into_iter().filter(|&id| id != light).any(|id| {
        host.light(id)
            .and_then(|l| l.linking.collection(role))
            .is_some_and(|c| c.name == name)
    })
}

/// Advances `object` one step in the `role` collection of `light`.
///
/// An emptied collection that no other light uses is dropped.
pub fn cycle_link<H: Host + ?Sized>(host: &mut H, light: ObjectId, object: ObjectId, role: LinkRole) -> Result<LinkChange> {
    let light_name = host
        .object(light)
        .map(|o| o.name.clone())
        .ok_or_else(|| WranglerError::ObjectNotFound(format!("{light:?}")))?;
    let linking = &mut host
        .light_mut(light)
        .ok_or_else(|| WranglerError::NotALight(light_name.clone()))?
        .linking;

    let collection = linking.ensure(role, &light_name);
    let change = match collection.state_of(object) {
        None => {
            let first = collection.is_empty();
            collection.set(object, LinkState::Include);
            LinkChange::Included { first }
        }
        Some(LinkState::Include) => {
            let only = collection.members.len() == 1;
            collection.set(object, LinkState::Exclude);
            LinkChange::Excluded { only }
        }
        Some(LinkState::Exclude) => {
            collection.remove(object);
            LinkChange::Removed
        }
    };

    let emptied = collection.is_empty().then(|| collection.name.clone());
    if let Some(name) = emptied
        && !collection_shared(host, light, role, &name)
        && let Some(light) = host.light_mut(light)
    {
        *light.linking.collection_mut(role) = None;
        log::debug!("Dropped empty linking collection '{name}'");
    }
    Ok(change)
}

/// Handles L / Shift+L at `mouse` (window coordinates), reporting the result
/// to the user.
pub fn link_object_under_cursor<H: Host + ?Sized>(host: &mut H, light: ObjectId, mouse: Vec2, role: LinkRole) {
    let engine = host.props().render_engine.clone();
    if !engine.supports_light_linking() {
        host.report(
            ReportLevel::Warning,
            "Light linking is only available in Cycles or EEVEE Next render engine",
        );
        return;
    }

    let hit_object = host.view().and_then(|view| {
        let (origin, direction) = view_ray(view, view.window_to_region(mouse));
        host.ray_cast(origin, direction, RAY_DISTANCE)
    });
    let Some(object) = hit_object.and_then(|hit| hit.object).filter(|&id| id != light) else {
        host.report(ReportLevel::Warning, "No object under mouse or no active light");
        return;
    };

    match cycle_link(host, light, object, role) {
        Ok(change) => {
            let object_name = host.object(object).map(|o| o.name.clone()).unwrap_or_default();
            let light_name = host.object(light).map(|o| o.name.clone()).unwrap_or_default();
            host.report(ReportLevel::Info, &change.message(role, &object_name, &light_name));
        }
        Err(err) => {
            log::warn!("Light linking failed: {err}");
            host.report(ReportLevel::Error, &err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrangler_scene::{Collider, Light, LightData, LightKind, LightType, MemoryHost, SceneObject};

    fn scene() -> (MemoryHost, ObjectId, ObjectId) {
        let mut host = MemoryHost::new();
        let light = host.add_object(SceneObject::light(
            "Key",
            Light::new(LightData::new(LightKind::default_for(LightType::Area), 10.0)),
        ));
        let cube = host.add_object(SceneObject::mesh(
            "Cube",
            Collider::Sphere { radius: 1.0 },
        ));
        (host, light, cube)
    }

    #[test]
    fn cycle_through_states() {
        let (mut host, light, cube) = scene();
        assert_eq!(
            cycle_link(&mut host, light, cube, LinkRole::Receiver).unwrap(),
            LinkChange::Included { first: true }
        );
        assert_eq!(
            cycle_link(&mut host, light, cube, LinkRole::Receiver).unwrap(),
            LinkChange::Excluded { only: true }
        );
        assert_eq!(cycle_link(&mut host, light, cube, LinkRole::Receiver).unwrap(), LinkChange::Removed);
        assert!(host.light(light).unwrap().linking.receivers.is_none());
    }

    #[test]
    fn messages_follow_role() {
        let msg = LinkChange::Included { first: false }.message(LinkRole::Blocker, "Cube", "Key");
        assert_eq!(msg, "Cube now casts shadow from Key");
        let msg = LinkChange::Removed.message(LinkRole::Receiver, "Cube", "Key");
        assert_eq!(msg, "Cube removed from light linking collection for Key");
    }

    #[test]
    fn unsupported_engine_warns() {
        let (mut host, light, _) = scene();
        host.props_mut().render_engine = wrangler_scene::RenderEngine::Workbench;
        link_object_under_cursor(&mut host, light, Vec2::ZERO, LinkRole::Receiver);
        let (level, message) = host.last_report().unwrap();
        assert_eq!(*level, ReportLevel::Warning);
        assert!(message.starts_with("Light linking is only available"));
    }
}
