//! Light isolation and viewport visibility helpers.

use wrangler_scene::{Host, ObjectId, ReportLevel};

/// Hides every light but `light`, or restores all lights when isolation is
/// already active.
pub fn toggle_isolation<H: Host + ?Sized>(host: &mut H, light: ObjectId) {
    if host.props().is_isolated {
        revert_isolation(host);
        host.report(ReportLevel::Info, "All lights restored");
        return;
    }

    let lights = host.light_ids();
    let states: Vec<(ObjectId, bool)> = lights
        .iter()
        .filter_map(|&id| host.object(id).map(|o| (id, o.hide_viewport)))
        .collect();
    for &id in &lights {
        if let Some(object) = host.object_mut(id) {
            object.hide_viewport = id != light;
        }
    }
    let props = host.props_mut();
    props.isolation_states = states;
    props.is_isolated = true;

    let name = host.object(light).map(|o| o.name.clone()).unwrap_or_default();
    host.report(ReportLevel::Info, &format!("Isolated light: {name}"));
    log::debug!("Isolated light '{name}'");
}

/// Restores the visibility recorded when isolation started.
pub fn revert_isolation<H: Host + ?Sized>(host: &mut H) {
    let props = host.props_mut();
    let states = std::mem::take(&mut props.isolation_states);
    props.is_isolated = false;
    for (id, hidden) in states {
        if let Some(object) = host.object_mut(id) {
            object.hide_viewport = hidden;
        }
    }
}

pub fn toggle_hide<H: Host + ?Sized>(host: &mut H, light: ObjectId) {
    if let Some(object) = host.object_mut(light) {
        object.hide_viewport = !object.hide_viewport;
    }
}

/// Hides gobo volume cubes, returning their previous visibility.
pub fn hide_volume_cubes<H: Host + ?Sized>(host: &mut H) -> Vec<(ObjectId, bool)> {
    let mut states = Vec::new();
    for id in host.object_ids() {
        if let Some(object) = host.object_mut(id)
            && object.is_gobo_volume
        {
            states.push((id, object.hide_viewport));
            object.hide_viewport = true;
        }
    }
    states
}

pub fn restore_volume_cubes<H: Host + ?Sized>(host: &mut H, states: &[(ObjectId, bool)]) {
    for &(id, hidden) in states {
        if let Some(object) = host.object_mut(id) {
            object.hide_viewport = hidden;
        }
    }
}

/// Deletes the volume cubes generated for the light called `light_name`.
pub fn remove_volume_cubes<H: Host + ?Sized>(host: &mut H, light_name: &str) {
    for id in host.object_ids() {
        let owned = host
            .object(id)
            .is_some_and(|o| o.is_gobo_volume && o.volume_parent_light.as_deref() == Some(light_name));
        if owned {
            host.remove_object(id);
        }
    }
}
