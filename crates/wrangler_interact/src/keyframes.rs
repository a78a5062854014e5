//! Auto-keying on finalize.

use wrangler_scene::{Host, LightKind, ObjectId};

/// Data paths keyed for a light of `kind`, in insertion order.
#[must_use]
pub fn keyed_paths(kind: &LightKind, location: bool, rotation: bool) -> Vec<&'static str> {
    let mut paths = Vec::with_capacity(7);
    if location {
        paths.push("location");
    }
    if rotation {
        paths.push("rotation_euler");
    }
    paths.push("data.energy");
    match kind {
        LightKind::Area(area) => {
            paths.push("data.size");
            if area.shape.has_independent_y() {
                paths.push("data.size_y");
            }
            paths.extend(["data.spread", "data.shape"]);
        }
        LightKind::Spot(_) => paths.extend(["data.spot_size", "data.spot_blend"]),
        LightKind::Point(_) | LightKind::Sun(_) => {}
    }
    paths
}

/// Inserts keyframes on the current frame when the scene auto-keys.
/// Returns the number of keys inserted.
pub fn auto_key<H: Host + ?Sized>(host: &mut H, light: ObjectId) -> usize {
    let keying = host.props().keying;
    if !keying.auto_keying {
        return 0;
    }
    let Some(kind) = host.light(light).map(|l| l.data.kind) else {
        return 0;
    };
    let frame = host.props().frame_current;

    let mut inserted = 0;
    for path in keyed_paths(&kind, keying.location, keying.rotation) {
        if keying.only_insert_available && !host.is_animated(light, path) {
            continue;
        }
        host.insert_keyframe(light, path, frame);
        inserted += 1;
    }
    log::debug!("Auto-keyed {inserted} channel(s) on frame {frame}");
    inserted
}
