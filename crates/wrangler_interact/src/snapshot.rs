//! Pre-session state of the edited light, restored on cancel.

use glam::Vec3;
use wrangler_scene::{LightData, LightKind, LightLinking, LightMetadata, LightType, SceneObject};

#[derive(Debug, Clone, PartialEq)]
pub struct LightStateSnapshot {
    pub name: String,
    pub location: Vec3,
    pub rotation_euler: Vec3,
    pub data: LightData,
    pub metadata: LightMetadata,
    pub linking: LightLinking,
    pub hide_viewport: bool,
}

impl LightStateSnapshot {
    /// Captures `object`, `None` when it is not a light.
    #[must_use]
    pub fn capture(object: &SceneObject) -> Option<Self> {
        let light = object.as_light()?;
        Some(Self {
            name: object.name.clone(),
            location: object.location,
            rotation_euler: object.rotation_euler,
            data: light.data.clone(),
            metadata: light.metadata.clone(),
            linking: light.linking.clone(),
            hide_viewport: object.hide_viewport,
        })
    }

    #[must_use]
    pub fn light_type(&self) -> LightType {
        self.data.light_type()
    }

    /// Writes transform, emission and variant parameters back onto `object`.
    ///
    /// Variant parameters are only restored when `object` still has the
    /// captured light type. Linking is left alone; it has its own revert.
    pub fn restore_onto(&self, object: &mut SceneObject) {
        object.location = self.location;
        object.rotation_euler = self.rotation_euler;
        let Some(light) = object.as_light_mut() else {
            return;
        };
        light.data.energy = self.data.energy;
        light.data.color = self.data.color;
        if light.data.light_type() == self.light_type() {
            light.data.kind = self.data.kind;
        }
        light.metadata = self.metadata.clone();
    }

    /// Variant parameters of the captured light.
    #[must_use]
    pub fn kind(&self) -> LightKind {
        self.data.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrangler_scene::{Light, Mode};

    #[test]
    fn restore_resets_everything_but_linking() {
        let mut light = Light::new(LightData::new(LightKind::default_for(LightType::Spot), 50.0));
        light.metadata.last_mode = Some(Mode::Orbit);
        let mut object = SceneObject::light("Spot", light).with_location(Vec3::new(1.0, 2.0, 3.0));
        let snapshot = LightStateSnapshot::capture(&object).unwrap();

        object.location = Vec3::ZERO;
        let edited = object.as_light_mut().unwrap();
        edited.data.energy = 5.0;
        edited.metadata.last_mode = None;
        edited.metadata.target = Some(Vec3::ONE);
        if let LightKind::Spot(spot) = &mut edited.data.kind {
            spot.spot_blend = 1.0;
        }

        snapshot.restore_onto(&mut object);
        assert_eq!(object.location, Vec3::new(1.0, 2.0, 3.0));
        let restored = object.as_light().unwrap();
        assert_eq!(restored.data, snapshot.data);
        assert_eq!(restored.metadata.last_mode, Some(Mode::Orbit));
        assert_eq!(restored.metadata.target, None);
    }
}
