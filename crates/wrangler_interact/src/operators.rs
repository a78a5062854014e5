//! Entry operators: add a light and start placing it, or start placing the
//! active light.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use wrangler_core::{Result, WranglerError};
use wrangler_scene::{
    AreaParams, AreaShape, Host, Light, LightData, LightKind, LightMetadata, LightType, Mode, ObjectId, PointParams,
    ReportLevel, SceneObject, SpotParams, SunParams,
};

use crate::controller::{InvokeOptions, ModalController, ModalResult};
use crate::input::{EventKind, ModalEvent};

/// New lights appear here before the first raycast moves them.
pub const SPAWN_LOCATION: Vec3 = Vec3::new(0.0, 0.0, 9.0);
pub const LIGHTS_COLLECTION: &str = "Lights";

const SUN_ENERGY: f32 = 1.0;
const SUN_ANGLE_DEG: f32 = 0.526;

fn default_name(light_type: LightType) -> &'static str {
    match light_type {
        LightType::Area => "Area",
        LightType::Point => "Point",
        LightType::Spot => "Spot",
        LightType::Sun => "Sun",
    }
}

/// Emission data for a freshly added light, sized from the preferences.
#[must_use]
pub fn new_light_data(light_type: LightType, initial_power: f32, initial_size: f32) -> LightData {
    match light_type {
        LightType::Area => LightData::new(
            LightKind::Area(AreaParams {
                shape: AreaShape::Square,
                size_x: initial_size,
                size_y: initial_size,
                spread: PI,
            }),
            initial_power,
        ),
        LightType::Point => LightData::new(LightKind::Point(PointParams { shadow_soft_size: 0.0 }), initial_power),
        LightType::Spot => LightData::new(
            LightKind::Spot(SpotParams {
                spot_size: 45.0_f32.to_radians(),
                spot_blend: 0.15,
            }),
            initial_power,
        ),
        LightType::Sun => LightData::new(
            LightKind::Sun(SunParams {
                angle: SUN_ANGLE_DEG.to_radians(),
            }),
            SUN_ENERGY,
        ),
    }
}

/// Adds a light of `light_type` and immediately starts a REFLECT session on
/// it at `mouse`. The light is removed again if the session cannot start.
pub fn add_interactive_light<H: Host + ?Sized>(
    host: &mut H,
    controller: &mut ModalController,
    light_type: LightType,
    mouse: Vec2,
) -> Result<ObjectId> {
    if controller.is_active() {
        return Err(WranglerError::SessionAlreadyActive);
    }
    if host.view().is_none() {
        let err = WranglerError::InvalidRegion;
        host.report(ReportLevel::Warning, &err.to_string());
        return Err(err);
    }

    let prefs = host.preferences().clone();
    let mut light = Light::new(new_light_data(
        light_type,
        prefs.initial_light_power,
        prefs.initial_light_size,
    ));
    light.metadata = LightMetadata {
        last_offset: Some(prefs.initial_light_distance),
        last_mode: Some(Mode::Reflect),
        last_pause_state: Some(false),
        newly_created: true,
        ..LightMetadata::default()
    };

    let mut object = SceneObject::light(default_name(light_type), light).with_location(SPAWN_LOCATION);
    if prefs.organize_lights {
        object.collections.push(LIGHTS_COLLECTION.to_string());
    }
    let id = host.add_object(object);
    host.set_active_object(Some(id));
    log::info!("Added {} light", light_type.as_str());

    if let Err(err) = controller.invoke(host, InvokeOptions::at(mouse).with_mode(Mode::Reflect)) {
        host.remove_object(id);
        return Err(err);
    }
    Ok(id)
}

/// Starts a session on the active light.
pub fn interactive_mode<H: Host + ?Sized>(
    host: &mut H,
    controller: &mut ModalController,
    options: InvokeOptions,
) -> Result<()> {
    controller.invoke(host, options)
}

/// Keyboard entry points outside a session: TAB adjusts the active light,
/// F9 adds an area light. Returns `PassThrough` for anything else.
pub fn handle_shortcut<H: Host + ?Sized>(
    host: &mut H,
    controller: &mut ModalController,
    event: &ModalEvent,
) -> ModalResult {
    if controller.is_active() || !event.is_press() {
        return ModalResult::PassThrough;
    }
    let started = match event.kind {
        EventKind::Tab => interactive_mode(host, controller, InvokeOptions::at(event.mouse).from_tab()).is_ok(),
        EventKind::F9 => add_interactive_light(host, controller, LightType::Area, event.mouse).is_ok(),
        _ => return ModalResult::PassThrough,
    };
    if started {
        ModalResult::RunningModal
    } else {
        ModalResult::Cancelled
    }
}
