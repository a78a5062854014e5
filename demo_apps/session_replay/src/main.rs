//! Session Replay
//! Drives one interactive session against the in-memory host and prints
//! what happened.
//!
//! 1. Adds an area light under the cursor (F9)
//! 2. Sweeps the cursor across a floor and a box
//! 3. Scrolls power and size, switches to orbit and drags around
//! 4. Confirms and dumps the light's stored metadata as JSON
//!
//! Run with `RUST_LOG=debug` to see the session log.

use glam::{Vec2, Vec3};
use light_wrangler::hud::{HelpContext, HelpLine, formatted_help};
use light_wrangler::prelude::*;

const REGION: RegionId = RegionId(1);
const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

fn build_scene() -> MemoryHost {
    let view = ViewState::perspective(
        REGION,
        VIEWPORT,
        Vec3::new(6.0, -8.0, 6.0),
        Vec3::ZERO,
        Vec3::Z,
        40.0_f32.to_radians(),
    );
    let mut host = MemoryHost::new().with_floor(0.0).with_view(view);
    host.add_object(
        SceneObject::mesh(
            "Box",
            Collider::Cuboid {
                half_extents: Vec3::splat(0.75),
            },
        )
        .with_location(Vec3::new(1.0, 1.0, 0.75)),
    );
    host
}

fn send(host: &mut MemoryHost, controller: &mut ModalController, event: ModalEvent, clock: &mut f64) -> ModalResult {
    *clock += 1.0 / 60.0;
    host.set_time(*clock);
    let result = controller.handle_event(host, &event.in_region(REGION));
    for stage in [DrawStage::View3d, DrawStage::Overlay2d, DrawStage::Help] {
        if let Some(list) = controller.draw(host, stage, REGION) {
            log::trace!("{stage:?}: {} draw command(s)", list.commands.len());
        }
    }
    result
}

fn describe_light(host: &MemoryHost, id: ObjectId) {
    let Some(object) = host.object(id) else {
        println!("light is gone");
        return;
    };
    let Some(light) = object.as_light() else {
        return;
    };
    println!("{} at {:.3} aiming {:.3}", object.name, object.location, object.forward());
    println!("  energy {:.2} W, {:?}", light.data.energy, light.data.kind);
}

fn print_help(mode: Mode, light_type: LightType, engine: &light_wrangler::scene::RenderEngine) {
    let ctx = HelpContext {
        mode,
        light_type,
        is_paused: false,
        shift: false,
        alt: false,
        ctrl: false,
        engine,
    };
    for line in formatted_help(&ctx) {
        match line {
            HelpLine::Shortcut { key, description } => println!("  {key:<14} {description}"),
            HelpLine::Header(title) => println!("{title}"),
            HelpLine::Blank => println!(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut host = build_scene();
    let mut controller = ModalController::new();
    let mut clock = 0.0;
    let center = VIEWPORT * 0.5;

    let entry = ModalEvent::press(EventKind::F9).at(center);
    if handle_shortcut(&mut host, &mut controller, &entry) != ModalResult::RunningModal {
        anyhow::bail!("could not start a session: {:?}", host.last_report());
    }
    let light = host.active_object().ok_or_else(|| anyhow::anyhow!("no active light after F9"))?;

    // The event that started the session is delivered again and skipped.
    send(&mut host, &mut controller, entry, &mut clock);

    let mut mouse = center;
    for step in 0..20 {
        let next = center + Vec2::new(step as f32 * 12.0, step as f32 * 4.0);
        let event = ModalEvent::mouse_move(mouse).at(next);
        mouse = next;
        send(&mut host, &mut controller, event, &mut clock);
    }
    describe_light(&host, light);

    for _ in 0..4 {
        send(&mut host, &mut controller, ModalEvent::press(EventKind::WheelUp).at(mouse), &mut clock);
    }
    send(&mut host, &mut controller, ModalEvent::press(EventKind::LeftShift).at(mouse), &mut clock);
    for _ in 0..3 {
        send(&mut host, &mut controller, ModalEvent::press(EventKind::WheelDown).at(mouse), &mut clock);
    }
    send(&mut host, &mut controller, ModalEvent::release(EventKind::LeftShift).at(mouse), &mut clock);
    describe_light(&host, light);

    send(&mut host, &mut controller, ModalEvent::press(EventKind::Two).at(mouse), &mut clock);
    for step in 1..=10 {
        let next = mouse + Vec2::new(15.0, 0.0);
        let event = ModalEvent::mouse_move(mouse).at(next);
        mouse = next;
        send(&mut host, &mut controller, event, &mut clock);
        log::debug!("orbit step {step}");
    }
    describe_light(&host, light);

    if let Some(session) = controller.session() {
        print_help(session.mode, session.light_type, &host.props().render_engine);
    }

    let result = send(&mut host, &mut controller, ModalEvent::press(EventKind::LeftMouse).at(mouse), &mut clock);
    println!("session ended: {result:?}");

    if let Some(light) = host.light(light) {
        println!("{}", serde_json::to_string_pretty(&light.metadata)?);
    }
    Ok(())
}
