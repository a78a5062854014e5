//! HUD tests
//!
//! Tests for:
//! - Value panel after wheel edits and hover delays
//! - Help panel toggling and fade
//! - Orbit visualization per mode
//! - Status bar and help content
//! - Gizmo placement outside a session

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use light_wrangler::core::math::aim_euler;
use light_wrangler::hud::panel::TOOLTIP_DELAY;
use light_wrangler::hud::renderer::HELP_FADE_DURATION;
use light_wrangler::hud::{
    DrawCommand, DrawList, HelpContext, HelpLine, TargetSource, Topology, formatted_help, help_sections,
    resolve_gizmo, status_bar_text,
};
use light_wrangler::interact::{EventKind, InvokeOptions, ModalController, ModalEvent, Modifiers};
use light_wrangler::scene::{
    AreaParams, AreaShape, DrawStage, Host, Light, LightData, LightKind, LightType, MemoryHost, Mode, ObjectId,
    RegionId, RenderEngine, SceneObject, ViewState,
};

// ============================================================================
// Helper
// ============================================================================

const REGION: RegionId = RegionId(3);
const MOUSE: Vec2 = Vec2::new(150.0, 150.0);

fn scene() -> (MemoryHost, ObjectId) {
    let view = ViewState::perspective(
        REGION,
        Vec2::new(300.0, 300.0),
        Vec3::new(0.0, -6.0, 6.0),
        Vec3::ZERO,
        Vec3::Z,
        50.0_f32.to_radians(),
    );
    let mut host = MemoryHost::new().with_floor(0.0).with_view(view);
    let kind = LightKind::Area(AreaParams {
        shape: AreaShape::Square,
        size_x: 1.0,
        size_y: 1.0,
        spread: PI,
    });
    let id = host.add_object(
        SceneObject::light("Key", Light::new(LightData::new(kind, 250.0))).with_location(Vec3::new(0.0, 0.0, 3.0)),
    );
    host.set_active_object(Some(id));
    (host, id)
}

fn started(host: &mut MemoryHost) -> ModalController {
    let mut controller = ModalController::new();
    controller.invoke(host, InvokeOptions::at(MOUSE)).expect("session starts");
    controller.handle_event(host, &ModalEvent::mouse_move(MOUSE).in_region(REGION));
    controller
}

fn press(controller: &mut ModalController, host: &mut MemoryHost, kind: EventKind) {
    controller.handle_event(host, &ModalEvent::press(kind).at(MOUSE).in_region(REGION));
}

fn texts(list: &DrawList) -> Vec<String> {
    list.texts().map(str::to_string).collect()
}

/// Vertex count of the longest line strip, which is the orbit ring when one is drawn.
fn longest_strip(list: &DrawList) -> usize {
    list.commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Lines3d {
                topology: Topology::LineStrip,
                vertices,
                ..
            } => Some(vertices.len()),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

fn help_ctx(engine: &RenderEngine, light_type: LightType, shift: bool, alt: bool) -> HelpContext<'_> {
    HelpContext {
        mode: Mode::Reflect,
        light_type,
        is_paused: false,
        shift,
        alt,
        ctrl: false,
        engine,
    }
}

// ============================================================================
// Value Panel
// ============================================================================

#[test]
fn panel_shows_power_after_wheel() {
    let (mut host, _) = scene();
    let mut controller = started(&mut host);
    assert!(controller.draw(&host, DrawStage::Overlay2d, REGION).unwrap().is_empty());

    press(&mut controller, &mut host, EventKind::WheelUp);
    let panel = controller.draw(&host, DrawStage::Overlay2d, REGION).unwrap();
    assert!(texts(&panel).iter().any(|t| t.ends_with(" W")));
}

#[test]
fn hover_tooltip_waits_for_delay() {
    let (mut host, _) = scene();
    let mut controller = started(&mut host);
    press(&mut controller, &mut host, EventKind::LeftAlt);

    let early = controller.draw(&host, DrawStage::Overlay2d, REGION).unwrap();
    assert!(early.is_empty());

    host.advance(TOOLTIP_DELAY + 0.01);
    let late = controller.draw(&host, DrawStage::Overlay2d, REGION).unwrap();
    assert!(texts(&late).iter().any(|t| t.starts_with("Distance")));
}

#[test]
fn modifier_release_clears_panel() {
    let (mut host, _) = scene();
    let mut controller = started(&mut host);
    press(&mut controller, &mut host, EventKind::LeftShift);
    press(&mut controller, &mut host, EventKind::WheelUp);
    assert!(!controller.draw(&host, DrawStage::Overlay2d, REGION).unwrap().is_empty());

    controller.handle_event(&mut host, &ModalEvent::release(EventKind::LeftShift).in_region(REGION));
    assert!(controller.draw(&host, DrawStage::Overlay2d, REGION).unwrap().is_empty());
}

// ============================================================================
// Help Panel
// ============================================================================

#[test]
fn q_toggles_help_with_fade() {
    let (mut host, _) = scene();
    let mut controller = started(&mut host);
    let closed = controller.draw(&host, DrawStage::Help, REGION).unwrap();
    assert_eq!(texts(&closed), vec!["Controls [Q]".to_string()]);

    press(&mut controller, &mut host, EventKind::Q);
    assert!(host.props().show_help);
    host.advance(HELP_FADE_DURATION * 2.0);
    let open = texts(&controller.draw(&host, DrawStage::Help, REGION).unwrap());
    assert!(open.contains(&"Hide Controls".to_string()));
    assert!(!open.contains(&"Controls [Q]".to_string()));
}

#[test]
fn help_marks_current_mode() {
    let engine = RenderEngine::Cycles;
    let lines = formatted_help(&help_ctx(&engine, LightType::Area, false, false));
    assert!(lines.iter().any(|line| matches!(
        line,
        HelpLine::Shortcut { key, description } if key == "1" && description == "→ Pause"
    )));
    assert!(lines.iter().any(|line| matches!(
        line,
        HelpLine::Shortcut { key, description } if key == "2" && description == "Orbit Mode"
    )));
}

#[test]
fn linking_section_depends_on_engine() {
    let cycles = RenderEngine::Cycles;
    let workbench = RenderEngine::Workbench;
    let with = help_sections(&help_ctx(&cycles, LightType::Spot, false, false));
    let without = help_sections(&help_ctx(&workbench, LightType::Spot, false, false));
    assert_eq!(with.len(), without.len() + 1);
}

#[test]
fn status_bar_hints_axis() {
    let engine = RenderEngine::Cycles;
    assert!(status_bar_text(&help_ctx(&engine, LightType::Area, true, true)).starts_with("Size X"));
    assert!(!status_bar_text(&help_ctx(&engine, LightType::Spot, true, true)).starts_with("Size X"));
}

// ============================================================================
// 3D Overlay
// ============================================================================

#[test]
fn orbit_ring_drawn_only_in_orbit() {
    let (mut host, _) = scene();
    let mut controller = started(&mut host);
    let reflect = controller.draw(&host, DrawStage::View3d, REGION).unwrap();
    assert!(longest_strip(&reflect) < 64);

    press(&mut controller, &mut host, EventKind::Two);
    let orbit = controller.draw(&host, DrawStage::View3d, REGION).unwrap();
    assert!(longest_strip(&orbit) > 64);
}

#[test]
fn status_text_follows_modifiers() {
    let (mut host, _) = scene();
    let mut controller = started(&mut host);
    press(&mut controller, &mut host, EventKind::LeftAlt);
    press(&mut controller, &mut host, EventKind::LeftShift);
    assert_eq!(controller.session().unwrap().modifiers, Modifiers::SHIFT | Modifiers::ALT);
    assert!(host.status_text.as_deref().is_some_and(|s| s.starts_with("Size X")));
}

// ============================================================================
// Gizmo
// ============================================================================

#[test]
fn gizmo_uses_session_target_while_active() {
    let (mut host, id) = scene();
    let mut controller = started(&mut host);
    let during = resolve_gizmo(&host, id).unwrap();
    assert_eq!(during.source, TargetSource::Session);

    press(&mut controller, &mut host, EventKind::Return);
    let after = resolve_gizmo(&host, id).unwrap();
    assert_ne!(after.source, TargetSource::Session);
}

#[test]
fn gizmo_falls_back_to_stored_offset() {
    let mut host = MemoryHost::new();
    let mut light = Light::new(LightData::new(LightKind::default_for(LightType::Spot), 10.0));
    light.metadata.last_offset = Some(3.0);
    let id = host.add_object(
        SceneObject::light("Spot", light)
            .with_location(Vec3::new(1.0, 0.0, 2.0))
            .with_rotation(aim_euler(Vec3::X, 0.0)),
    );

    let placement = resolve_gizmo(&host, id).unwrap();
    assert_eq!(placement.source, TargetSource::Fallback);
    assert!((placement.location - Vec3::new(4.0, 0.0, 2.0)).length() < 1e-4);
}
