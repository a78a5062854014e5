//! Modal input events.
//!
//! Hosts translate their native events into [`ModalEvent`]s. Positions are
//! window coordinates with a bottom-left origin; the session converts them
//! into region coordinates through the active [`ViewState`](wrangler_scene::ViewState).

use bitflags::bitflags;
use glam::Vec2;
use wrangler_scene::{Mode, RegionId};

/// Event type, named after the physical input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseMove,
    LeftMouse,
    RightMouse,
    WheelUp,
    WheelDown,
    /// Two-finger pan; the wheel amount comes from the vertical mouse delta.
    TrackpadPan,
    UpArrow,
    DownArrow,

    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    /// Mirrors Shift for keyboards where Shift+wheel is intercepted.
    Slash,

    One,
    Two,
    Three,
    Numpad1,
    Numpad2,
    Numpad3,

    Escape,
    Return,
    Tab,
    Space,
    Z,
    Q,
    I,
    H,
    F,
    L,
    F9,
    Other,
}

impl EventKind {
    /// The mode a number key selects.
    #[must_use]
    pub fn mode_slot(self) -> Option<Mode> {
        match self {
            Self::One | Self::Numpad1 => Some(Mode::Reflect),
            Self::Two | Self::Numpad2 => Some(Mode::Orbit),
            Self::Three | Self::Numpad3 => Some(Mode::Direct),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_wheel_like(self) -> bool {
        matches!(
            self,
            Self::WheelUp | Self::WheelDown | Self::UpArrow | Self::DownArrow | Self::TrackpadPan
        )
    }

    /// The modifier flag a key press or release toggles.
    #[must_use]
    pub fn modifier(self) -> Option<Modifiers> {
        match self {
            Self::LeftShift | Self::RightShift | Self::Slash => Some(Modifiers::SHIFT),
            Self::LeftCtrl | Self::RightCtrl => Some(Modifiers::CTRL),
            Self::LeftAlt | Self::RightAlt => Some(Modifiers::ALT),
            Self::Z => Some(Modifiers::Z),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum EventValue {
    #[default]
    Press,
    Release,
    Click,
    Nothing,
}

bitflags! {
    /// Held modifier keys. `Z` is tracked like a modifier because Z+wheel
    /// edits roll.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const Z     = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalEvent {
    pub kind: EventKind,
    pub value: EventValue,
    /// Window coordinates of the cursor.
    pub mouse: Vec2,
    /// Cursor position of the previous event, used by trackpad pans.
    pub mouse_prev: Vec2,
    /// Modifier state the host reported with this event.
    pub modifiers: Modifiers,
    /// Viewport the event was delivered to, when the host knows it.
    pub region: Option<RegionId>,
}

impl ModalEvent {
    #[must_use]
    pub fn new(kind: EventKind, value: EventValue) -> Self {
        Self {
            kind,
            value,
            mouse: Vec2::ZERO,
            mouse_prev: Vec2::ZERO,
            modifiers: Modifiers::empty(),
            region: None,
        }
    }

    #[must_use]
    pub fn press(kind: EventKind) -> Self {
        Self::new(kind, EventValue::Press)
    }

    #[must_use]
    pub fn release(kind: EventKind) -> Self {
        Self::new(kind, EventValue::Release)
    }

    #[must_use]
    pub fn mouse_move(position: Vec2) -> Self {
        Self::new(EventKind::MouseMove, EventValue::Nothing).at(position)
    }

    /// Moves the cursor, keeping the old position as `mouse_prev`.
    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.mouse_prev = self.mouse;
        self.mouse = position;
        self
    }

    #[must_use]
    pub fn with_prev(mut self, position: Vec2) -> Self {
        self.mouse_prev = position;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn in_region(mut self, region: RegionId) -> Self {
        self.region = Some(region);
        self
    }

    #[must_use]
    pub fn is_press(&self) -> bool {
        self.value == EventValue::Press
    }

    #[must_use]
    pub fn is_release(&self) -> bool {
        self.value == EventValue::Release
    }

    /// Signed wheel amount: `+1` up, `-1` down, fractional for trackpads.
    #[must_use]
    pub fn wheel_direction(&self) -> Option<f32> {
        match self.kind {
            EventKind::WheelUp | EventKind::UpArrow => Some(1.0),
            EventKind::WheelDown | EventKind::DownArrow => Some(-1.0),
            EventKind::TrackpadPan => Some((self.mouse.y - self.mouse_prev.y) * 0.05),
            _ => None,
        }
    }
}
