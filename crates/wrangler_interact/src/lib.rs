//! # Light Wrangler Interact
//!
//! The modal light placement session.
//!
//! A session starts from [`operators::add_interactive_light`] or
//! [`operators::interactive_mode`], then consumes [`ModalEvent`]s through
//! [`ModalController::handle_event`] until the user confirms or cancels.
//!
//! - [`input`]: event kinds and modifier flags
//! - [`raycast`]: sunflower-pattern surface sampling with normal smoothing
//! - [`positioner`]: REFLECT / DIRECT / ORBIT placement
//! - [`dispatch`]: modifier-to-property routing and step rules
//! - [`power`]: illuminance-preserving power compensation
//! - [`session`] and [`controller`]: the session state machine
//! - [`linking`], [`isolation`], [`tracking`], [`keyframes`]: scene side
//!   effects of session keys and exit paths

#![warn(clippy::pedantic)]

pub mod controller;
pub mod dispatch;
pub mod input;
pub mod isolation;
pub mod keyframes;
pub mod linking;
pub mod operators;
pub mod positioner;
pub mod power;
pub mod raycast;
pub mod session;
pub mod snapshot;
pub mod tracking;

pub use controller::{InvokeOptions, ModalController, ModalResult};
pub use dispatch::PropertyDispatcher;
pub use input::{EventKind, EventValue, ModalEvent, Modifiers};
pub use operators::{add_interactive_light, handle_shortcut, interactive_mode};
pub use positioner::Placement;
pub use power::PowerCompensator;
pub use raycast::{AdaptiveRaycast, SurfaceSample};
pub use session::{ModalSession, SessionState};
pub use snapshot::LightStateSnapshot;
