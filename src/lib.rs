#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! # Light Wrangler
//!
//! Interactive light placement for 3D content-creation hosts. Point at a
//! surface and the active light jumps to where it produces a highlight
//! there; scroll to tune power, size, spread, distance and roll.
//!
//! The work is split across four crates, re-exported here:
//!
//! - [`core`]: errors, math, unit formatting, timing
//! - [`scene`]: light model, metadata and the [`Host`] contract
//! - [`hud`]: draw lists for the session overlays
//! - [`interact`]: the modal session itself
//!
//! ```rust,ignore
//! use light_wrangler::prelude::*;
//!
//! let mut host = MemoryHost::new().with_floor(0.0).with_view(view);
//! let mut controller = ModalController::new();
//! add_interactive_light(&mut host, &mut controller, LightType::Area, mouse)?;
//! controller.handle_event(&mut host, &ModalEvent::press(EventKind::LeftMouse));
//! ```

pub use wrangler_core as core;
pub use wrangler_hud as hud;
pub use wrangler_interact as interact;
pub use wrangler_scene as scene;

pub use wrangler_core::{Result, WranglerError};
pub use wrangler_interact::{
    EventKind, EventValue, InvokeOptions, ModalController, ModalEvent, ModalResult, Modifiers, add_interactive_light,
    handle_shortcut, interactive_mode,
};
pub use wrangler_scene::{Host, LightType, MemoryHost, Mode};

pub mod prelude {
    pub use wrangler_core::{Result, UnitSystem, WranglerError};
    pub use wrangler_hud::{DrawCommand, DrawList, HudState};
    pub use wrangler_interact::{
        EventKind, EventValue, InvokeOptions, ModalController, ModalEvent, ModalResult, Modifiers, SessionState,
        add_interactive_light, handle_shortcut, interactive_mode,
    };
    pub use wrangler_scene::{
        Collider, DrawStage, Host, Light, LightData, LightKind, LightProperty, LightType, MemoryHost, Mode, ObjectId,
        Preferences, RegionId, ReportLevel, SceneObject, ViewState,
    };
}
