//! # Light Wrangler HUD
//!
//! Overlays drawn while an interactive session runs:
//!
//! - [`overlay`]: world-space orbit ring and distance measurement
//! - [`panel`]: value panel with hover tooltips
//! - [`help`]: shortcut reference and status-bar text
//! - [`renderer`]: [`HudRenderer`], which ties them to a viewport
//! - [`gizmo`]: placement of the re-entry gizmo outside a session
//!
//! Nothing here touches a graphics API; every overlay returns a
//! [`DrawList`] for the host to replay.

#![warn(clippy::pedantic)]

pub mod draw;
pub mod gizmo;
pub mod help;
pub mod labels;
pub mod overlay;
pub mod panel;
pub mod renderer;

pub use draw::{DepthTest, DrawCommand, DrawList, Topology};
pub use gizmo::{GizmoPlacement, GizmoShape, GizmoStyle, TargetSource, resolve_gizmo};
pub use help::{HelpContext, HelpLine, formatted_help, help_sections, status_bar_text};
pub use labels::{ValueContext, format_property_value, property_label};
pub use renderer::{HudRenderer, HudState};
