//! # Light Wrangler Scene
//!
//! The data the interactive editor works on and the contract it uses to talk
//! to the host application.
//!
//! - [`light`]: light variants and their parameters
//! - [`metadata`]: per-light editor annotations
//! - [`linking`]: light and shadow linking collections
//! - [`object`]: scene objects, handles and constraints
//! - [`view`]: viewport projection
//! - [`prefs`]: add-on preferences
//! - [`props`]: scene-level shared state
//! - [`host`]: the [`Host`] trait
//! - [`memory`]: [`MemoryHost`], an in-memory reference host

#![warn(clippy::pedantic)]

pub mod host;
pub mod light;
pub mod linking;
pub mod memory;
pub mod metadata;
pub mod object;
pub mod prefs;
pub mod props;
pub mod view;

pub use host::{CursorStyle, DrawHandle, DrawStage, Host, RAY_DISTANCE, RayHit, ReportLevel};
pub use light::{AreaParams, AreaShape, Light, LightData, LightKind, LightProperty, LightType, PointParams, SpotParams, SunParams};
pub use linking::{LightLinking, LinkCollection, LinkRole, LinkState};
pub use memory::MemoryHost;
pub use metadata::{LightMetadata, Mode};
pub use object::{Collider, EmptyDisplay, ObjectData, ObjectId, SceneObject, TrackConstraint};
pub use prefs::{AdjustmentModeEntry, NormalSmoothing, Preferences};
pub use props::{RenderEngine, SceneProps};
pub use view::{CameraView, RegionId, ViewState};
