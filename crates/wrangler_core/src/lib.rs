//! # Light Wrangler Core
//!
//! Foundational types shared by every Light Wrangler crate:
//!
//! - [`error`]: the [`WranglerError`] type and [`Result`] alias
//! - [`math`]: aiming, roll extraction and Euler conversion
//! - [`units`]: metric/imperial length, angle and power formatting
//! - [`color`]: theme tint helpers
//! - [`timing`]: wall-clock delays and fades

#![warn(clippy::pedantic)]

pub mod color;
pub mod error;
pub mod math;
pub mod timing;
pub mod units;

pub use error::{Result, WranglerError};
pub use units::UnitSystem;
