//! Error Types
//!
//! This module defines the error type shared by every Light Wrangler crate.
//!
//! # Overview
//!
//! [`WranglerError`] covers the precondition failures an interactive session
//! can hit before it mutates anything:
//! - missing or non-light active objects
//! - operators started outside a 3D viewport region
//! - light linking under an unsupported render engine
//! - malformed preference documents
//!
//! Transient query failures (a ray that hits nothing) are not errors; they
//! surface as `None` from the query that produced them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wrangler_core::error::{Result, WranglerError};
//!
//! fn require_light(found: bool) -> Result<()> {
//!     if !found {
//!         return Err(WranglerError::NoActiveLight);
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for Light Wrangler.
#[derive(Error, Debug)]
pub enum WranglerError {
    // ========================================================================
    // Session Preconditions
    // ========================================================================
    /// No object is active in the scene.
    #[error("No active light selected")]
    NoActiveLight,

    /// The active object exists but is not a light.
    #[error("Active object '{0}' is not a light")]
    NotALight(String),

    /// The operator was started outside a 3D viewport region.
    #[error("Interactive mode requires a 3D viewport region")]
    InvalidRegion,

    /// A session is already running; only one light can be edited at a time.
    #[error("An interactive light session is already running")]
    SessionAlreadyActive,

    /// An event or draw request arrived while no session is running.
    #[error("No interactive light session is running")]
    NoSession,

    // ========================================================================
    // Scene Errors
    // ========================================================================
    /// A referenced object no longer exists in the scene.
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// Light linking requested under a render engine that lacks it.
    #[error("Light linking is only available in Cycles or EEVEE Next render engine (current: {0})")]
    UnsupportedRenderEngine(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A preference value is outside its accepted range.
    #[error("Invalid preference '{key}': {reason}")]
    InvalidPreference {
        /// Preference key as it appears in the settings document
        key: String,
        /// Human-readable reason
        reason: String,
    },

    /// The preference document could not be parsed.
    #[error("Preference parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Alias for `Result<T, WranglerError>`.
pub type Result<T> = std::result::Result<T, WranglerError>;
