//! Error Types
//!
//! This module defines the error type shared by persistence, configuration and
//! model parsing.
//!
//! # Overview
//!
//! Very little in the core can fail outright. Editor tools skip silently when
//! there is no loaded home, invalid geometry is tolerated, and corrupt light
//! values are repaired in place. [`StoreyError`] therefore only covers the
//! edges of the system:
//! - File and JSON I/O performed by a [`HomeStore`](crate::persistence::HomeStore)
//! - Save names that would escape the save directory
//! - Hex colors that cannot be parsed
//! - The background save worker going away
//!
//! # Usage
//!
//! ```rust,ignore
//! use storey::errors::{StoreyError, Result};
//!
//! fn load() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum StoreyError {
    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Persistence Errors
    // ========================================================================
    /// The save name is empty or contains path components.
    #[error("Invalid save filename: {0:?}")]
    InvalidFilename(String),

    /// No save exists under the requested name.
    #[error("Save not found: {0}")]
    SaveNotFound(String),

    /// The background save worker has shut down.
    #[error("Save worker unavailable")]
    WorkerUnavailable,

    // ========================================================================
    // Model Errors
    // ========================================================================
    /// A color string is not of the form `#rrggbb`.
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
}

/// Alias for `Result<T, StoreyError>`.
pub type Result<T> = std::result::Result<T, StoreyError>;
