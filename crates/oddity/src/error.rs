//! Error types for Oddity operations.
//!
//! This module provides the main error type [`OddityError`] which wraps
//! the failure modes of shape construction, partitioning, placement and
//! option validation.

use std::io;

use thiserror::Error;

use oddity_path::PathError;

/// The main error type for Oddity operations.
///
/// Errors are returned unchanged to the caller; no operation retries on the
/// caller's behalf beyond its own bounded attempt loop.
#[derive(Debug, Error)]
pub enum OddityError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An unsupported combination of shape, partition, layout or description
    /// values.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// A rejection-sampling loop ran out of attempts.
    #[error("Could not place {requested} items: placed {placed} after {attempts} attempts")]
    PlacementExhausted {
        requested: usize,
        placed: usize,
        attempts: usize,
    },

    #[error("Constraint unsatisfiable: {0}")]
    ConstraintUnsatisfiable(String),
}

impl OddityError {
    /// Create a new `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a new `ConstraintUnsatisfiable` error.
    pub fn unsatisfiable(message: impl Into<String>) -> Self {
        Self::ConstraintUnsatisfiable(message.into())
    }
}
