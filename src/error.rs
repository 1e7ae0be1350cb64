//! Error types for the simulation engine.
//!
//! Degenerate actions (hopping into a wall, infecting a friend) are not errors;
//! they resolve as no-ops inside the tick. Only construction, seeding and
//! broken engine invariants surface here.

use thiserror::Error;

/// Main error type for world construction, seeding and stepping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Invalid construction parameters, a second live world, or seeding
    /// after the simulation started
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// More agents requested than there are free cells
    #[error("Capacity error: requested {requested} agents but only {available} cells are free")]
    Capacity { requested: usize, available: usize },

    /// Species tag with no registered factory
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    /// Engine bug: ledger or grid/registry consistency broke
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a new invariant violation.
    #[must_use]
    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// True for errors that mean the world state can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}
