//! Error types for gridgraph operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridgraph operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Raw input is not a valid equality (bad syntax, unknown symbol,
    /// wrong number of `=` signs). The caller must not register the
    /// equation.
    #[error("malformed equation: {reason}")]
    MalformedEquation {
        /// What the parser rejected.
        reason: String,
    },

    /// Defensive: a relation that should already have been rejected by
    /// the parser reached the solver. Genuinely unsolvable relations
    /// are an empty branch set, not this error.
    #[error("unsolvable relation: {0}")]
    UnsolvableRelation(String),

    /// Camera spans must stay positive.
    #[error("invalid viewport: {width}x{height} (spans must be positive)")]
    InvalidViewport {
        /// Cartesian width of the camera.
        width: f64,
        /// Cartesian height of the camera.
        height: f64,
    },

    /// Marker planning was given a flat or inverted range. The camera
    /// invariant makes this unreachable from the legal state machine.
    #[error("marker range is not positive: [{min}, {max}]")]
    MarkerRange {
        /// Lower bound of the requested range.
        min: f64,
        /// Upper bound of the requested range.
        max: f64,
    },

    /// Sample planning needs at least one active curve.
    #[error("sample plan requires an active count of at least 1, got {active}")]
    SamplePlan {
        /// The offending active equation count.
        active: usize,
    },
}

impl Error {
    /// Shorthand for a [`Error::MalformedEquation`].
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedEquation { reason: reason.into() }
    }
}
