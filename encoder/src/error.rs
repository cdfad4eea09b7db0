//! Error types for workout file encoding
//!
//! Every variant is a caller-facing validation error: the request is
//! rejected before any output byte is produced, and the message names
//! what was wrong. Internal layout invariants (definition-before-data,
//! field sizes) are enforced by construction and covered by tests, not
//! by runtime guards.

use thiserror::Error;

/// Errors surfaced to the serving layer by the encoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Request body was not valid JSON or lacked a required field
    #[error("Invalid workout request: {0}")]
    InvalidRequest(String),

    /// Interval duration that matches neither accepted form
    #[error("Invalid duration {0:?}: expected seconds or \"<number> min\"")]
    InvalidDuration(String),

    /// The step counter in the workout message is a single byte
    #[error("Workout has {0} steps, the file format allows at most 255")]
    TooManySteps(usize),
}

/// Result type alias for encoder operations
pub type EncodeResult<T> = Result<T, EncodeError>;
