//! Error types for the few fallible canvas boundaries.
//!
//! Geometry never fails: bad input is clamped. Errors only surface when
//! decoding a persisted document or accepting configuration from the host.

use thiserror::Error;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

#[derive(Debug, Error)]
pub enum CanvasError {
    /// The slide document JSON could not be decoded.
    #[error("slide document decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The grid step must be a positive integer.
    #[error("grid step must be positive, got {0}")]
    InvalidGridStep(u32),
}
