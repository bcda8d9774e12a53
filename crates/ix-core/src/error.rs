//! Core error type.
//!
//! Higher crates define their own error enums; this one only covers the
//! primitives that live in `ix-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("scripted random source needs at least one draw")]
    EmptyScript,

    #[error("random draw {0} is outside [0, 1)")]
    DrawOutOfRange(f64),
}

/// Shorthand result type for `ix-core`.
pub type CoreResult<T> = Result<T, CoreError>;
