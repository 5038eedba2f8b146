//! Core error type.
//!
//! Higher crates wrap `CoreError` as one variant of their own enum via
//! `#[from]`, so geometry and parsing failures surface with their original
//! message intact.

use thiserror::Error;

/// Errors raised by geometry primitives and enum parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown distance metric {0:?} (expected euclidean, manhattan, or adj manhattan)")]
    UnknownMetric(String),

    #[error("unknown {kind} {value:?}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
}

/// Shorthand result type for `ps-core`.
pub type CoreResult<T> = Result<T, CoreError>;
