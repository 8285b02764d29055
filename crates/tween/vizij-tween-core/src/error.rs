//! Error types for tween construction and easing lookup.
//!
//! Every variant here is a programming error at the call site: the tween
//! configuration is invalid and must be fixed where it was built. Nothing in
//! this taxonomy is produced from inside a tick.

use crate::value::ValueKind;

/// Errors surfaced while building tweens or resolving easing curves.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TweenError {
    /// Interpolation requested for a step-only value kind
    #[error("Value kind {kind:?} cannot be interpolated")]
    UnsupportedValueKind { kind: ValueKind },

    /// Start and end values are of different kinds
    #[error("Value kind mismatch: start is {start:?}, end is {end:?}")]
    ValueKindMismatch { start: ValueKind, end: ValueKind },

    /// Easing name or index not in the curve table
    #[error("Unknown easing curve: {name}")]
    UnknownEase { name: String },

    /// Duration is negative or not finite
    #[error("Invalid tween duration: {duration}")]
    InvalidDuration { duration: f32 },

    /// Start delay is negative or not finite
    #[error("Invalid tween delay: {delay}")]
    InvalidDelay { delay: f32 },
}

impl TweenError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedValueKind { .. } | Self::ValueKindMismatch { .. } => "value",
            Self::UnknownEase { .. } => "ease",
            Self::InvalidDuration { .. } | Self::InvalidDelay { .. } => "timing",
        }
    }
}

/// Tween result type
pub type Result<T> = core::result::Result<T, TweenError>;
