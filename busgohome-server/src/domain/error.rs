//! Domain error types.
//!
//! These errors represent invariant violations in domain values. They are
//! distinct from planning and API errors.

use super::StopCode;

/// Domain-level errors for journey construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Consecutive segments don't meet at the same stop
    #[error("segment {index} starts at {found} but the previous segment ends at {expected}")]
    BrokenChain {
        index: usize,
        expected: StopCode,
        found: StopCode,
    },

    /// A journey time that is negative or not a number
    #[error("invalid estimated time: {0}")]
    InvalidTime(f64),
}
