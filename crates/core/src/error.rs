//! Fulfillment error model.

use thiserror::Error;

use crate::id::OrderLineId;

/// Result type used across the fulfillment engine.
pub type FulfillmentResult<T> = Result<T, FulfillmentError>;

/// Error returned by fulfillment operations.
///
/// Validation failures (`NotFound`, `InvalidQuantity`, `CapacityExceeded`) are
/// permanent and surfaced verbatim. `SequenceConflict` and `StorageUnavailable`
/// are transient; the caller may retry with bounded attempts. The engine itself
/// never retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FulfillmentError {
    /// A referenced order or order line does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Requested quantity would exceed the line's ordered quantity net of
    /// prior allocations on the same track.
    #[error("capacity exceeded on line {line_id}: {remaining} remaining")]
    CapacityExceeded {
        line_id: OrderLineId,
        /// Quantity still allocatable on the line and track.
        remaining: u32,
    },

    /// Requested quantity was not strictly positive.
    #[error("invalid quantity: must be positive")]
    InvalidQuantity,

    /// The atomic sequence counter could not complete due to contention.
    #[error("sequence conflict: {0}")]
    SequenceConflict(String),

    /// The persistence collaborator could not be reached or its transaction
    /// aborted.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl FulfillmentError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn capacity_exceeded(line_id: OrderLineId, remaining: u32) -> Self {
        Self::CapacityExceeded { line_id, remaining }
    }

    pub fn sequence_conflict(msg: impl Into<String>) -> Self {
        Self::SequenceConflict(msg.into())
    }

    pub fn storage_unavailable(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    /// Whether the error is safe to retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::SequenceConflict(_) | Self::StorageUnavailable(_)
        )
    }
}
