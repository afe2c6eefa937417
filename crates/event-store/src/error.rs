use thiserror::Error;

use crate::{AggregateId, Version};

/// Errors that can occur when interacting with the event store.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// The expected version did not match the stream's actual version.
    #[error(
        "concurrency conflict for aggregate {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        aggregate_id: AggregateId,
        expected: Version,
        actual: Version,
    },

    /// An explicitly versioned event did not continue the stream without gaps.
    #[error("version gap for aggregate {aggregate_id}: expected {expected}, got {found}")]
    VersionGap {
        aggregate_id: AggregateId,
        expected: Version,
        found: Version,
    },

    /// The batch of events handed to `append` was malformed.
    #[error("invalid append: {0}")]
    InvalidAppend(String),
}

/// Result type for event store operations.
pub type Result<T> = std::result::Result<T, EventStoreError>;
