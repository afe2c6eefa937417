//! Projection error types.

use thiserror::Error;

/// Errors that can occur while feeding events into read models.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// An error occurred in the event store.
    #[error("event store error: {0}")]
    EventStore(#[from] event_store::EventStoreError),

    /// An event payload did not deserialize.
    #[error("event deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
