//! Domain error types.

use event_store::EventStoreError;
use thiserror::Error;

use crate::post::PostError;

/// Errors surfaced by command dispatch and execution.
///
/// The dispatcher never wraps or swallows these: a handler's rule violation
/// ([`DomainError::Post`]) and a missing aggregate ([`DomainError::NotFound`])
/// reach the caller unchanged so the boundary can map them.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the event store.
    #[error("event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// A business rule rejected the requested transition. Expected and
    /// recoverable; not a defect.
    #[error("{0}")]
    Post(PostError),

    /// The targeted aggregate has no events.
    #[error("{aggregate_type} {aggregate_id} not found")]
    NotFound {
        aggregate_type: &'static str,
        aggregate_id: String,
    },

    /// A command kind reached the bus without a handler. Always a wiring bug:
    /// startup validation makes this unreachable for expected command kinds.
    #[error("no handler registered for command {0}")]
    UnregisteredCommand(&'static str),

    /// Event payload (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
