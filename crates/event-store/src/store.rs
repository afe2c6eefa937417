use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::{AggregateId, EventEnvelope, EventStoreError, Result, Version};

/// Options for appending events to the store.
#[derive(Debug, Clone, Default)]
pub struct AppendOptions {
    /// Expected current version of the aggregate, for optimistic concurrency
    /// control. `None` skips the check.
    pub expected_version: Option<Version>,
}

impl AppendOptions {
    /// Options with no version check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects the aggregate to currently be at `version`.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(version),
        }
    }

    /// Expects the aggregate to have no events yet.
    pub fn expect_new() -> Self {
        Self {
            expected_version: Some(Version::UNASSIGNED),
        }
    }
}

/// A stream of stored events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<EventEnvelope>> + Send>>;

/// Persistence contract for event streams.
///
/// Implementations must be thread-safe; atomicity of a single `append` call
/// is the only write guarantee. Cross-command ordering is the caller's
/// problem, expressed through `AppendOptions::expected_version`.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends a batch of events for one aggregate.
    ///
    /// Events carrying [`Version::UNASSIGNED`] are stamped with the next
    /// sequential versions. Events carrying explicit versions (replay) must
    /// continue the stream without gaps or the call fails with
    /// [`EventStoreError::VersionGap`]. If `options.expected_version` is set
    /// and does not match the stream, the call fails with
    /// [`EventStoreError::ConcurrencyConflict`].
    ///
    /// Returns the aggregate's version after the append.
    async fn append(&self, events: Vec<EventEnvelope>, options: AppendOptions) -> Result<Version>;

    /// All events for one aggregate, oldest version first.
    async fn get_events_for_aggregate(
        &self,
        aggregate_id: AggregateId,
    ) -> Result<Vec<EventEnvelope>>;

    /// Current version of an aggregate, or `None` if it has no events.
    async fn get_aggregate_version(&self, aggregate_id: AggregateId) -> Result<Option<Version>>;

    /// Streams every event in the store in append order.
    async fn stream_all_events(&self) -> Result<EventStream>;
}

/// Checks that a batch is appendable: non-empty, all events belong to the
/// same aggregate, and versions are either all unassigned (the store stamps
/// them) or all explicit and consecutive.
pub fn validate_events_for_append(events: &[EventEnvelope]) -> Result<()> {
    let first = events
        .first()
        .ok_or_else(|| EventStoreError::InvalidAppend("empty event batch".to_string()))?;

    for event in &events[1..] {
        if event.aggregate_id() != first.aggregate_id() {
            return Err(EventStoreError::InvalidAppend(
                "events in one batch must belong to the same aggregate".to_string(),
            ));
        }
        if event.aggregate_type() != first.aggregate_type() {
            return Err(EventStoreError::InvalidAppend(
                "events in one batch must share the aggregate type".to_string(),
            ));
        }
    }

    let assigned = first.version().is_assigned();
    if events.iter().any(|e| e.version().is_assigned() != assigned) {
        return Err(EventStoreError::InvalidAppend(
            "cannot mix unassigned and explicit versions in one batch".to_string(),
        ));
    }

    if assigned {
        let mut expected = first.version();
        for event in &events[1..] {
            expected = expected.next();
            if event.version() != expected {
                return Err(EventStoreError::VersionGap {
                    aggregate_id: event.aggregate_id(),
                    expected,
                    found: event.version(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(aggregate_id: AggregateId, version: Option<Version>) -> EventEnvelope {
        let builder = EventEnvelope::builder()
            .aggregate_id(aggregate_id)
            .aggregate_type("Post")
            .event_type("PostCreated")
            .payload_raw(serde_json::json!({}));
        match version {
            Some(v) => builder.version(v).build(),
            None => builder.build(),
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(matches!(
            validate_events_for_append(&[]),
            Err(EventStoreError::InvalidAppend(_))
        ));
    }

    #[test]
    fn mixed_aggregates_are_rejected() {
        let batch = vec![
            envelope(AggregateId::new(), None),
            envelope(AggregateId::new(), None),
        ];
        assert!(matches!(
            validate_events_for_append(&batch),
            Err(EventStoreError::InvalidAppend(_))
        ));
    }

    #[test]
    fn mixed_version_assignment_is_rejected() {
        let id = AggregateId::new();
        let batch = vec![envelope(id, None), envelope(id, Some(Version::first()))];
        assert!(matches!(
            validate_events_for_append(&batch),
            Err(EventStoreError::InvalidAppend(_))
        ));
    }

    #[test]
    fn explicit_versions_must_be_consecutive() {
        let id = AggregateId::new();
        let batch = vec![
            envelope(id, Some(Version::new(1))),
            envelope(id, Some(Version::new(3))),
        ];
        assert!(matches!(
            validate_events_for_append(&batch),
            Err(EventStoreError::VersionGap { .. })
        ));
    }

    #[test]
    fn unassigned_batch_passes() {
        let id = AggregateId::new();
        let batch = vec![envelope(id, None), envelope(id, None)];
        assert!(validate_events_for_append(&batch).is_ok());
    }

    #[test]
    fn consecutive_explicit_batch_passes() {
        let id = AggregateId::new();
        let batch = vec![
            envelope(id, Some(Version::new(4))),
            envelope(id, Some(Version::new(5))),
        ];
        assert!(validate_events_for_append(&batch).is_ok());
    }
}
