use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    AggregateId, EventEnvelope, EventStoreError, Result, Version,
    store::{AppendOptions, EventStore, EventStream, validate_events_for_append},
};

/// In-memory event store.
///
/// Backs the service by default and every test suite. Events live in a single
/// append-ordered log; a durable implementation would sit behind the same
/// [`EventStore`] trait.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<EventEnvelope>>>,
}

impl InMemoryEventStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of events across all aggregates.
    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Drops every event.
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, events: Vec<EventEnvelope>, options: AppendOptions) -> Result<Version> {
        validate_events_for_append(&events)?;

        let aggregate_id = events[0].aggregate_id();
        let mut log = self.events.write().await;

        let current = log
            .iter()
            .filter(|e| e.aggregate_id() == aggregate_id)
            .map(|e| e.version())
            .max()
            .unwrap_or(Version::UNASSIGNED);

        if let Some(expected) = options.expected_version
            && current != expected
        {
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected,
                actual: current,
            });
        }

        let mut version = current;
        let mut stamped = Vec::with_capacity(events.len());
        for event in events {
            version = version.next();
            if event.version().is_assigned() {
                // Replay path: the supplied version must continue the stream.
                if event.version() != version {
                    return Err(EventStoreError::VersionGap {
                        aggregate_id,
                        expected: version,
                        found: event.version(),
                    });
                }
                stamped.push(event);
            } else {
                stamped.push(event.with_version(version));
            }
        }

        log.extend(stamped);
        Ok(version)
    }

    async fn get_events_for_aggregate(
        &self,
        aggregate_id: AggregateId,
    ) -> Result<Vec<EventEnvelope>> {
        let log = self.events.read().await;
        let mut events: Vec<_> = log
            .iter()
            .filter(|e| e.aggregate_id() == aggregate_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.version());
        Ok(events)
    }

    async fn get_aggregate_version(&self, aggregate_id: AggregateId) -> Result<Option<Version>> {
        let log = self.events.read().await;
        Ok(log
            .iter()
            .filter(|e| e.aggregate_id() == aggregate_id)
            .map(|e| e.version())
            .max())
    }

    async fn stream_all_events(&self) -> Result<EventStream> {
        use futures_util::stream;

        let log = self.events.read().await;
        let events = log.clone();
        Ok(Box::pin(stream::iter(events.into_iter().map(Ok))))
    }
}
