//! Core aggregate and domain event traits.

use common::AggregateId;
use event_store::Version;
use serde::{Serialize, de::DeserializeOwned};

/// A fact that happened to one aggregate, named in past tense.
///
/// Events are immutable; the identity/version metadata lives on the
/// envelope, the event itself carries only the domain payload.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Tag used for storage and filtering, e.g. `"PostCreated"`.
    fn event_type(&self) -> &'static str;
}

/// An event-sourced entity rebuilt by replaying its events.
///
/// Aggregates decide (command methods producing events, which may fail) and
/// apply (pure state transitions, which never fail — an event is a fact).
pub trait Aggregate: Default + Send + Sync + Sized {
    /// The events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// The rule-violation error its command methods return.
    type Error: std::error::Error + Send + Sync;

    /// Stream-type tag used by the event store, e.g. `"Post"`.
    fn aggregate_type() -> &'static str;

    /// The aggregate's identity, or `None` before the creation event.
    fn id(&self) -> Option<AggregateId>;

    /// Version of the last applied event.
    fn version(&self) -> Version;

    /// Records the persisted version after loading or appending.
    fn set_version(&mut self, version: Version);

    /// Applies one event. Must be pure and deterministic.
    fn apply(&mut self, event: Self::Event);

    /// Applies events in order.
    fn apply_events(&mut self, events: impl IntoIterator<Item = Self::Event>) {
        for event in events {
            self.apply(event);
        }
    }
}
