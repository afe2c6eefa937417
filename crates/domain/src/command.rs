//! Command trait and the execution machinery shared by all handlers.

use std::marker::PhantomData;

use common::AggregateId;
use event_store::{AppendOptions, EventEnvelope, EventStore, Version};

use crate::aggregate::{Aggregate, DomainEvent};
use crate::error::DomainError;

/// A named, immutable request to act on one aggregate.
///
/// Commands are built at the transport boundary and consumed by the dispatch
/// call that processes them. `NAME` is the kind tag the bus routes on;
/// `Output` is what a successful dispatch returns (the new identifier for
/// creations, `()` for mutations).
pub trait Command: Send + Sync + 'static {
    /// The aggregate this command targets.
    type Aggregate: Aggregate;

    /// Result of a successful dispatch.
    type Output: Send + 'static;

    /// Kind tag, unique per command type.
    const NAME: &'static str;

    /// Identity of the targeted aggregate instance.
    fn aggregate_id(&self) -> AggregateId;
}

/// Outcome of executing a command function against an aggregate.
#[derive(Debug)]
pub struct ExecutionResult<A: Aggregate> {
    /// The aggregate after the new events were applied.
    pub aggregate: A,

    /// The events produced and persisted.
    pub events: Vec<A::Event>,

    /// Stream version after the append.
    pub new_version: Version,
}

/// Runs the load → decide → append → apply cycle for one aggregate type.
///
/// Loading replays the stream into a fresh aggregate. The command function
/// inspects that state and either produces events or a rule violation. New
/// events are appended with the loaded version as the optimistic concurrency
/// check; version numbers themselves are assigned by the store.
pub struct CommandExecutor<S, A>
where
    S: EventStore,
    A: Aggregate,
{
    store: S,
    _aggregate: PhantomData<A>,
}

impl<S, A> CommandExecutor<S, A>
where
    S: EventStore,
    A: Aggregate,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _aggregate: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replays an aggregate from its events. A stream with no events yields
    /// the default (uninitialized) instance.
    pub async fn load(&self, aggregate_id: AggregateId) -> Result<A, DomainError> {
        let envelopes = self.store.get_events_for_aggregate(aggregate_id).await?;

        let mut aggregate = A::default();
        for envelope in envelopes {
            let version = envelope.version();
            let event: A::Event = serde_json::from_value(envelope.into_payload())?;
            aggregate.apply(event);
            aggregate.set_version(version);
        }

        Ok(aggregate)
    }

    /// Replays an aggregate, returning `None` if it was never created.
    pub async fn load_existing(&self, aggregate_id: AggregateId) -> Result<Option<A>, DomainError> {
        let aggregate = self.load(aggregate_id).await?;
        Ok(aggregate.id().is_some().then_some(aggregate))
    }

    /// Executes a command function and persists the events it produces.
    ///
    /// Suitable for creation: a missing aggregate is presented to the command
    /// function as the default instance.
    pub async fn execute<F>(
        &self,
        aggregate_id: AggregateId,
        command_fn: F,
    ) -> Result<ExecutionResult<A>, DomainError>
    where
        F: FnOnce(&A) -> Result<Vec<A::Event>, A::Error>,
        DomainError: From<A::Error>,
    {
        let mut aggregate = self.load(aggregate_id).await?;
        let current_version = aggregate.version();

        let events = command_fn(&aggregate)?;

        if events.is_empty() {
            return Ok(ExecutionResult {
                aggregate,
                events: vec![],
                new_version: current_version,
            });
        }

        let envelopes = build_envelopes::<A>(aggregate_id, &events)?;
        let new_version = self
            .store
            .append(envelopes, AppendOptions::expect_version(current_version))
            .await?;

        for event in &events {
            aggregate.apply(event.clone());
        }
        aggregate.set_version(new_version);

        Ok(ExecutionResult {
            aggregate,
            events,
            new_version,
        })
    }

    /// Executes a command function against an aggregate that must exist.
    ///
    /// Fails with [`DomainError::NotFound`] when the stream is empty, keeping
    /// "missing aggregate" distinct from any rule violation.
    pub async fn execute_existing<F>(
        &self,
        aggregate_id: AggregateId,
        command_fn: F,
    ) -> Result<ExecutionResult<A>, DomainError>
    where
        F: FnOnce(&A) -> Result<Vec<A::Event>, A::Error>,
        DomainError: From<A::Error>,
    {
        if self
            .store
            .get_aggregate_version(aggregate_id)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound {
                aggregate_type: A::aggregate_type(),
                aggregate_id: aggregate_id.to_string(),
            });
        }

        self.execute(aggregate_id, command_fn).await
    }
}

/// Wraps domain events in unversioned envelopes; the store assigns versions
/// at append time.
fn build_envelopes<A: Aggregate>(
    aggregate_id: AggregateId,
    events: &[A::Event],
) -> Result<Vec<EventEnvelope>, DomainError> {
    let mut envelopes = Vec::with_capacity(events.len());
    for event in events {
        let envelope = EventEnvelope::builder()
            .aggregate_id(aggregate_id)
            .aggregate_type(A::aggregate_type())
            .event_type(event.event_type())
            .payload(event)?
            .build();
        envelopes.push(envelope);
    }
    Ok(envelopes)
}
