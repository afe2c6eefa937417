//! Command bus: kind-tag routing from commands to their single handler.
//!
//! The bus is populated once at startup through [`CommandBusBuilder`].
//! Registering two handlers for one command kind, or finishing the build with
//! an expected kind unhandled, is a configuration error surfaced at wiring
//! time, never on a request.

use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::command::Command;
use crate::error::DomainError;

/// Handles one command kind.
///
/// Exactly one implementation is registered per kind. Handlers propagate
/// domain failures unchanged; the bus adds nothing on top.
#[async_trait]
pub trait HandleCommand<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> Result<C::Output, DomainError>;
}

/// Errors detected while wiring the bus. Fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("duplicate handler registered for command {0}")]
    DuplicateHandler(&'static str),

    #[error("no handler registered for command {0}")]
    MissingHandler(&'static str),
}

// Each entry is an `Arc<dyn HandleCommand<C>>` for the C whose NAME keys it.
type AnyHandler = Box<dyn Any + Send + Sync>;

/// Builder collecting handlers before the bus goes live.
#[derive(Default)]
pub struct CommandBusBuilder {
    handlers: HashMap<&'static str, AnyHandler>,
}

impl CommandBusBuilder {
    /// Registers the handler for command kind `C`.
    ///
    /// Fails if a handler for `C::NAME` is already present.
    pub fn register<C, H>(mut self, handler: H) -> Result<Self, RegistrationError>
    where
        C: Command,
        H: HandleCommand<C> + 'static,
    {
        match self.handlers.entry(C::NAME) {
            Entry::Occupied(_) => Err(RegistrationError::DuplicateHandler(C::NAME)),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(Arc::new(handler) as Arc<dyn HandleCommand<C>>));
                Ok(self)
            }
        }
    }

    /// Finalizes the bus, verifying every expected command kind has its
    /// handler.
    pub fn build(self, expected_kinds: &[&'static str]) -> Result<CommandBus, RegistrationError> {
        for &kind in expected_kinds {
            if !self.handlers.contains_key(kind) {
                return Err(RegistrationError::MissingHandler(kind));
            }
        }
        Ok(CommandBus {
            handlers: Arc::new(self.handlers),
        })
    }
}

/// Routes each command to its registered handler and returns the handler's
/// outcome untouched.
///
/// Cheap to clone; dispatch of a single command is one lookup plus one
/// handler invocation. The bus itself holds no ordering, locking or retry
/// behavior.
#[derive(Clone)]
pub struct CommandBus {
    handlers: Arc<HashMap<&'static str, AnyHandler>>,
}

impl CommandBus {
    pub fn builder() -> CommandBusBuilder {
        CommandBusBuilder::default()
    }

    /// Number of registered command kinds.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatches a command to its handler, invoking it exactly once.
    #[tracing::instrument(skip(self, command), fields(command = C::NAME))]
    pub async fn send<C: Command>(&self, command: C) -> Result<C::Output, DomainError> {
        let handler = self
            .handlers
            .get(C::NAME)
            .and_then(|h| h.downcast_ref::<Arc<dyn HandleCommand<C>>>())
            .cloned()
            .ok_or(DomainError::UnregisteredCommand(C::NAME))?;

        metrics::counter!("commands_dispatched_total", "command" => C::NAME).increment(1);
        handler.handle(command).await
    }
}
