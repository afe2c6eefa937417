//! Domain layer for the post service.
//!
//! Provides:
//! - [`Aggregate`] and [`DomainEvent`] traits for event-sourced entities
//! - [`CommandExecutor`] for the load → decide → append cycle
//! - [`CommandBus`], the startup-wired dispatcher routing each command kind
//!   to exactly one handler
//! - the [`post`] module: the `Post` aggregate with its commands, events and
//!   handlers

pub mod aggregate;
pub mod bus;
pub mod command;
pub mod error;
pub mod post;

pub use aggregate::{Aggregate, DomainEvent};
pub use bus::{CommandBus, CommandBusBuilder, HandleCommand, RegistrationError};
pub use command::{Command, CommandExecutor, ExecutionResult};
pub use error::DomainError;
pub use post::{
    CreatePost, DisablePost, EnablePost, HidePost, Moderation, POST_COMMAND_KINDS, Post,
    PostError, PostEvent, PublishPost, UpdatePostContent, Visibility, register_post_handlers,
};
