//! One handler per post command, wired onto the bus at startup.

use async_trait::async_trait;
use common::AggregateId;
use event_store::EventStore;

use crate::bus::{CommandBusBuilder, HandleCommand, RegistrationError};
use crate::command::CommandExecutor;
use crate::error::DomainError;

use super::{
    CreatePost, DisablePost, EnablePost, HidePost, Post, PostError, PublishPost,
    UpdatePostContent,
};

impl From<PostError> for DomainError {
    fn from(e: PostError) -> Self {
        DomainError::Post(e)
    }
}

/// Registers every post command handler on the builder.
///
/// Called once during wiring; combined with
/// [`POST_COMMAND_KINDS`](super::POST_COMMAND_KINDS) at build time this is
/// what makes an unhandled post command impossible at request time.
pub fn register_post_handlers<S>(
    builder: CommandBusBuilder,
    store: S,
) -> Result<CommandBusBuilder, RegistrationError>
where
    S: EventStore + Clone + 'static,
{
    builder
        .register::<CreatePost, _>(CreatePostHandler::new(store.clone()))?
        .register::<EnablePost, _>(EnablePostHandler::new(store.clone()))?
        .register::<DisablePost, _>(DisablePostHandler::new(store.clone()))?
        .register::<PublishPost, _>(PublishPostHandler::new(store.clone()))?
        .register::<HidePost, _>(HidePostHandler::new(store.clone()))?
        .register::<UpdatePostContent, _>(UpdatePostContentHandler::new(store))
}

/// Handles [`CreatePost`]; returns the new post's identifier.
pub struct CreatePostHandler<S: EventStore> {
    executor: CommandExecutor<S, Post>,
}

impl<S: EventStore> CreatePostHandler<S> {
    pub fn new(store: S) -> Self {
        Self {
            executor: CommandExecutor::new(store),
        }
    }
}

#[async_trait]
impl<S: EventStore + 'static> HandleCommand<CreatePost> for CreatePostHandler<S> {
    #[tracing::instrument(skip(self, command), fields(post_id = %command.post_id))]
    async fn handle(&self, command: CreatePost) -> Result<AggregateId, DomainError> {
        let CreatePost {
            post_id,
            title,
            content,
        } = command;

        self.executor
            .execute(post_id, |post| post.create(post_id, title, content))
            .await?;

        Ok(post_id)
    }
}

/// Handles [`EnablePost`].
pub struct EnablePostHandler<S: EventStore> {
    executor: CommandExecutor<S, Post>,
}

impl<S: EventStore> EnablePostHandler<S> {
    pub fn new(store: S) -> Self {
        Self {
            executor: CommandExecutor::new(store),
        }
    }
}

#[async_trait]
impl<S: EventStore + 'static> HandleCommand<EnablePost> for EnablePostHandler<S> {
    #[tracing::instrument(skip(self, command), fields(post_id = %command.post_id))]
    async fn handle(&self, command: EnablePost) -> Result<(), DomainError> {
        self.executor
            .execute_existing(command.post_id, |post| post.enable())
            .await?;
        Ok(())
    }
}

/// Handles [`DisablePost`].
pub struct DisablePostHandler<S: EventStore> {
    executor: CommandExecutor<S, Post>,
}

impl<S: EventStore> DisablePostHandler<S> {
    pub fn new(store: S) -> Self {
        Self {
            executor: CommandExecutor::new(store),
        }
    }
}

#[async_trait]
impl<S: EventStore + 'static> HandleCommand<DisablePost> for DisablePostHandler<S> {
    #[tracing::instrument(skip(self, command), fields(post_id = %command.post_id))]
    async fn handle(&self, command: DisablePost) -> Result<(), DomainError> {
        self.executor
            .execute_existing(command.post_id, |post| post.disable())
            .await?;
        Ok(())
    }
}

/// Handles [`PublishPost`].
pub struct PublishPostHandler<S: EventStore> {
    executor: CommandExecutor<S, Post>,
}

impl<S: EventStore> PublishPostHandler<S> {
    pub fn new(store: S) -> Self {
        Self {
            executor: CommandExecutor::new(store),
        }
    }
}

#[async_trait]
impl<S: EventStore + 'static> HandleCommand<PublishPost> for PublishPostHandler<S> {
    #[tracing::instrument(skip(self, command), fields(post_id = %command.post_id))]
    async fn handle(&self, command: PublishPost) -> Result<(), DomainError> {
        self.executor
            .execute_existing(command.post_id, |post| post.publish())
            .await?;
        Ok(())
    }
}

/// Handles [`HidePost`].
pub struct HidePostHandler<S: EventStore> {
    executor: CommandExecutor<S, Post>,
}

impl<S: EventStore> HidePostHandler<S> {
    pub fn new(store: S) -> Self {
        Self {
            executor: CommandExecutor::new(store),
        }
    }
}

#[async_trait]
impl<S: EventStore + 'static> HandleCommand<HidePost> for HidePostHandler<S> {
    #[tracing::instrument(skip(self, command), fields(post_id = %command.post_id))]
    async fn handle(&self, command: HidePost) -> Result<(), DomainError> {
        self.executor
            .execute_existing(command.post_id, |post| post.hide())
            .await?;
        Ok(())
    }
}

/// Handles [`UpdatePostContent`].
pub struct UpdatePostContentHandler<S: EventStore> {
    executor: CommandExecutor<S, Post>,
}

impl<S: EventStore> UpdatePostContentHandler<S> {
    pub fn new(store: S) -> Self {
        Self {
            executor: CommandExecutor::new(store),
        }
    }
}

#[async_trait]
impl<S: EventStore + 'static> HandleCommand<UpdatePostContent> for UpdatePostContentHandler<S> {
    #[tracing::instrument(skip(self, command), fields(post_id = %command.post_id))]
    async fn handle(&self, command: UpdatePostContent) -> Result<(), DomainError> {
        let UpdatePostContent { post_id, content } = command;
        self.executor
            .execute_existing(post_id, |post| post.update_content(content))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::CommandBus;
    use crate::post::POST_COMMAND_KINDS;
    use event_store::InMemoryEventStore;

    fn bus_with_store() -> (CommandBus, InMemoryEventStore) {
        let store = InMemoryEventStore::new();
        let bus = register_post_handlers(CommandBus::builder(), store.clone())
            .unwrap()
            .build(POST_COMMAND_KINDS)
            .unwrap();
        (bus, store)
    }

    #[tokio::test]
    async fn create_returns_the_new_id() {
        let (bus, store) = bus_with_store();

        let id = bus.send(CreatePost::new("Title", "Body")).await.unwrap();

        assert_eq!(store.get_events_for_aggregate(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn mutation_on_missing_post_is_not_found() {
        let (bus, _) = bus_with_store();

        let result = bus.send(EnablePost::new(AggregateId::new())).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn rule_violation_reaches_the_caller_unchanged() {
        let (bus, _) = bus_with_store();

        let id = bus.send(CreatePost::new("Title", "Body")).await.unwrap();
        let result = bus.send(PublishPost::new(id)).await;

        match result {
            Err(DomainError::Post(err)) => {
                assert_eq!(err, PostError::Disabled { action: "publish" });
            }
            other => panic!("expected a domain rule violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn enable_then_publish_succeeds() {
        let (bus, store) = bus_with_store();

        let id = bus.send(CreatePost::new("Title", "Body")).await.unwrap();
        bus.send(EnablePost::new(id)).await.unwrap();
        bus.send(PublishPost::new(id)).await.unwrap();

        let types: Vec<String> = store
            .get_events_for_aggregate(id)
            .await
            .unwrap()
            .iter()
            .map(|e| e.event_type().to_string())
            .collect();
        assert_eq!(types, vec!["PostCreated", "PostEnabled", "PostPublished"]);
    }

    #[tokio::test]
    async fn missing_registration_is_caught_at_build() {
        let store = InMemoryEventStore::new();
        let result = CommandBus::builder()
            .register::<CreatePost, _>(CreatePostHandler::new(store))
            .unwrap()
            .build(POST_COMMAND_KINDS);

        assert!(matches!(
            result,
            Err(RegistrationError::MissingHandler("EnablePost"))
        ));
    }
}
