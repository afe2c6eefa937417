//! End-to-end tests for the post domain: bus dispatch, event persistence,
//! replay and the moderation/visibility rules.

use common::AggregateId;
use domain::{
    Aggregate, CommandBus, CommandExecutor, CreatePost, DisablePost, DomainError, EnablePost,
    HidePost, Moderation, POST_COMMAND_KINDS, Post, PostError, PublishPost, UpdatePostContent,
    Visibility, register_post_handlers,
};
use event_store::{EventStore, InMemoryEventStore, Version};

fn wire_bus() -> (CommandBus, InMemoryEventStore) {
    let store = InMemoryEventStore::new();
    let bus = register_post_handlers(CommandBus::builder(), store.clone())
        .expect("handler registration")
        .build(POST_COMMAND_KINDS)
        .expect("bus build");
    (bus, store)
}

async fn load_post(store: &InMemoryEventStore, id: AggregateId) -> Post {
    let executor: CommandExecutor<_, Post> = CommandExecutor::new(store.clone());
    executor
        .load_existing(id)
        .await
        .expect("load")
        .expect("post exists")
}

#[tokio::test]
async fn created_post_is_disabled_and_hidden() {
    let (bus, store) = wire_bus();

    let id = bus
        .send(CreatePost::new("First post", "hello"))
        .await
        .unwrap();

    let post = load_post(&store, id).await;
    assert_eq!(post.id(), Some(id));
    assert_eq!(post.moderation(), Moderation::Disabled);
    assert_eq!(post.visibility(), Visibility::Hidden);
}

#[tokio::test]
async fn publish_while_disabled_is_a_rule_violation_with_text() {
    let (bus, _) = wire_bus();

    let id = bus
        .send(CreatePost::new("First post", "hello"))
        .await
        .unwrap();

    let err = bus.send(PublishPost::new(id)).await.unwrap_err();
    match err {
        DomainError::Post(post_err) => {
            assert!(!post_err.to_string().is_empty());
            assert_eq!(post_err, PostError::Disabled { action: "publish" });
        }
        other => panic!("expected rule violation, got {other:?}"),
    }
}

#[tokio::test]
async fn enable_then_publish_reflects_in_loaded_state() {
    let (bus, store) = wire_bus();

    let id = bus
        .send(CreatePost::new("First post", "hello"))
        .await
        .unwrap();
    bus.send(EnablePost::new(id)).await.unwrap();
    bus.send(PublishPost::new(id)).await.unwrap();

    let post = load_post(&store, id).await;
    assert_eq!(post.moderation(), Moderation::Enabled);
    assert_eq!(post.visibility(), Visibility::Published);
}

#[tokio::test]
async fn versions_are_gap_free_and_increasing() {
    let (bus, store) = wire_bus();

    let id = bus
        .send(CreatePost::new("First post", "hello"))
        .await
        .unwrap();
    bus.send(EnablePost::new(id)).await.unwrap();
    bus.send(UpdatePostContent::new(id, "v2")).await.unwrap();
    bus.send(PublishPost::new(id)).await.unwrap();
    bus.send(HidePost::new(id)).await.unwrap();
    bus.send(DisablePost::new(id)).await.unwrap();

    let versions: Vec<i64> = store
        .get_events_for_aggregate(id)
        .await
        .unwrap()
        .iter()
        .map(|e| e.version().as_i64())
        .collect();

    assert_eq!(versions, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(
        store.get_aggregate_version(id).await.unwrap(),
        Some(Version::new(6))
    );
}

#[tokio::test]
async fn mutations_on_unknown_posts_are_not_found_never_rule_violations() {
    let (bus, _) = wire_bus();
    let ghost = AggregateId::new();

    for result in [
        bus.send(EnablePost::new(ghost)).await,
        bus.send(DisablePost::new(ghost)).await,
        bus.send(PublishPost::new(ghost)).await,
        bus.send(HidePost::new(ghost)).await,
        bus.send(UpdatePostContent::new(ghost, "x")).await,
    ] {
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}

#[tokio::test]
async fn noop_content_update_appends_nothing() {
    let (bus, store) = wire_bus();

    let id = bus.send(CreatePost::new("Title", "same")).await.unwrap();
    bus.send(EnablePost::new(id)).await.unwrap();

    let before = store.get_events_for_aggregate(id).await.unwrap().len();
    bus.send(UpdatePostContent::new(id, "same")).await.unwrap();
    let after = store.get_events_for_aggregate(id).await.unwrap().len();

    assert_eq!(before, after);
}

#[tokio::test]
async fn hide_then_republish_roundtrip() {
    let (bus, store) = wire_bus();

    let id = bus.send(CreatePost::new("Title", "body")).await.unwrap();
    bus.send(EnablePost::new(id)).await.unwrap();
    bus.send(PublishPost::new(id)).await.unwrap();
    bus.send(HidePost::new(id)).await.unwrap();

    let post = load_post(&store, id).await;
    assert_eq!(post.visibility(), Visibility::Hidden);

    bus.send(PublishPost::new(id)).await.unwrap();
    let post = load_post(&store, id).await;
    assert_eq!(post.visibility(), Visibility::Published);
}

#[tokio::test]
async fn replay_matches_live_state_after_many_commands() {
    let (bus, store) = wire_bus();

    let id = bus.send(CreatePost::new("Title", "v1")).await.unwrap();
    bus.send(EnablePost::new(id)).await.unwrap();
    for i in 2..=10 {
        bus.send(UpdatePostContent::new(id, format!("v{i}")))
            .await
            .unwrap();
    }

    let post = load_post(&store, id).await;
    assert_eq!(post.content(), "v10");
    assert_eq!(post.version(), Version::new(10));
}
