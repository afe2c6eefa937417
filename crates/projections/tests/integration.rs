//! Integration tests: command side feeding the post directory through the
//! projection processor.

use std::sync::Arc;

use common::AggregateId;
use domain::{
    CommandBus, CreatePost, DisablePost, EnablePost, HidePost, Moderation, POST_COMMAND_KINDS,
    PublishPost, UpdatePostContent, Visibility, register_post_handlers,
};
use event_store::InMemoryEventStore;
use projections::{PostDirectoryView, PostQueries, Projection, ProjectionProcessor};

struct Harness {
    bus: CommandBus,
    view: Arc<PostDirectoryView>,
    processor: ProjectionProcessor<InMemoryEventStore>,
}

fn harness() -> Harness {
    let store = InMemoryEventStore::new();
    let bus = register_post_handlers(CommandBus::builder(), store.clone())
        .expect("registration")
        .build(POST_COMMAND_KINDS)
        .expect("build");

    let view = Arc::new(PostDirectoryView::new());
    let mut processor = ProjectionProcessor::new(store);
    processor.register(Box::new(view.as_ref().clone()) as Box<dyn Projection>);

    Harness {
        bus,
        view,
        processor,
    }
}

#[tokio::test]
async fn directory_reflects_the_full_command_history() {
    let h = harness();

    let id = h.bus.send(CreatePost::new("Title", "v1")).await.unwrap();
    h.bus.send(EnablePost::new(id)).await.unwrap();
    h.bus.send(UpdatePostContent::new(id, "v2")).await.unwrap();
    h.bus.send(PublishPost::new(id)).await.unwrap();

    h.processor.run_catch_up().await.unwrap();

    let post = h.view.get_by_id(id).await.unwrap();
    assert_eq!(post.content, "v2");
    assert_eq!(post.moderation, Moderation::Enabled);
    assert_eq!(post.visibility, Visibility::Published);
    assert_eq!(post.version.as_i64(), 4);
}

#[tokio::test]
async fn catch_up_twice_does_not_double_apply() {
    let h = harness();

    let id = h.bus.send(CreatePost::new("Title", "body")).await.unwrap();
    h.bus.send(EnablePost::new(id)).await.unwrap();

    h.processor.run_catch_up().await.unwrap();
    h.processor.run_catch_up().await.unwrap();

    assert_eq!(h.view.len().await, 1);
    assert_eq!(h.view.position().await.events_processed, 2);
}

#[tokio::test]
async fn incremental_commands_show_up_after_another_catch_up() {
    let h = harness();

    let id = h.bus.send(CreatePost::new("Title", "body")).await.unwrap();
    h.processor.run_catch_up().await.unwrap();
    assert_eq!(
        h.view.get_by_id(id).await.unwrap().visibility,
        Visibility::Hidden
    );

    h.bus.send(EnablePost::new(id)).await.unwrap();
    h.bus.send(PublishPost::new(id)).await.unwrap();
    h.processor.run_catch_up().await.unwrap();

    assert_eq!(
        h.view.get_by_id(id).await.unwrap().visibility,
        Visibility::Published
    );
}

#[tokio::test]
async fn every_post_stays_listed_regardless_of_state() {
    let h = harness();

    let live = h.bus.send(CreatePost::new("Live", "")).await.unwrap();
    h.bus.send(EnablePost::new(live)).await.unwrap();
    h.bus.send(PublishPost::new(live)).await.unwrap();

    let pulled = h.bus.send(CreatePost::new("Pulled", "")).await.unwrap();
    h.bus.send(EnablePost::new(pulled)).await.unwrap();
    h.bus.send(PublishPost::new(pulled)).await.unwrap();
    h.bus.send(HidePost::new(pulled)).await.unwrap();
    h.bus.send(DisablePost::new(pulled)).await.unwrap();

    h.processor.run_catch_up().await.unwrap();

    let all = h.view.list_all().await;
    assert_eq!(all.len(), 2);

    let pulled_summary = h.view.get_by_id(pulled).await.unwrap();
    assert_eq!(pulled_summary.moderation, Moderation::Disabled);
    assert_eq!(pulled_summary.visibility, Visibility::Hidden);
}

#[tokio::test]
async fn rebuild_recovers_the_same_directory() {
    let h = harness();

    let id = h.bus.send(CreatePost::new("Title", "body")).await.unwrap();
    h.bus.send(EnablePost::new(id)).await.unwrap();
    h.processor.run_catch_up().await.unwrap();

    let before = h.view.get_by_id(id).await.unwrap();
    h.processor.rebuild_all().await.unwrap();
    let after = h.view.get_by_id(id).await.unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn unknown_id_stays_unknown() {
    let h = harness();
    h.bus.send(CreatePost::new("Title", "body")).await.unwrap();
    h.processor.run_catch_up().await.unwrap();

    assert!(h.view.get_by_id(AggregateId::new()).await.is_none());
}
