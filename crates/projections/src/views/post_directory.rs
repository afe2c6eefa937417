//! Post directory read model — every post, whatever its state.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::AggregateId;
use domain::{Moderation, PostEvent, Visibility};
use event_store::EventEnvelope;
use tokio::sync::RwLock;

use crate::Result;
use crate::projection::{Projection, ProjectionPosition};
use crate::query::{PostQueries, PostSummary};

/// Read model view of all posts.
///
/// Unlike a front-page view this directory never evicts: disabled and hidden
/// posts stay queryable, state flags included.
#[derive(Clone)]
pub struct PostDirectoryView {
    posts: Arc<RwLock<HashMap<AggregateId, PostSummary>>>,
    position: Arc<RwLock<ProjectionPosition>>,
}

impl PostDirectoryView {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(RwLock::new(HashMap::new())),
            position: Arc::new(RwLock::new(ProjectionPosition::zero())),
        }
    }

    /// Number of posts in the directory.
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

impl Default for PostDirectoryView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostQueries for PostDirectoryView {
    async fn list_all(&self) -> Vec<PostSummary> {
        let mut posts: Vec<_> = self.posts.read().await.values().cloned().collect();
        posts.sort_by_key(|p| p.created_at);
        posts
    }

    async fn get_by_id(&self, post_id: AggregateId) -> Option<PostSummary> {
        self.posts.read().await.get(&post_id).cloned()
    }
}

#[async_trait]
impl Projection for PostDirectoryView {
    fn name(&self) -> &'static str {
        "PostDirectoryView"
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<()> {
        if event.aggregate_type() != "Post" {
            let mut pos = self.position.write().await;
            *pos = pos.advance();
            return Ok(());
        }

        let post_event: PostEvent = serde_json::from_value(event.payload().clone())?;
        let post_id = event.aggregate_id();

        let mut posts = self.posts.write().await;

        match post_event {
            PostEvent::PostCreated(data) => {
                posts.insert(
                    post_id,
                    PostSummary {
                        post_id,
                        title: data.title,
                        content: data.content,
                        moderation: Moderation::Disabled,
                        visibility: Visibility::Hidden,
                        version: event.version(),
                        created_at: data.created_at,
                        updated_at: data.created_at,
                    },
                );
            }
            PostEvent::PostEnabled(data) => {
                if let Some(post) = posts.get_mut(&post_id) {
                    post.moderation = Moderation::Enabled;
                    post.version = event.version();
                    post.updated_at = data.enabled_at;
                }
            }
            PostEvent::PostDisabled(data) => {
                if let Some(post) = posts.get_mut(&post_id) {
                    post.moderation = Moderation::Disabled;
                    post.version = event.version();
                    post.updated_at = data.disabled_at;
                }
            }
            PostEvent::PostPublished(data) => {
                if let Some(post) = posts.get_mut(&post_id) {
                    post.visibility = Visibility::Published;
                    post.version = event.version();
                    post.updated_at = data.published_at;
                }
            }
            PostEvent::PostHidden(data) => {
                if let Some(post) = posts.get_mut(&post_id) {
                    post.visibility = Visibility::Hidden;
                    post.version = event.version();
                    post.updated_at = data.hidden_at;
                }
            }
            PostEvent::PostContentUpdated(data) => {
                if let Some(post) = posts.get_mut(&post_id) {
                    post.content = data.content;
                    post.version = event.version();
                    post.updated_at = data.updated_at;
                }
            }
        }

        let mut pos = self.position.write().await;
        *pos = pos.advance();

        Ok(())
    }

    async fn position(&self) -> ProjectionPosition {
        *self.position.read().await
    }

    async fn reset(&self) -> Result<()> {
        self.posts.write().await.clear();
        *self.position.write().await = ProjectionPosition::zero();
        Ok(())
    }
}
