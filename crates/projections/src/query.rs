//! Query-access capability for post read models.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::AggregateId;
use domain::{Moderation, Visibility};
use event_store::Version;

/// Denormalized view of one post, as served to readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub post_id: AggregateId,
    pub title: String,
    pub content: String,
    pub moderation: Moderation,
    pub visibility: Visibility,
    pub version: Version,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-only retrieval of posts, independent of the command path.
///
/// `get_by_id` returning `None` is the not-found condition; the transport
/// boundary translates it into a missing-resource response rather than a
/// generic error.
#[async_trait]
pub trait PostQueries: Send + Sync {
    /// Every post, sorted by creation time.
    async fn list_all(&self) -> Vec<PostSummary>;

    /// The post with the given id, or `None` if no such post exists.
    async fn get_by_id(&self, post_id: AggregateId) -> Option<PostSummary>;
}
