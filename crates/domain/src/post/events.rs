//! Post domain events.

use chrono::{DateTime, Utc};
use common::AggregateId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

/// Events that can occur on a post aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PostEvent {
    /// Post was created (disabled and hidden).
    PostCreated(PostCreatedData),

    /// Post was cleared for edits and publication.
    PostEnabled(PostEnabledData),

    /// Post was frozen.
    PostDisabled(PostDisabledData),

    /// Post went live.
    PostPublished(PostPublishedData),

    /// Post was taken off the public surface.
    PostHidden(PostHiddenData),

    /// Post body was replaced.
    PostContentUpdated(PostContentUpdatedData),
}

impl DomainEvent for PostEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PostEvent::PostCreated(_) => "PostCreated",
            PostEvent::PostEnabled(_) => "PostEnabled",
            PostEvent::PostDisabled(_) => "PostDisabled",
            PostEvent::PostPublished(_) => "PostPublished",
            PostEvent::PostHidden(_) => "PostHidden",
            PostEvent::PostContentUpdated(_) => "PostContentUpdated",
        }
    }
}

/// Data for PostCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostCreatedData {
    pub post_id: AggregateId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Data for PostEnabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostEnabledData {
    pub enabled_at: DateTime<Utc>,
}

/// Data for PostDisabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDisabledData {
    pub disabled_at: DateTime<Utc>,
}

/// Data for PostPublished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPublishedData {
    pub published_at: DateTime<Utc>,
}

/// Data for PostHidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostHiddenData {
    pub hidden_at: DateTime<Utc>,
}

/// Data for PostContentUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostContentUpdatedData {
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl PostEvent {
    pub fn post_created(
        post_id: AggregateId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        PostEvent::PostCreated(PostCreatedData {
            post_id,
            title: title.into(),
            content: content.into(),
            created_at: Utc::now(),
        })
    }

    pub fn post_enabled() -> Self {
        PostEvent::PostEnabled(PostEnabledData {
            enabled_at: Utc::now(),
        })
    }

    pub fn post_disabled() -> Self {
        PostEvent::PostDisabled(PostDisabledData {
            disabled_at: Utc::now(),
        })
    }

    pub fn post_published() -> Self {
        PostEvent::PostPublished(PostPublishedData {
            published_at: Utc::now(),
        })
    }

    pub fn post_hidden() -> Self {
        PostEvent::PostHidden(PostHiddenData {
            hidden_at: Utc::now(),
        })
    }

    pub fn post_content_updated(content: impl Into<String>) -> Self {
        PostEvent::PostContentUpdated(PostContentUpdatedData {
            content: content.into(),
            updated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_tags() {
        let id = AggregateId::new();
        assert_eq!(
            PostEvent::post_created(id, "Title", "Body").event_type(),
            "PostCreated"
        );
        assert_eq!(PostEvent::post_enabled().event_type(), "PostEnabled");
        assert_eq!(PostEvent::post_disabled().event_type(), "PostDisabled");
        assert_eq!(PostEvent::post_published().event_type(), "PostPublished");
        assert_eq!(PostEvent::post_hidden().event_type(), "PostHidden");
        assert_eq!(
            PostEvent::post_content_updated("new").event_type(),
            "PostContentUpdated"
        );
    }

    #[test]
    fn created_event_roundtrips() {
        let id = AggregateId::new();
        let event = PostEvent::post_created(id, "Title", "Body");

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("PostCreated"));

        let back: PostEvent = serde_json::from_str(&json).unwrap();
        match back {
            PostEvent::PostCreated(data) => {
                assert_eq!(data.post_id, id);
                assert_eq!(data.title, "Title");
                assert_eq!(data.content, "Body");
            }
            other => panic!("expected PostCreated, got {other:?}"),
        }
    }

    #[test]
    fn content_update_roundtrips() {
        let event = PostEvent::post_content_updated("rewritten");
        let json = serde_json::to_string(&event).unwrap();
        let back: PostEvent = serde_json::from_str(&json).unwrap();
        match back {
            PostEvent::PostContentUpdated(data) => assert_eq!(data.content, "rewritten"),
            other => panic!("expected PostContentUpdated, got {other:?}"),
        }
    }
}
