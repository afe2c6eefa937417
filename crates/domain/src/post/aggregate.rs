//! Post aggregate implementation.

use common::AggregateId;
use event_store::Version;
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;

use super::{
    Moderation, PostError, PostEvent, Visibility,
    events::{PostContentUpdatedData, PostCreatedData},
};

/// Post aggregate root.
///
/// A post is created disabled and hidden. Moderation gates everything else:
/// a disabled post can be enabled but not edited or published. Visibility
/// toggles between hidden and published once the post is enabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    id: Option<AggregateId>,

    #[serde(default)]
    version: Version,

    title: String,

    content: String,

    moderation: Moderation,

    visibility: Visibility,
}

impl Aggregate for Post {
    type Event = PostEvent;
    type Error = PostError;

    fn aggregate_type() -> &'static str {
        "Post"
    }

    fn id(&self) -> Option<AggregateId> {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            PostEvent::PostCreated(data) => self.apply_created(data),
            PostEvent::PostEnabled(_) => self.moderation = Moderation::Enabled,
            PostEvent::PostDisabled(_) => self.moderation = Moderation::Disabled,
            PostEvent::PostPublished(_) => self.visibility = Visibility::Published,
            PostEvent::PostHidden(_) => self.visibility = Visibility::Hidden,
            PostEvent::PostContentUpdated(data) => self.apply_content_updated(data),
        }
    }
}

// Query methods
impl Post {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn moderation(&self) -> Moderation {
        self.moderation
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

// Command methods (return events)
impl Post {
    /// Creates the post. The new post is disabled and hidden.
    pub fn create(
        &self,
        post_id: AggregateId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Vec<PostEvent>, PostError> {
        if self.id.is_some() {
            return Err(PostError::AlreadyCreated);
        }

        let title = title.into();
        if title.trim().is_empty() {
            return Err(PostError::EmptyTitle);
        }

        Ok(vec![PostEvent::post_created(post_id, title, content)])
    }

    /// Clears the post for edits and publication.
    pub fn enable(&self) -> Result<Vec<PostEvent>, PostError> {
        if self.moderation.is_enabled() {
            return Err(PostError::AlreadyEnabled);
        }

        Ok(vec![PostEvent::post_enabled()])
    }

    /// Freezes the post. A published post stays published; rendering a
    /// disabled post is the reader surface's concern.
    pub fn disable(&self) -> Result<Vec<PostEvent>, PostError> {
        if !self.moderation.is_enabled() {
            return Err(PostError::AlreadyDisabled);
        }

        Ok(vec![PostEvent::post_disabled()])
    }

    /// Takes the post live. Requires the post to be enabled.
    pub fn publish(&self) -> Result<Vec<PostEvent>, PostError> {
        if !self.moderation.is_enabled() {
            return Err(PostError::Disabled { action: "publish" });
        }

        if self.visibility.is_published() {
            return Err(PostError::AlreadyPublished);
        }

        Ok(vec![PostEvent::post_published()])
    }

    /// Takes the post off the public surface.
    pub fn hide(&self) -> Result<Vec<PostEvent>, PostError> {
        if !self.visibility.is_published() {
            return Err(PostError::NotPublished);
        }

        Ok(vec![PostEvent::post_hidden()])
    }

    /// Replaces the body. Requires the post to be enabled.
    ///
    /// Replacing the body with identical text produces no event.
    pub fn update_content(&self, content: impl Into<String>) -> Result<Vec<PostEvent>, PostError> {
        if !self.moderation.is_enabled() {
            return Err(PostError::Disabled {
                action: "update the content of",
            });
        }

        let content = content.into();
        if content == self.content {
            return Ok(vec![]);
        }

        Ok(vec![PostEvent::post_content_updated(content)])
    }
}

// Apply helpers
impl Post {
    fn apply_created(&mut self, data: PostCreatedData) {
        self.id = Some(data.post_id);
        self.title = data.title;
        self.content = data.content;
        self.moderation = Moderation::Disabled;
        self.visibility = Visibility::Hidden;
    }

    fn apply_content_updated(&mut self, data: PostContentUpdatedData) {
        self.content = data.content;
    }
}
