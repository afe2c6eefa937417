//! Post commands.

use common::AggregateId;

use crate::command::Command;

use super::Post;

/// Every post command kind, in registration order. Bus construction verifies
/// each one has a handler.
pub const POST_COMMAND_KINDS: &[&str] = &[
    CreatePost::NAME,
    EnablePost::NAME,
    DisablePost::NAME,
    PublishPost::NAME,
    HidePost::NAME,
    UpdatePostContent::NAME,
];

/// Creates a new post. Dispatch returns the new identifier.
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub post_id: AggregateId,
    pub title: String,
    pub content: String,
}

impl CreatePost {
    /// Creates the command with a generated post id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(AggregateId::new(), title, content)
    }

    /// Creates the command targeting a caller-supplied id.
    pub fn with_id(
        post_id: AggregateId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            post_id,
            title: title.into(),
            content: content.into(),
        }
    }
}

impl Command for CreatePost {
    type Aggregate = Post;
    type Output = AggregateId;
    const NAME: &'static str = "CreatePost";

    fn aggregate_id(&self) -> AggregateId {
        self.post_id
    }
}

/// Clears a post for edits and publication.
#[derive(Debug, Clone)]
pub struct EnablePost {
    pub post_id: AggregateId,
}

impl EnablePost {
    pub fn new(post_id: AggregateId) -> Self {
        Self { post_id }
    }
}

impl Command for EnablePost {
    type Aggregate = Post;
    type Output = ();
    const NAME: &'static str = "EnablePost";

    fn aggregate_id(&self) -> AggregateId {
        self.post_id
    }
}

/// Freezes a post.
#[derive(Debug, Clone)]
pub struct DisablePost {
    pub post_id: AggregateId,
}

impl DisablePost {
    pub fn new(post_id: AggregateId) -> Self {
        Self { post_id }
    }
}

impl Command for DisablePost {
    type Aggregate = Post;
    type Output = ();
    const NAME: &'static str = "DisablePost";

    fn aggregate_id(&self) -> AggregateId {
        self.post_id
    }
}

/// Takes a post live.
#[derive(Debug, Clone)]
pub struct PublishPost {
    pub post_id: AggregateId,
}

impl PublishPost {
    pub fn new(post_id: AggregateId) -> Self {
        Self { post_id }
    }
}

impl Command for PublishPost {
    type Aggregate = Post;
    type Output = ();
    const NAME: &'static str = "PublishPost";

    fn aggregate_id(&self) -> AggregateId {
        self.post_id
    }
}

/// Takes a post off the public surface.
#[derive(Debug, Clone)]
pub struct HidePost {
    pub post_id: AggregateId,
}

impl HidePost {
    pub fn new(post_id: AggregateId) -> Self {
        Self { post_id }
    }
}

impl Command for HidePost {
    type Aggregate = Post;
    type Output = ();
    const NAME: &'static str = "HidePost";

    fn aggregate_id(&self) -> AggregateId {
        self.post_id
    }
}

/// Replaces a post's body.
#[derive(Debug, Clone)]
pub struct UpdatePostContent {
    pub post_id: AggregateId,
    pub content: String,
}

impl UpdatePostContent {
    pub fn new(post_id: AggregateId, content: impl Into<String>) -> Self {
        Self {
            post_id,
            content: content.into(),
        }
    }
}

impl Command for UpdatePostContent {
    type Aggregate = Post;
    type Output = ();
    const NAME: &'static str = "UpdatePostContent";

    fn aggregate_id(&self) -> AggregateId {
        self.post_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_post_generates_an_id() {
        let cmd = CreatePost::new("Title", "Body");
        assert_eq!(cmd.aggregate_id(), cmd.post_id);
        assert_eq!(cmd.title, "Title");
    }

    #[test]
    fn create_post_with_id_keeps_the_id() {
        let id = AggregateId::new();
        let cmd = CreatePost::with_id(id, "Title", "Body");
        assert_eq!(cmd.aggregate_id(), id);
    }

    #[test]
    fn mutation_commands_target_their_post() {
        let id = AggregateId::new();
        assert_eq!(EnablePost::new(id).aggregate_id(), id);
        assert_eq!(DisablePost::new(id).aggregate_id(), id);
        assert_eq!(PublishPost::new(id).aggregate_id(), id);
        assert_eq!(HidePost::new(id).aggregate_id(), id);
        assert_eq!(UpdatePostContent::new(id, "x").aggregate_id(), id);
    }

    #[test]
    fn command_kinds_are_distinct() {
        let mut kinds = POST_COMMAND_KINDS.to_vec();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), POST_COMMAND_KINDS.len());
    }
}
