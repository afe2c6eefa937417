//! Post aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod handlers;
mod state;

pub use aggregate::Post;
pub use commands::{
    CreatePost, DisablePost, EnablePost, HidePost, POST_COMMAND_KINDS, PublishPost,
    UpdatePostContent,
};
pub use events::{
    PostContentUpdatedData, PostCreatedData, PostDisabledData, PostEnabledData, PostEvent,
    PostHiddenData, PostPublishedData,
};
pub use handlers::{
    CreatePostHandler, DisablePostHandler, EnablePostHandler, HidePostHandler,
    PublishPostHandler, UpdatePostContentHandler, register_post_handlers,
};
pub use state::{Moderation, Visibility};

use thiserror::Error;

/// Rule violations raised by post command methods.
///
/// Every variant carries human-readable text; the boundary forwards it to
/// the caller verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostError {
    /// A post with the targeted id already exists.
    #[error("a post with this id already exists")]
    AlreadyCreated,

    /// Creation requires a title.
    #[error("post title must not be empty")]
    EmptyTitle,

    /// Enable requested on an enabled post.
    #[error("post is already enabled")]
    AlreadyEnabled,

    /// Disable requested on a disabled post.
    #[error("post is already disabled")]
    AlreadyDisabled,

    /// The requested action needs the post to be enabled first.
    #[error("cannot {action} a disabled post")]
    Disabled { action: &'static str },

    /// Publish requested on a published post.
    #[error("post is already published")]
    AlreadyPublished,

    /// Hide requested on a post that is not visible.
    #[error("cannot hide a post that is not published")]
    NotPublished,
}
