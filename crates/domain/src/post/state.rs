//! The two independent state axes of a post.
//!
//! Moderation (may the post be worked with at all) and visibility (is it
//! live for readers) move separately: publishing requires an enabled post,
//! but disabling a published post does not hide it.

use serde::{Deserialize, Serialize};

/// Whether the post is cleared for changes and publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Moderation {
    /// Frozen: content updates and publication are rejected. The state every
    /// post starts in.
    #[default]
    Disabled,

    /// Cleared for edits and publication.
    Enabled,
}

impl Moderation {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Moderation::Enabled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Moderation::Disabled => "Disabled",
            Moderation::Enabled => "Enabled",
        }
    }
}

impl std::fmt::Display for Moderation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the post is live for readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Visibility {
    /// Not visible to readers. The state every post starts in.
    #[default]
    Hidden,

    /// Live.
    Published,
}

impl Visibility {
    pub fn is_published(&self) -> bool {
        matches!(self, Visibility::Published)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Hidden => "Hidden",
            Visibility::Published => "Published",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
