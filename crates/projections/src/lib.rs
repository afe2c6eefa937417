//! Query side of the post service.
//!
//! Events flow from the store through the [`ProjectionProcessor`] into
//! read-model views. Consumers reach the views through [`PostQueries`]
//! (`list_all` / `get_by_id`), never through the command path.

pub mod error;
pub mod processor;
pub mod projection;
pub mod query;
pub mod views;

pub use error::{ProjectionError, Result};
pub use processor::ProjectionProcessor;
pub use projection::{Projection, ProjectionPosition};
pub use query::{PostQueries, PostSummary};
pub use views::PostDirectoryView;
