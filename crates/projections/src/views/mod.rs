//! Read model views.

mod post_directory;

pub use post_directory::PostDirectoryView;
