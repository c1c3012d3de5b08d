//! Comment Feed Core Library
//!
//! Keeps a blog's comments as an incrementally loaded, moderated list:
//! - ordered, deduplicated store fed page by page
//! - navigation to a "wanted" comment that may not be loaded yet
//! - a sticky selection that survives refreshes and moderation
//! - optimistic moderation with rollback
//!
//! Network access and rendering stay outside, behind the [`CommentSource`]
//! and [`FeedDelegate`] traits.

pub mod error;
pub mod services;
pub mod store;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{FeedError, FeedResult};
pub use services::FeedController;
pub use store::CommentStore;
pub use traits::{CommentSource, FeedDelegate};
