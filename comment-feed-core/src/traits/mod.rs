//! Collaborator abstraction trait definition

mod comment_source;
mod feed_delegate;

pub use comment_source::CommentSource;
pub use feed_delegate::{FeedDelegate, NoopFeedDelegate};
