//! Delegate that only logs.

use comment_feed_core::traits::FeedDelegate;
use comment_feed_core::types::{CommentId, CommentStatus};

/// Default delegate for hosts that have no rendering layer hooked up yet.
pub struct LoggingFeedDelegate;

impl FeedDelegate for LoggingFeedDelegate {
    fn notify_selection_resolved(&self, id: CommentId) {
        log::info!("Scrolled to comment {id}");
    }

    fn notify_selection_abandoned(&self, id: CommentId) {
        log::warn!("Comment {id} is no longer available");
    }

    fn notify_moderation_applied(&self, id: CommentId, status: CommentStatus) {
        log::info!("Comment {id} is now {status}");
    }

    fn notify_moderation_failed(&self, id: CommentId, reason: &str) {
        log::error!("Moderating comment {id} failed: {reason}");
    }
}
