//! Rendering-layer callbacks

use crate::types::{CommentId, CommentStatus};

/// Feed Delegate Trait
///
/// Implemented by the rendering layer to scroll to a row, flash a highlight or
/// show an error affordance. Called without any feed lock held.
pub trait FeedDelegate: Send + Sync {
    /// The wanted comment was loaded and is now the selection
    fn notify_selection_resolved(&self, id: CommentId);

    /// The feed ran out before the wanted comment appeared
    fn notify_selection_abandoned(&self, id: CommentId);

    /// A moderation change was confirmed by the server
    fn notify_moderation_applied(&self, id: CommentId, status: CommentStatus);

    /// A moderation change failed and was rolled back
    fn notify_moderation_failed(&self, id: CommentId, reason: &str);
}

/// Delegate that ignores every notification.
pub struct NoopFeedDelegate;

impl FeedDelegate for NoopFeedDelegate {
    fn notify_selection_resolved(&self, _id: CommentId) {}

    fn notify_selection_abandoned(&self, _id: CommentId) {}

    fn notify_moderation_applied(&self, _id: CommentId, _status: CommentStatus) {}

    fn notify_moderation_failed(&self, _id: CommentId, _reason: &str) {}
}
