//! Delegate that forwards notifications to a render loop.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use comment_feed_core::traits::FeedDelegate;
use comment_feed_core::types::{CommentId, CommentStatus, FeedEvent};

/// Queues every notification as a `FeedEvent` on an unbounded channel.
///
/// Events sent after the receiver is dropped are discarded.
pub struct ChannelFeedDelegate {
    tx: UnboundedSender<FeedEvent>,
}

impl ChannelFeedDelegate {
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<FeedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: FeedEvent) {
        if let Err(e) = self.tx.send(event) {
            log::debug!("Feed event dropped, receiver is gone: {:?}", e.0);
        }
    }
}

impl FeedDelegate for ChannelFeedDelegate {
    fn notify_selection_resolved(&self, id: CommentId) {
        self.send(FeedEvent::SelectionResolved { comment_id: id });
    }

    fn notify_selection_abandoned(&self, id: CommentId) {
        self.send(FeedEvent::SelectionAbandoned { comment_id: id });
    }

    fn notify_moderation_applied(&self, id: CommentId, status: CommentStatus) {
        self.send(FeedEvent::ModerationApplied {
            comment_id: id,
            status,
        });
    }

    fn notify_moderation_failed(&self, id: CommentId, reason: &str) {
        self.send(FeedEvent::ModerationFailed {
            comment_id: id,
            reason: reason.to_string(),
        });
    }
}
