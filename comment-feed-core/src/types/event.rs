//! Delegate notifications as data

use serde::{Deserialize, Serialize};

use super::{CommentId, CommentStatus};

/// One delegate notification, for delegates that queue or record events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FeedEvent {
    SelectionResolved {
        comment_id: CommentId,
    },
    SelectionAbandoned {
        comment_id: CommentId,
    },
    ModerationApplied {
        comment_id: CommentId,
        status: CommentStatus,
    },
    ModerationFailed {
        comment_id: CommentId,
        reason: String,
    },
}
