//! 选中/跳转相关类型定义

use serde::{Deserialize, Serialize};

use super::CommentId;

/// Progress of the one-shot "wanted comment" search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "commentId", rename_all = "camelCase")]
pub enum SearchState {
    /// No pending target
    #[default]
    Idle,
    /// Target set, not loaded yet
    Searching(CommentId),
    /// Target found; it became the last selected comment
    Resolved(CommentId),
    /// Feed ran out before the target showed up
    Abandoned(CommentId),
}

impl SearchState {
    /// The pending target, if a search is in progress.
    pub fn target(self) -> Option<CommentId> {
        match self {
            Self::Searching(id) => Some(id),
            _ => None,
        }
    }
}

/// Terminal result of a search, reported exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Resolved(CommentId),
    Abandoned(CommentId),
}

/// Result of `FeedController::show_comment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The comment is loaded and selected
    Found(CommentId),
    /// A newer `show_comment` call replaced this target
    Superseded,
}
