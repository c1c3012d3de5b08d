//! Feed configuration

use serde::{Deserialize, Serialize};

use super::CommentStatus;
use crate::error::{FeedError, FeedResult};

/// Largest page the feed will ask the source for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Per-feed configuration.
///
/// # Default
///
/// `page_size = 20`, showing approved and pending comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedConfig {
    /// Number of comments requested per page.
    pub page_size: u32,
    /// Statuses shown by this view; comments moved to any other status leave the feed.
    pub visible_statuses: Vec<CommentStatus>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            visible_statuses: vec![CommentStatus::Approved, CommentStatus::Pending],
        }
    }
}

impl FeedConfig {
    /// Clamp `page_size` to `1..=MAX_PAGE_SIZE` and dedup the status list.
    pub fn validated(&self) -> FeedResult<Self> {
        if self.visible_statuses.is_empty() {
            return Err(FeedError::ValidationError(
                "visibleStatuses cannot be empty".to_string(),
            ));
        }
        let mut visible_statuses = self.visible_statuses.clone();
        visible_statuses.sort();
        visible_statuses.dedup();

        Ok(Self {
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
            visible_statuses,
        })
    }

    pub fn is_visible(&self, status: CommentStatus) -> bool {
        self.visible_statuses.contains(&status)
    }
}
