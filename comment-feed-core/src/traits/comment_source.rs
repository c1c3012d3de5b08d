//! Comment source abstract Trait

use async_trait::async_trait;

use crate::error::FeedResult;
use crate::types::{CommentId, CommentStatus, FetchedPage, PageToken};

/// Network/paging collaborator
///
/// Transport, authentication, retries and timeouts all live behind this trait;
/// the feed only sees successes and `FeedError::NetworkFailure`.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch one page of comments, newest first
    ///
    /// # Arguments
    /// * `cursor` - Token from the previous page, `None` for the first page
    /// * `page_size` - Number of comments requested
    async fn fetch_page(
        &self,
        cursor: Option<&PageToken>,
        page_size: u32,
    ) -> FeedResult<FetchedPage>;

    /// Persist a moderation decision
    ///
    /// # Arguments
    /// * `id` - Comment ID
    /// * `status` - new status
    async fn set_status(&self, id: CommentId, status: CommentStatus) -> FeedResult<()>;
}
