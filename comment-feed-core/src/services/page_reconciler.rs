//! 分页加载与合并

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::error::{FeedError, FeedResult};
use crate::services::FeedContext;
use crate::types::{CommentId, FetchedPage, MergeDelta, PageCursor, PageToken};

/// Pulls pages from the comment source and merges them into the store.
///
/// Fetches take turns on `fetch_turn`, so page requests reach the source in
/// the order they were issued and are merged in that same order. The cursor
/// itself is only locked for short reads and updates, never across a fetch,
/// so readers and moderation don't wait on paging.
pub struct PageReconciler {
    ctx: Arc<FeedContext>,
    fetch_turn: Mutex<()>,
    cursor: RwLock<PageCursor>,
}

impl PageReconciler {
    #[must_use]
    pub fn new(ctx: Arc<FeedContext>) -> Self {
        Self {
            ctx,
            fetch_turn: Mutex::new(()),
            cursor: RwLock::new(PageCursor::fresh()),
        }
    }

    /// Fetch and merge the next page.
    ///
    /// A failed fetch leaves cursor and store untouched, so the call can be
    /// repeated as-is. Nothing is retried here.
    pub async fn request_next_page(&self) -> FeedResult<MergeDelta> {
        let _turn = self.fetch_turn.lock().await;
        self.ctx.ensure_open()?;

        let token: Option<PageToken> = {
            let cursor = self.cursor.read().await;
            if cursor.is_exhausted() {
                return Err(FeedError::AlreadyExhausted);
            }
            cursor.token().cloned()
        };

        let page = self
            .ctx
            .source
            .fetch_page(token.as_ref(), self.ctx.config.page_size)
            .await?;
        self.ctx.ensure_open()?;

        Ok(self.apply_page(page, false).await)
    }

    /// Re-fetch the first page and restart paging after it.
    ///
    /// Already loaded comments stay in the store; the pages that follow are
    /// merged again as they come.
    pub async fn refresh(&self) -> FeedResult<MergeDelta> {
        let _turn = self.fetch_turn.lock().await;
        self.ctx.ensure_open()?;

        let page = self
            .ctx
            .source
            .fetch_page(None, self.ctx.config.page_size)
            .await?;
        self.ctx.ensure_open()?;

        Ok(self.apply_page(page, true).await)
    }

    /// Whether paging should go on to find `target`.
    pub async fn should_continue(&self, target: Option<CommentId>) -> bool {
        let Some(target) = target else {
            return false;
        };
        let cursor = self.cursor.read().await;
        if cursor.is_exhausted() {
            return false;
        }
        !self.ctx.store.read().await.contains(target)
    }

    pub async fn is_exhausted(&self) -> bool {
        self.cursor.read().await.is_exhausted()
    }

    pub async fn pages_loaded(&self) -> u32 {
        self.cursor.read().await.pages_loaded()
    }

    /// Merge a fetched page and advance the cursor in one step.
    ///
    /// Lock order: cursor, then store.
    async fn apply_page(&self, page: FetchedPage, restart: bool) -> MergeDelta {
        let received = page.comments.len();
        let short_page = received < self.ctx.config.page_size as usize;

        let (visible, hidden): (Vec<_>, Vec<_>) = page
            .comments
            .into_iter()
            .partition(|c| self.ctx.config.is_visible(c.status));

        let mut cursor = self.cursor.write().await;
        let mut delta = {
            let mut store = self.ctx.store.write().await;
            let mut delta = store.merge(visible);
            // Re-synced comments the view no longer shows.
            for comment in hidden {
                if store.remove(comment.id).is_ok() {
                    delta.removed.insert(comment.id);
                }
            }
            delta
        };
        delta.inserted.retain(|id| !delta.removed.contains(id));

        if restart {
            *cursor = PageCursor::fresh();
        }
        cursor.advance(page.next_cursor, page.exhausted || short_page);
        log::debug!(
            "Merged page {}: {} received, {} inserted, {} updated, {} removed, exhausted={}",
            cursor.pages_loaded(),
            received,
            delta.inserted.len(),
            delta.updated.len(),
            delta.removed.len(),
            cursor.is_exhausted()
        );
        delta
    }
}
