//! 评论流控制器

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{FeedError, FeedResult};
use crate::services::{FeedContext, ModerationCoordinator, PageReconciler, SelectionTracker};
use crate::traits::{CommentSource, FeedDelegate};
use crate::types::{
    BatchModerationResult, Comment, CommentId, CommentStatus, FeedConfig, MergeDelta,
    ModerationFailure, ModerationReceipt, Navigation, SearchState, SelectionOutcome,
};

/// One displayed comment feed.
///
/// Owns the store, the paging cursor and the selection state; the rendering
/// layer reads snapshots and hears back through the [`FeedDelegate`].
pub struct FeedController {
    ctx: Arc<FeedContext>,
    reconciler: PageReconciler,
    moderation: ModerationCoordinator,
    selection: RwLock<SelectionTracker>,
    delegate: Arc<dyn FeedDelegate>,
}

impl FeedController {
    /// 创建评论流
    pub fn new(
        source: Arc<dyn CommentSource>,
        delegate: Arc<dyn FeedDelegate>,
        config: &FeedConfig,
    ) -> FeedResult<Self> {
        let ctx = Arc::new(FeedContext::new(source, config)?);
        Ok(Self {
            reconciler: PageReconciler::new(Arc::clone(&ctx)),
            moderation: ModerationCoordinator::new(Arc::clone(&ctx)),
            selection: RwLock::new(SelectionTracker::new()),
            delegate,
            ctx,
        })
    }

    /// Load the next page (infinite scroll).
    pub async fn load_next_page(&self) -> FeedResult<MergeDelta> {
        match self.reconciler.request_next_page().await {
            Ok(delta) => {
                self.after_store_change(!delta.removed.is_empty()).await;
                Ok(delta)
            }
            Err(e) => Err(surface(e)),
        }
    }

    /// Pull-to-refresh / background re-sync.
    pub async fn refresh(&self) -> FeedResult<MergeDelta> {
        match self.reconciler.refresh().await {
            Ok(delta) => {
                self.after_store_change(!delta.removed.is_empty()).await;
                Ok(delta)
            }
            Err(e) => Err(surface(e)),
        }
    }

    /// Navigate to a comment, paging until it is loaded or the feed runs out.
    ///
    /// A fetch failure ends the call but keeps the search pending; the next
    /// page load that brings the comment in still resolves it.
    pub async fn show_comment(&self, id: CommentId) -> FeedResult<Navigation> {
        self.ctx.ensure_open()?;
        self.selection.write().await.set_wanted(id);
        self.after_store_change(false).await;

        loop {
            self.ctx.ensure_open()?;
            let state = self.selection.read().await.state();
            match state {
                SearchState::Searching(target) if target == id => {}
                SearchState::Resolved(target) if target == id => {
                    return Ok(Navigation::Found(id));
                }
                SearchState::Abandoned(target) if target == id => {
                    return Err(surface(FeedError::TargetNotFound(id)));
                }
                _ => return Ok(Navigation::Superseded),
            }

            if self.reconciler.should_continue(Some(id)).await {
                match self.load_next_page().await {
                    // Another caller reached the end first; the next sync abandons.
                    Ok(_) | Err(FeedError::AlreadyExhausted) => {}
                    Err(e) => return Err(e),
                }
            } else {
                self.after_store_change(false).await;
            }
        }
    }

    /// Drop a pending `show_comment` target without an outcome.
    pub async fn cancel_navigation(&self) -> Option<CommentId> {
        self.selection.write().await.cancel_wanted()
    }

    /// The user picked a row.
    pub async fn select(&self, id: CommentId) {
        self.selection.write().await.on_user_select(id);
    }

    /// Moderate one comment, optimistically.
    pub async fn moderate(
        &self,
        id: CommentId,
        status: CommentStatus,
    ) -> FeedResult<ModerationReceipt> {
        match self.moderation.apply(id, status).await {
            Ok(receipt) => {
                if receipt.removed {
                    self.after_store_change(true).await;
                }
                if receipt.previous != receipt.current {
                    self.delegate.notify_moderation_applied(id, status);
                }
                Ok(receipt)
            }
            Err(e @ FeedError::NetworkFailure { .. }) => {
                self.delegate.notify_moderation_failed(id, &e.to_string());
                Err(surface(e))
            }
            Err(e) => Err(surface(e)),
        }
    }

    /// Moderate with a status name as typed by a caller (`"approve"`, `"spam"`, ...).
    pub async fn moderate_named(
        &self,
        id: CommentId,
        status: &str,
    ) -> FeedResult<ModerationReceipt> {
        let status = status.parse::<CommentStatus>().map_err(surface)?;
        self.moderate(id, status).await
    }

    /// Bulk moderation. Every id is attempted; failures are collected.
    pub async fn moderate_many(
        &self,
        ids: Vec<CommentId>,
        status: CommentStatus,
    ) -> FeedResult<BatchModerationResult> {
        self.ctx.ensure_open()?;

        let futures: Vec<_> = ids
            .into_iter()
            .map(|id| async move { (id, self.moderate(id, status).await) })
            .collect();
        let results = futures::future::join_all(futures).await;

        let mut success_count = 0;
        let mut failures = Vec::new();
        for (comment_id, result) in results {
            match result {
                Ok(_) => success_count += 1,
                Err(e) => failures.push(ModerationFailure {
                    comment_id,
                    reason: e.to_string(),
                }),
            }
        }

        Ok(BatchModerationResult {
            success_count,
            failed_count: failures.len(),
            failures,
        })
    }

    /// Tear the feed down. Completions still in flight become no-ops.
    pub fn teardown(&self) {
        self.ctx.close();
        log::info!("Comment feed torn down");
    }

    pub fn is_closed(&self) -> bool {
        self.ctx.is_closed()
    }

    /// Loaded comments in display order.
    pub async fn snapshot(&self) -> Vec<Comment> {
        self.ctx.store.read().await.snapshot().cloned().collect()
    }

    pub async fn find(&self, id: CommentId) -> Option<Comment> {
        self.ctx.store.read().await.find(id).cloned()
    }

    pub async fn status_counts(&self) -> BTreeMap<CommentStatus, usize> {
        self.ctx.store.read().await.status_counts()
    }

    /// Loaded replies to `parent`, in display order.
    pub async fn replies_to(&self, parent: CommentId) -> Vec<Comment> {
        self.ctx.store.read().await.replies_to(parent).cloned().collect()
    }

    pub async fn last_selected(&self) -> Option<CommentId> {
        self.selection.read().await.last_selected()
    }

    pub async fn wanted(&self) -> Option<CommentId> {
        self.selection.read().await.wanted()
    }

    pub async fn search_state(&self) -> SearchState {
        self.selection.read().await.state()
    }

    pub async fn is_exhausted(&self) -> bool {
        self.reconciler.is_exhausted().await
    }

    pub async fn pages_loaded(&self) -> u32 {
        self.reconciler.pages_loaded().await
    }

    /// Re-resolve both pointers after the store changed and tell the delegate
    /// about a finished search.
    async fn after_store_change(&self, entries_removed: bool) {
        if self.ctx.is_closed() {
            return;
        }
        let exhausted = self.reconciler.is_exhausted().await;

        let outcome = {
            let store = self.ctx.store.read().await;
            let mut selection = self.selection.write().await;
            if entries_removed {
                if let Some(id) = selection.resolve_last_selected(&store) {
                    log::debug!("Selected comment {id} left the feed");
                }
            }
            selection.on_store_changed(&store, exhausted)
        };

        match outcome {
            Some(SelectionOutcome::Resolved(id)) => {
                log::debug!("Wanted comment {id} loaded");
                self.delegate.notify_selection_resolved(id);
            }
            Some(SelectionOutcome::Abandoned(id)) => {
                log::warn!("Wanted comment {id} not found before the end of the feed");
                self.delegate.notify_selection_abandoned(id);
            }
            None => {}
        }
    }
}

fn surface(e: FeedError) -> FeedError {
    if e.is_expected() {
        log::warn!("{e}");
    } else {
        log::error!("{e}");
    }
    e
}
