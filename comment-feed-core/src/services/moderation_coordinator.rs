//! 评论审核（乐观更新 + 失败回滚）

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{FeedError, FeedResult};
use crate::services::FeedContext;
use crate::types::{Comment, CommentId, CommentStatus, ModerationReceipt};

/// Applies status changes to the store before the server confirms them and
/// reverts them when it doesn't.
///
/// Requests for the same comment run one after another in arrival order;
/// requests for different comments don't wait on each other.
pub struct ModerationCoordinator {
    ctx: Arc<FeedContext>,
    gates: Mutex<HashMap<CommentId, Arc<Mutex<()>>>>,
}

impl ModerationCoordinator {
    #[must_use]
    pub fn new(ctx: Arc<FeedContext>) -> Self {
        Self {
            ctx,
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Move a comment to `status`.
    ///
    /// Any status can move to any other. Re-applying the current status is a
    /// local no-op and never reaches the server.
    pub async fn apply(&self, id: CommentId, status: CommentStatus) -> FeedResult<ModerationReceipt> {
        let gate = self.acquire_gate(id).await;
        let result = {
            let _turn = gate.lock().await;
            self.apply_in_turn(id, status).await
        };
        self.release_gate(id, gate).await;
        result
    }

    /// Number of comments with a moderation request queued or in flight.
    pub async fn in_flight(&self) -> usize {
        self.gates.lock().await.len()
    }

    async fn apply_in_turn(
        &self,
        id: CommentId,
        status: CommentStatus,
    ) -> FeedResult<ModerationReceipt> {
        self.ctx.ensure_open()?;

        let (previous, removed) = {
            let mut store = self.ctx.store.write().await;
            let previous = store.apply_status(id, status)?;
            if previous == status {
                return Ok(ModerationReceipt {
                    comment_id: id,
                    previous,
                    current: status,
                    removed: false,
                });
            }
            let removed = if self.ctx.config.is_visible(status) {
                None
            } else {
                Some(store.remove(id)?)
            };
            (previous, removed)
        };

        let outcome = self.ctx.source.set_status(id, status).await;
        self.ctx.ensure_open()?;

        match outcome {
            Ok(()) => {
                log::info!("Comment {id} moved from {previous} to {status}");
                Ok(ModerationReceipt {
                    comment_id: id,
                    previous,
                    current: status,
                    removed: removed.is_some(),
                })
            }
            Err(e) => {
                self.rollback(id, previous, removed).await;
                let message = match e {
                    FeedError::NetworkFailure { message, .. } => message,
                    other => other.to_string(),
                };
                Err(FeedError::NetworkFailure {
                    comment_id: Some(id),
                    message,
                })
            }
        }
    }

    async fn rollback(
        &self,
        id: CommentId,
        previous: CommentStatus,
        removed: Option<(usize, Comment)>,
    ) {
        let mut store = self.ctx.store.write().await;
        match removed {
            Some((pos, mut comment)) => {
                comment.status = previous;
                let restored = store.restore(comment, Some(pos));
                log::warn!("Moderation of comment {id} failed, restored at position {restored}");
            }
            None => match store.apply_status(id, previous) {
                Ok(_) => log::warn!("Moderation of comment {id} failed, status reverted to {previous}"),
                Err(e) => log::warn!("Moderation of comment {id} failed and it is gone: {e}"),
            },
        }
    }

    async fn acquire_gate(&self, id: CommentId) -> Arc<Mutex<()>> {
        let mut gates = self.gates.lock().await;
        Arc::clone(gates.entry(id).or_default())
    }

    async fn release_gate(&self, id: CommentId, gate: Arc<Mutex<()>>) {
        let mut gates = self.gates.lock().await;
        drop(gate);
        // Only the map's own handle left: nobody is queued behind us.
        if gates.get(&id).is_some_and(|g| Arc::strong_count(g) == 1) {
            gates.remove(&id);
        }
    }
}
