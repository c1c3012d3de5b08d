//! 业务逻辑服务层

mod feed_controller;
mod moderation_coordinator;
mod page_reconciler;
mod selection_tracker;

pub use feed_controller::FeedController;
pub use moderation_coordinator::ModerationCoordinator;
pub use page_reconciler::PageReconciler;
pub use selection_tracker::SelectionTracker;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{FeedError, FeedResult};
use crate::store::CommentStore;
use crate::traits::CommentSource;
use crate::types::FeedConfig;

/// 服务上下文 - 持有一个评论流的全部状态与依赖
///
/// One context per displayed feed. Locks are never held across a call into
/// the comment source.
pub struct FeedContext {
    /// 评论来源（网络层）
    pub source: Arc<dyn CommentSource>,
    /// 已加载的评论
    pub store: RwLock<CommentStore>,
    /// 已校验的配置
    pub config: FeedConfig,
    closed: AtomicBool,
}

impl FeedContext {
    /// 创建服务上下文
    pub fn new(source: Arc<dyn CommentSource>, config: &FeedConfig) -> FeedResult<Self> {
        Ok(Self {
            source,
            store: RwLock::new(CommentStore::new()),
            config: config.validated()?,
            closed: AtomicBool::new(false),
        })
    }

    /// Invalidate every pending completion of this feed.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn ensure_open(&self) -> FeedResult<()> {
        if self.is_closed() {
            Err(FeedError::FeedClosed)
        } else {
            Ok(())
        }
    }
}
