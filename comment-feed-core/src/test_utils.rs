//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, Semaphore};

use crate::error::{FeedError, FeedResult};
use crate::services::{FeedContext, FeedController};
use crate::traits::{CommentSource, FeedDelegate};
use crate::types::{
    Comment, CommentId, CommentStatus, FeedConfig, FeedEvent, FetchedPage, PageToken,
};

const BASE_TIMESTAMP: i64 = 1_700_000_000;

// ===== Comment builders =====

/// Approved comment created `secs` seconds after a fixed base time.
pub fn comment_at(id: u64, secs: i64) -> Comment {
    Comment {
        id: CommentId(id),
        post_id: 1,
        parent_id: None,
        author: format!("author-{id}"),
        content: format!("comment {id}"),
        status: CommentStatus::Approved,
        created_at: DateTime::from_timestamp(BASE_TIMESTAMP + secs, 0).unwrap_or_default(),
        ordinal: None,
    }
}

/// Approved comment whose timestamp falls as the id grows, so ascending ids
/// are already in paging order.
pub fn comment(id: u64) -> Comment {
    comment_at(id, 100_000 - i64::try_from(id).unwrap_or_default())
}

/// Page of `comment(id)` entries. The mock source fills in the next cursor.
pub fn page(ids: &[u64], exhausted: bool) -> FetchedPage {
    FetchedPage {
        comments: ids.iter().map(|&id| comment(id)).collect(),
        next_cursor: None,
        exhausted,
    }
}

// ===== MockCommentSource =====

/// Scripted comment source. Page tokens are page indexes.
pub struct MockCommentSource {
    pages: RwLock<Vec<FetchedPage>>,
    /// 如果 Some，fetch_page 返回此错误
    fetch_error: RwLock<Option<String>>,
    /// 如果 Some，set_status 返回此错误
    status_error: RwLock<Option<String>>,
    fetch_gate: RwLock<Option<Arc<Semaphore>>>,
    status_gate: RwLock<Option<Arc<Semaphore>>>,
    fetch_calls: RwLock<Vec<Option<PageToken>>>,
    status_calls: RwLock<Vec<(CommentId, CommentStatus)>>,
}

impl MockCommentSource {
    pub fn new() -> Self {
        Self::with_pages(Vec::new())
    }

    pub fn with_pages(pages: Vec<FetchedPage>) -> Self {
        Self {
            pages: RwLock::new(pages),
            fetch_error: RwLock::new(None),
            status_error: RwLock::new(None),
            fetch_gate: RwLock::new(None),
            status_gate: RwLock::new(None),
            fetch_calls: RwLock::new(Vec::new()),
            status_calls: RwLock::new(Vec::new()),
        }
    }

    pub async fn push_page(&self, comments: Vec<Comment>) {
        self.pages.write().await.push(FetchedPage {
            comments,
            next_cursor: None,
            exhausted: false,
        });
    }

    pub async fn replace_page(&self, index: usize, comments: Vec<Comment>) {
        if let Some(page) = self.pages.write().await.get_mut(index) {
            page.comments = comments;
        }
    }

    pub async fn set_fetch_error(&self, err: Option<String>) {
        *self.fetch_error.write().await = err;
    }

    pub async fn set_status_error(&self, err: Option<String>) {
        *self.status_error.write().await = err;
    }

    /// From now on every fetch waits for a permit on the returned semaphore.
    pub async fn gate_fetches(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.fetch_gate.write().await = Some(Arc::clone(&gate));
        gate
    }

    /// From now on every status call waits for a permit on the returned semaphore.
    pub async fn gate_status_calls(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.status_gate.write().await = Some(Arc::clone(&gate));
        gate
    }

    pub async fn fetch_calls(&self) -> Vec<Option<PageToken>> {
        self.fetch_calls.read().await.clone()
    }

    pub async fn status_calls(&self) -> Vec<(CommentId, CommentStatus)> {
        self.status_calls.read().await.clone()
    }

    async fn pass(gate: &RwLock<Option<Arc<Semaphore>>>) {
        let gate = gate.read().await.clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }
}

#[async_trait]
impl CommentSource for MockCommentSource {
    async fn fetch_page(
        &self,
        cursor: Option<&PageToken>,
        _page_size: u32,
    ) -> FeedResult<FetchedPage> {
        self.fetch_calls.write().await.push(cursor.cloned());
        Self::pass(&self.fetch_gate).await;

        if let Some(ref msg) = *self.fetch_error.read().await {
            return Err(FeedError::network(msg.clone()));
        }

        let index = cursor
            .and_then(|t| t.as_str().parse::<usize>().ok())
            .unwrap_or(0);
        let page = self.pages.read().await.get(index).cloned();
        Ok(match page {
            Some(page) => FetchedPage {
                next_cursor: Some(PageToken((index + 1).to_string())),
                ..page
            },
            None => FetchedPage {
                comments: Vec::new(),
                next_cursor: None,
                exhausted: true,
            },
        })
    }

    async fn set_status(&self, id: CommentId, status: CommentStatus) -> FeedResult<()> {
        self.status_calls.write().await.push((id, status));
        Self::pass(&self.status_gate).await;

        if let Some(ref msg) = *self.status_error.read().await {
            return Err(FeedError::network(msg.clone()));
        }
        Ok(())
    }
}

// ===== RecordingDelegate =====

#[derive(Default)]
pub struct RecordingDelegate {
    events: Mutex<Vec<FeedEvent>>,
}

impl RecordingDelegate {
    pub fn events(&self) -> Vec<FeedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, event: FeedEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl FeedDelegate for RecordingDelegate {
    fn notify_selection_resolved(&self, id: CommentId) {
        self.record(FeedEvent::SelectionResolved { comment_id: id });
    }

    fn notify_selection_abandoned(&self, id: CommentId) {
        self.record(FeedEvent::SelectionAbandoned { comment_id: id });
    }

    fn notify_moderation_applied(&self, id: CommentId, status: CommentStatus) {
        self.record(FeedEvent::ModerationApplied {
            comment_id: id,
            status,
        });
    }

    fn notify_moderation_failed(&self, id: CommentId, reason: &str) {
        self.record(FeedEvent::ModerationFailed {
            comment_id: id,
            reason: reason.to_string(),
        });
    }
}

// ===== 工厂方法 =====

/// Two comments per page, approved and pending visible.
pub fn test_config() -> FeedConfig {
    FeedConfig {
        page_size: 2,
        ..FeedConfig::default()
    }
}

/// 创建测试用 `FeedContext`
pub fn create_test_context(source: Arc<MockCommentSource>) -> Arc<FeedContext> {
    match FeedContext::new(source, &test_config()) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => panic!("test config rejected: {e}"),
    }
}

/// 创建测试用 `FeedController`
pub fn create_test_controller(
    pages: Vec<FetchedPage>,
) -> (
    FeedController,
    Arc<MockCommentSource>,
    Arc<RecordingDelegate>,
) {
    let source = Arc::new(MockCommentSource::with_pages(pages));
    let delegate = Arc::new(RecordingDelegate::default());
    let controller = match FeedController::new(source.clone(), delegate.clone(), &test_config()) {
        Ok(controller) => controller,
        Err(e) => panic!("test config rejected: {e}"),
    };
    (controller, source, delegate)
}
