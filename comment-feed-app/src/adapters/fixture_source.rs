//! In-memory comment source backed by a JSON fixture.
//!
//! Serves the comments newest first in offset-token pages and applies
//! moderation to its own copy, the way a blog server would. Used for demos,
//! offline development and integration tests.

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use comment_feed_core::error::{FeedError, FeedResult};
use comment_feed_core::traits::CommentSource;
use comment_feed_core::types::{Comment, CommentId, CommentStatus, FetchedPage, PageToken};

pub struct FixtureCommentSource {
    comments: RwLock<Vec<Comment>>,
    failing: RwLock<HashSet<CommentId>>,
    offline: AtomicBool,
}

impl FixtureCommentSource {
    pub fn new(mut comments: Vec<Comment>) -> Self {
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self {
            comments: RwLock::new(comments),
            failing: RwLock::new(HashSet::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Parse a JSON array of comments.
    pub fn from_json(json: &str) -> FeedResult<Self> {
        let comments: Vec<Comment> =
            serde_json::from_str(json).map_err(|e| FeedError::SerializationError(e.to_string()))?;
        Ok(Self::new(comments))
    }

    pub fn from_file(path: &Path) -> FeedResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| FeedError::StorageError(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Make every request fail as if the network were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Make moderation of `id` fail.
    pub async fn fail_status_for(&self, id: CommentId) {
        self.failing.write().await.insert(id);
    }

    /// Server-side status of a comment.
    pub async fn status_of(&self, id: CommentId) -> Option<CommentStatus> {
        self.comments
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.status)
    }

    fn ensure_online(&self) -> FeedResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(FeedError::network("fixture source is offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CommentSource for FixtureCommentSource {
    async fn fetch_page(
        &self,
        cursor: Option<&PageToken>,
        page_size: u32,
    ) -> FeedResult<FetchedPage> {
        self.ensure_online()?;

        let offset = match cursor {
            None => 0,
            Some(token) => token.as_str().parse::<usize>().map_err(|_| {
                FeedError::network(format!("invalid page token '{}'", token.as_str()))
            })?,
        };

        let comments = self.comments.read().await;
        let end = comments.len().min(offset.saturating_add(page_size as usize));
        let items: Vec<Comment> = comments.get(offset..end).unwrap_or_default().to_vec();
        let exhausted = end >= comments.len();

        Ok(FetchedPage {
            comments: items,
            next_cursor: (!exhausted).then(|| PageToken(end.to_string())),
            exhausted,
        })
    }

    async fn set_status(&self, id: CommentId, status: CommentStatus) -> FeedResult<()> {
        self.ensure_online()?;
        if self.failing.read().await.contains(&id) {
            return Err(FeedError::network(format!("moderation of comment {id} rejected")));
        }

        let mut comments = self.comments.write().await;
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| FeedError::network(format!("comment {id} does not exist on the server")))?;
        comment.status = status;
        Ok(())
    }
}
