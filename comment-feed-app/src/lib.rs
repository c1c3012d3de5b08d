//! Platform-agnostic bootstrap for the comment feed.
//!
//! Provides `FeedBuilder` (collaborator injection), a JSON config loader and
//! ready-made adapters for hosts without their own.

pub mod adapters;
pub mod config;

use std::sync::Arc;

use comment_feed_core::error::{FeedError, FeedResult};
use comment_feed_core::traits::{CommentSource, FeedDelegate};
use comment_feed_core::types::FeedConfig;
use comment_feed_core::FeedController;

use crate::adapters::LoggingFeedDelegate;

/// Builder for constructing a `FeedController` with host-specific collaborators.
///
/// # Required
/// - `source`: where comments come from and where moderation goes
///
/// # Optional
/// - `delegate`: defaults to `LoggingFeedDelegate`
/// - `config`: defaults to `FeedConfig::default()`
pub struct FeedBuilder {
    source: Option<Arc<dyn CommentSource>>,
    delegate: Option<Arc<dyn FeedDelegate>>,
    config: FeedConfig,
}

impl FeedBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            delegate: None,
            config: FeedConfig::default(),
        }
    }

    #[must_use]
    pub fn source(mut self, source: Arc<dyn CommentSource>) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn delegate(mut self, delegate: Arc<dyn FeedDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    #[must_use]
    pub fn config(mut self, config: FeedConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the controller without loading anything.
    ///
    /// # Errors
    /// Returns `FeedError::ValidationError` if the source is missing or the
    /// config is rejected.
    pub fn build(self) -> FeedResult<FeedController> {
        let source = self
            .source
            .ok_or_else(|| FeedError::ValidationError("source is required".to_string()))?;
        let delegate = self
            .delegate
            .unwrap_or_else(|| Arc::new(LoggingFeedDelegate));

        FeedController::new(source, delegate, &self.config)
    }

    /// Build the controller and load the first page.
    ///
    /// A failed first load is logged and the controller is still returned;
    /// the host can retry with `refresh()`.
    pub async fn open(self) -> FeedResult<FeedController> {
        let controller = self.build()?;
        match controller.load_next_page().await {
            Ok(delta) => log::info!(
                "Comment feed opened with {} comments",
                delta.inserted.len()
            ),
            Err(e) => log::warn!("Comment feed opened without a first page: {e}"),
        }
        Ok(controller)
    }
}

impl Default for FeedBuilder {
    fn default() -> Self {
        Self::new()
    }
}
