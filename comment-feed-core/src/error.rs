//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::CommentId;

/// Feed layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum FeedError {
    /// The referenced comment is not in the store
    #[error("Comment not found: {0}")]
    NotFound(CommentId),

    /// Unknown target status for a moderation request
    #[error("Invalid moderation transition: {0}")]
    InvalidTransition(String),

    /// Fetch or moderation call failed
    #[error("Network error: {message}")]
    NetworkFailure {
        comment_id: Option<CommentId>,
        message: String,
    },

    /// Paging was requested past the end of the feed
    #[error("Feed already exhausted")]
    AlreadyExhausted,

    /// The wanted comment never appeared before the feed ran out
    #[error("Comment no longer available: {0}")]
    TargetNotFound(CommentId),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Storage layer error (fixture and config files)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// The feed was torn down while the operation was in flight
    #[error("Feed has been torn down")]
    FeedClosed,
}

impl FeedError {
    /// Network failure not tied to a particular comment (page fetches).
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            comment_id: None,
            message: message.into(),
        }
    }

    /// Whether it is expected behavior (end of feed, stale deep link, teardown, etc.),
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::AlreadyExhausted
            | Self::TargetNotFound(_)
            | Self::ValidationError(_)
            | Self::FeedClosed => true,
            Self::NotFound(_)
            | Self::InvalidTransition(_)
            | Self::NetworkFailure { .. }
            | Self::SerializationError(_)
            | Self::StorageError(_) => false,
        }
    }

    /// Whether the user should be offered a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. })
    }
}

/// Feed layer Result type alias
pub type FeedResult<T> = std::result::Result<T, FeedError>;
