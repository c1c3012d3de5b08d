//! 审核相关类型定义

use serde::{Deserialize, Serialize};

use super::{CommentId, CommentStatus};

/// Committed moderation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationReceipt {
    pub comment_id: CommentId,
    pub previous: CommentStatus,
    pub current: CommentStatus,
    /// The comment left the feed because the view hides `current`.
    pub removed: bool,
}

/// 批量审核失败项
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationFailure {
    pub comment_id: CommentId,
    pub reason: String,
}

/// 批量审核结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchModerationResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub failures: Vec<ModerationFailure>,
}
