//! 评论相关类型定义

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FeedError;

/// Comment identifier as assigned by the blog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CommentId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// 评论状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    /// 已批准
    Approved,
    /// 待审核
    Pending,
    /// 垃圾评论
    Spam,
    /// 回收站
    Trash,
}

impl CommentStatus {
    pub const ALL: [Self; 4] = [Self::Approved, Self::Pending, Self::Spam, Self::Trash];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Spam => "spam",
            Self::Trash => "trash",
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentStatus {
    type Err = FeedError;

    /// Accepts the canonical names and the blog API's wire spellings
    /// (`approve`, `hold`, `unapproved`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approved" | "approve" => Ok(Self::Approved),
            "pending" | "hold" | "unapproved" => Ok(Self::Pending),
            "spam" => Ok(Self::Spam),
            "trash" => Ok(Self::Trash),
            other => Err(FeedError::InvalidTransition(format!(
                "unknown comment status '{other}'"
            ))),
        }
    }
}

/// 评论信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// 评论 ID
    pub id: CommentId,
    /// 所属文章 ID
    #[serde(rename = "postId")]
    pub post_id: u64,
    /// 父评论 ID（楼中楼回复）
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
    /// 作者名称
    pub author: String,
    /// 评论正文
    pub content: String,
    /// 审核状态
    pub status: CommentStatus,
    /// 创建时间
    #[serde(rename = "createdAt")]
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    /// 服务端排序值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<i64>,
}
