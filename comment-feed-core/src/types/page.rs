//! 分页相关类型定义

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Comment, CommentId};

/// Opaque paging token handed out by the comment source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(pub String);

impl PageToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page as delivered by the comment source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedPage {
    /// Comments in paging order (newest first).
    pub comments: Vec<Comment>,
    /// Token for the following page, `None` at the end of the feed.
    pub next_cursor: Option<PageToken>,
    /// Explicit end-of-feed signal.
    pub exhausted: bool,
}

/// Paging position of a feed.
///
/// Starts fresh (no token), advances once per successful page and latches
/// `exhausted` when the source runs out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursor {
    token: Option<PageToken>,
    exhausted: bool,
    pages_loaded: u32,
}

impl PageCursor {
    #[must_use]
    pub fn fresh() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&PageToken> {
        self.token.as_ref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    /// Move past a successfully merged page.
    ///
    /// A missing next token also ends the feed: there is nothing left to ask for.
    pub fn advance(&mut self, next: Option<PageToken>, exhausted: bool) {
        self.exhausted = exhausted || next.is_none();
        self.token = next;
        self.pages_loaded += 1;
    }
}

/// Ids touched by a merge.
///
/// `removed` is only filled by the page reconciler, when a re-synced comment
/// arrives with a status the view hides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeDelta {
    pub inserted: HashSet<CommentId>,
    pub updated: HashSet<CommentId>,
    pub removed: HashSet<CommentId>,
}

impl MergeDelta {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}
