//! 类型定义模块

mod comment;
mod config;
mod event;
mod moderation;
mod page;
mod selection;

pub use comment::{Comment, CommentId, CommentStatus};
pub use config::{FeedConfig, MAX_PAGE_SIZE};
pub use event::FeedEvent;
pub use moderation::{BatchModerationResult, ModerationFailure, ModerationReceipt};
pub use page::{FetchedPage, MergeDelta, PageCursor, PageToken};
pub use selection::{Navigation, SearchState, SelectionOutcome};
