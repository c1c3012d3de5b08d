//! Ready-made collaborators for hosts without their own.

mod channel_delegate;
mod fixture_source;
mod logging_delegate;

pub use channel_delegate::ChannelFeedDelegate;
pub use fixture_source::FixtureCommentSource;
pub use logging_delegate::LoggingFeedDelegate;
