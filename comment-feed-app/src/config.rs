//! Feed configuration file

use std::path::Path;

use comment_feed_core::error::{FeedError, FeedResult};
use comment_feed_core::types::FeedConfig;

/// Load a `FeedConfig` from a JSON file.
///
/// A missing file yields the defaults. Values are validated before returning.
pub fn load_config(path: &Path) -> FeedResult<FeedConfig> {
    if !path.exists() {
        log::info!("No feed config at {}, using defaults", path.display());
        return FeedConfig::default().validated();
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| FeedError::StorageError(format!("{}: {e}", path.display())))?;
    let config: FeedConfig =
        serde_json::from_str(&raw).map_err(|e| FeedError::SerializationError(e.to_string()))?;
    config.validated()
}
