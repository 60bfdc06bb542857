//! Configuration constants and defaults for bucketlock.

use std::path::PathBuf;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "bucketlock.yaml";

// Default value functions for serde
pub(crate) fn default_bucket() -> String {
    "locks".to_string()
}
pub(crate) fn default_store_root() -> PathBuf {
    PathBuf::from(".bucketlock")
}
pub(crate) fn default_stale_after_minutes() -> u32 {
    120
}
