//! Config struct definition and default implementation.

use super::types::*;
use crate::locks::AcquireStrategy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for bucketlock.
///
/// This struct represents the contents of `bucketlock.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Store settings
    // =========================================================================
    /// Bucket holding the lock objects (default: "locks").
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Root directory of the directory-backed store (default: ".bucketlock").
    /// Each bucket is a sub-directory of this root.
    #[serde(default = "default_store_root")]
    pub store_root: PathBuf,

    // =========================================================================
    // Lock settings
    // =========================================================================
    /// How acquire writes the lock object.
    #[serde(default)]
    pub acquire_strategy: AcquireStrategy,

    /// Deadline for each lock operation in milliseconds (unset: no deadline).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_timeout_ms: Option<u64>,

    /// Minutes after which a lock is shown as stale. Never used for expiry.
    #[serde(default = "default_stale_after_minutes")]
    pub stale_after_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            store_root: default_store_root(),
            acquire_strategy: AcquireStrategy::default(),
            call_timeout_ms: None,
            stale_after_minutes: default_stale_after_minutes(),
        }
    }
}
