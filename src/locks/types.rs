//! Lock manager options and result types.

use crate::record::LockRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How `acquire` writes the lock object after finding the resource unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AcquireStrategy {
    /// Read, then unconditionally write (default).
    ///
    /// Advisory only: two workers that both read "unlocked" both write, and
    /// the last write wins.
    #[default]
    CheckThenWrite,
    /// Read, then write only if the key is still absent.
    ///
    /// Exclusive as long as the store's conditional write is atomic. Fails
    /// with `Unsupported` on stores without one.
    Conditional,
}

impl AcquireStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcquireStrategy::CheckThenWrite => "check_then_write",
            AcquireStrategy::Conditional => "conditional",
        }
    }
}

/// Options for a [`super::LockManager`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LockOptions {
    pub strategy: AcquireStrategy,

    /// Deadline applied to operations called without an explicit one.
    pub call_timeout: Option<Duration>,
}

/// A lock found by [`super::LockManager::list`].
#[derive(Debug, Clone)]
pub struct LockInfo {
    /// The resource name (object key).
    pub resource: String,

    /// The decoded lock record.
    pub record: LockRecord,
}

impl LockInfo {
    /// Whether the lock is older than `stale_minutes`. Display only.
    pub fn is_stale(&self, stale_minutes: u32) -> bool {
        self.record.is_stale(stale_minutes)
    }
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (holder: {}, age: {})",
            self.resource,
            self.record.holder,
            self.record.age_string()
        )
    }
}
