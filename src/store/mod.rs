//! Blob store capability.
//!
//! The lock manager only needs a handful of object operations keyed by
//! bucket and object key. They are expressed as the [`BlobStore`] trait so the
//! manager runs unchanged against the in-memory store used in tests, the
//! directory-backed store shipped with the CLI, or any vendor object store.
//!
//! # Consistency
//!
//! Nothing here assumes read-after-write consistency. Whatever the backing
//! store offers is what the lock gets.

mod fs;
mod memory;

pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;

use crate::deadline::{Deadline, Interrupted};
use thiserror::Error;

/// Errors reported by a blob store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The object does not exist.
    #[error("object not found")]
    NotFound,

    /// The bucket does not exist or is not accessible.
    #[error("no such bucket: {0}")]
    NoSuchBucket(String),

    /// The key cannot be stored by this backend.
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("operation timed out")]
    TimedOut,

    /// The backend does not offer this operation.
    #[error("operation not supported by this store")]
    Unsupported,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend failure (permissions, throttling, network).
    #[error("{0}")]
    Backend(String),
}

impl From<Interrupted> for StoreError {
    fn from(value: Interrupted) -> Self {
        match value {
            Interrupted::Cancelled => StoreError::Cancelled,
            Interrupted::TimedOut => StoreError::TimedOut,
        }
    }
}

/// Object operations the lock manager relies on.
///
/// Implementations must be safe to share across threads; the lock manager
/// keeps no local state and may be called from many threads at once.
pub trait BlobStore: Send + Sync {
    /// Verify the bucket exists and is usable.
    fn head_bucket(&self, bucket: &str, deadline: &Deadline) -> Result<(), StoreError>;

    /// Write `bytes` at `key`, replacing any existing object.
    fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        deadline: &Deadline,
    ) -> Result<(), StoreError>;

    /// Write `bytes` at `key` only if no object exists there.
    ///
    /// Returns `Ok(false)` without writing when the key is taken. Stores
    /// without a conditional write leave the default, which reports
    /// [`StoreError::Unsupported`].
    fn put_if_absent(
        &self,
        _bucket: &str,
        _key: &str,
        _bytes: &[u8],
        _deadline: &Deadline,
    ) -> Result<bool, StoreError> {
        Err(StoreError::Unsupported)
    }

    /// Read the object at `key`, or [`StoreError::NotFound`].
    fn get(&self, bucket: &str, key: &str, deadline: &Deadline) -> Result<Vec<u8>, StoreError>;

    /// Delete the object at `key`. Deleting a missing key succeeds.
    fn delete(&self, bucket: &str, key: &str, deadline: &Deadline) -> Result<(), StoreError>;

    /// All keys in the bucket, sorted.
    fn list(&self, bucket: &str, deadline: &Deadline) -> Result<Vec<String>, StoreError>;
}
