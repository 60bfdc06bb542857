//! The lock manager: acquire, release and inspect over a blob store.

use super::types::{AcquireStrategy, LockInfo, LockOptions};
use crate::deadline::{Deadline, Interrupted};
use crate::error::{LockError, Result};
use crate::record::LockRecord;
use crate::store::{BlobStore, StoreError};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const OP_READ: &str = "read";
const OP_WRITE: &str = "write";
const OP_DELETE: &str = "delete";
const OP_LIST: &str = "list";

/// Advisory lock manager bound to one bucket.
///
/// The manager keeps no state of its own; every call goes to the store.
/// Cloning is cheap and clones can be used from any thread.
pub struct LockManager<S: BlobStore + ?Sized = dyn BlobStore> {
    store: Arc<S>,
    bucket: String,
    options: LockOptions,
}

// Manual impl so `S` itself need not be `Clone`.
impl<S: BlobStore + ?Sized> Clone for LockManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            bucket: self.bucket.clone(),
            options: self.options,
        }
    }
}

impl<S: BlobStore + ?Sized> std::fmt::Debug for LockManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockManager")
            .field("bucket", &self.bucket)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<S: BlobStore + ?Sized> LockManager<S> {
    /// Bind a lock manager to `bucket` with default options.
    ///
    /// Fails with [`LockError::Unreachable`] when the bucket cannot be verified.
    pub fn new(store: Arc<S>, bucket: impl Into<String>) -> Result<Self> {
        Self::with_options(store, bucket, LockOptions::default())
    }

    /// Bind a lock manager to `bucket`.
    ///
    /// Performs exactly one remote call, a bucket existence check.
    pub fn with_options(
        store: Arc<S>,
        bucket: impl Into<String>,
        options: LockOptions,
    ) -> Result<Self> {
        let bucket = bucket.into();
        let deadline = Deadline::from_timeout(options.call_timeout);

        debug!(bucket = %bucket, "checking lock bucket");
        if let Err(e) = store.head_bucket(&bucket, &deadline) {
            error!(bucket = %bucket, error = %e, "lock bucket is not reachable");
            return Err(LockError::Unreachable {
                bucket,
                reason: e.to_string(),
            });
        }

        debug!(bucket = %bucket, strategy = options.strategy.as_str(), "lock manager ready");
        Ok(Self {
            store,
            bucket,
            options,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn options(&self) -> &LockOptions {
        &self.options
    }

    fn default_deadline(&self) -> Deadline {
        Deadline::from_timeout(self.options.call_timeout)
    }

    /// Try to lock `resource` for `holder`.
    ///
    /// Returns `Ok(false)` when the resource is already locked; nothing is
    /// written in that case.
    pub fn acquire(&self, holder: i64, resource: &str) -> Result<bool> {
        self.acquire_within(holder, resource, &self.default_deadline())
    }

    /// [`Self::acquire`] with an explicit deadline.
    pub fn acquire_within(&self, holder: i64, resource: &str, deadline: &Deadline) -> Result<bool> {
        if let Some(current) = self.inspect_within(resource, deadline)? {
            debug!(resource, holder, current, "resource already locked");
            return Ok(false);
        }

        self.checkpoint(OP_WRITE, resource, deadline)?;
        let bytes = LockRecord::new(holder)
            .encode()
            .map_err(|e| LockError::Store {
                operation: OP_WRITE,
                key: resource.to_string(),
                reason: format!("failed to encode lock record: {}", e),
            })?;

        debug!(resource, holder, strategy = self.options.strategy.as_str(), "writing lock record");
        let written = match self.options.strategy {
            AcquireStrategy::CheckThenWrite => {
                self.store
                    .put(&self.bucket, resource, &bytes, deadline)
                    .map_err(|e| self.store_failure(OP_WRITE, resource, e))?;
                true
            }
            AcquireStrategy::Conditional => self
                .store
                .put_if_absent(&self.bucket, resource, &bytes, deadline)
                .map_err(|e| self.store_failure(OP_WRITE, resource, e))?,
        };

        if written {
            info!(resource, holder, bucket = %self.bucket, "lock acquired");
        } else {
            debug!(resource, holder, "lost conditional write, resource locked meanwhile");
        }
        Ok(written)
    }

    /// Unlock `resource`, whoever holds it.
    ///
    /// Returns `Ok(false)` when the resource was not locked. Ownership is not
    /// checked; see [`Self::release_owned`] for that.
    pub fn release(&self, resource: &str) -> Result<bool> {
        self.release_within(resource, &self.default_deadline())
    }

    /// [`Self::release`] with an explicit deadline.
    pub fn release_within(&self, resource: &str, deadline: &Deadline) -> Result<bool> {
        let Some(holder) = self.inspect_within(resource, deadline)? else {
            debug!(resource, "resource not locked, nothing to release");
            return Ok(false);
        };

        self.delete(resource, deadline)?;
        info!(resource, holder, bucket = %self.bucket, "lock released");
        Ok(true)
    }

    /// Unlock `resource` only if `holder` holds it.
    ///
    /// Returns `Ok(false)` when the resource was not locked and
    /// [`LockError::NotOwner`] when someone else holds it.
    pub fn release_owned(&self, holder: i64, resource: &str) -> Result<bool> {
        self.release_owned_within(holder, resource, &self.default_deadline())
    }

    /// [`Self::release_owned`] with an explicit deadline.
    pub fn release_owned_within(
        &self,
        holder: i64,
        resource: &str,
        deadline: &Deadline,
    ) -> Result<bool> {
        let Some(record) = self.describe_within(resource, deadline)? else {
            debug!(resource, holder, "resource not locked, nothing to release");
            return Ok(false);
        };

        if record.holder != holder {
            debug!(resource, holder, current = record.holder, "release refused, not the owner");
            return Err(LockError::NotOwner {
                resource: resource.to_string(),
                holder: record.holder,
                requested_by: holder,
            });
        }

        self.delete(resource, deadline)?;
        info!(resource, holder, bucket = %self.bucket, "lock released by owner");
        Ok(true)
    }

    /// The holder of `resource`, or `None` when it is not locked.
    pub fn inspect(&self, resource: &str) -> Result<Option<i64>> {
        self.inspect_within(resource, &self.default_deadline())
    }

    /// [`Self::inspect`] with an explicit deadline.
    pub fn inspect_within(&self, resource: &str, deadline: &Deadline) -> Result<Option<i64>> {
        Ok(self
            .describe_within(resource, deadline)?
            .map(|record| record.holder))
    }

    /// The full lock record of `resource`, or `None` when it is not locked.
    pub fn describe(&self, resource: &str) -> Result<Option<LockRecord>> {
        self.describe_within(resource, &self.default_deadline())
    }

    /// [`Self::describe`] with an explicit deadline.
    pub fn describe_within(
        &self,
        resource: &str,
        deadline: &Deadline,
    ) -> Result<Option<LockRecord>> {
        self.read_record(resource, deadline).inspect_err(|e| {
            if let LockError::CorruptRecord { reason, .. } = e {
                error!(resource, bucket = %self.bucket, reason = %reason, "corrupt lock record");
            }
        })
    }

    /// Every lock currently in the bucket, sorted by resource.
    ///
    /// Objects that vanish between listing and reading, or that do not decode,
    /// are skipped.
    pub fn list(&self) -> Result<Vec<LockInfo>> {
        self.list_within(&self.default_deadline())
    }

    /// [`Self::list`] with an explicit deadline.
    pub fn list_within(&self, deadline: &Deadline) -> Result<Vec<LockInfo>> {
        debug!(bucket = %self.bucket, "listing locks");
        let keys = self
            .store
            .list(&self.bucket, deadline)
            .map_err(|e| self.store_failure(OP_LIST, &self.bucket, e))?;

        let mut locks = Vec::with_capacity(keys.len());
        for resource in keys {
            self.checkpoint(OP_READ, &resource, deadline)?;
            match self.read_record(&resource, deadline) {
                Ok(Some(record)) => locks.push(LockInfo { resource, record }),
                Ok(None) => warn!(resource = %resource, "skipping lock released while listing"),
                Err(LockError::CorruptRecord { key, reason }) => {
                    warn!(resource = %key, reason = %reason, "skipping corrupt lock record");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(locks)
    }

    fn read_record(&self, resource: &str, deadline: &Deadline) -> Result<Option<LockRecord>> {
        debug!(resource, bucket = %self.bucket, "reading lock record");
        let bytes = match self.store.get(&self.bucket, resource, deadline) {
            Ok(bytes) => bytes,
            Err(StoreError::NotFound) => return Ok(None),
            Err(e) => return Err(self.store_failure(OP_READ, resource, e)),
        };

        LockRecord::decode(&bytes)
            .map(Some)
            .map_err(|e| LockError::CorruptRecord {
                key: resource.to_string(),
                reason: e.to_string(),
            })
    }

    fn delete(&self, resource: &str, deadline: &Deadline) -> Result<()> {
        self.checkpoint(OP_DELETE, resource, deadline)?;
        debug!(resource, bucket = %self.bucket, "deleting lock record");
        self.store
            .delete(&self.bucket, resource, deadline)
            .map_err(|e| self.store_failure(OP_DELETE, resource, e))
    }

    /// Stop between remote calls once the caller has given up.
    fn checkpoint(&self, operation: &'static str, key: &str, deadline: &Deadline) -> Result<()> {
        deadline.check().map_err(|interrupted| {
            debug!(operation, key, ?interrupted, "lock operation interrupted");
            match interrupted {
                Interrupted::Cancelled => LockError::Cancelled {
                    operation,
                    key: key.to_string(),
                },
                Interrupted::TimedOut => LockError::Timeout {
                    operation,
                    key: key.to_string(),
                },
            }
        })
    }

    /// Translate a store error, adding operation and key context.
    fn store_failure(&self, operation: &'static str, key: &str, err: StoreError) -> LockError {
        let key = key.to_string();
        match err {
            StoreError::Cancelled => {
                debug!(operation, key = %key, "lock store call cancelled");
                LockError::Cancelled { operation, key }
            }
            StoreError::TimedOut => {
                debug!(operation, key = %key, "lock store call timed out");
                LockError::Timeout { operation, key }
            }
            StoreError::Unsupported => LockError::Unsupported(format!(
                "store cannot {} '{}' with acquire strategy '{}'",
                operation,
                key,
                self.options.strategy.as_str()
            )),
            other => {
                error!(operation, key = %key, bucket = %self.bucket, error = %other, "lock store call failed");
                LockError::Store {
                    operation,
                    key,
                    reason: other.to_string(),
                }
            }
        }
    }
}
