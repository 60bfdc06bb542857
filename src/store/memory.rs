//! In-memory blob store.

use super::{BlobStore, StoreError};
use crate::deadline::Deadline;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

type Buckets = HashMap<String, BTreeMap<String, Vec<u8>>>;

/// Blob store backed by a `HashMap` of buckets.
///
/// Every operation runs under a single mutex, so this store is strongly
/// consistent and `put_if_absent` is atomic. Buckets must be created with
/// [`MemoryBlobStore::create_bucket`] before use.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    buckets: Mutex<Buckets>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already contains `bucket`.
    pub fn with_bucket(bucket: &str) -> Self {
        let store = Self::new();
        store.create_bucket(bucket);
        store
    }

    /// Create an empty bucket. Existing buckets are left untouched.
    pub fn create_bucket(&self, bucket: &str) {
        self.buckets().entry(bucket.to_string()).or_default();
    }

    fn buckets(&self) -> MutexGuard<'_, Buckets> {
        // The map holds no invariants a panicking writer could break halfway.
        self.buckets
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn with_bucket_mut<T>(
        &self,
        bucket: &str,
        deadline: &Deadline,
        f: impl FnOnce(&mut BTreeMap<String, Vec<u8>>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        deadline.check()?;
        let mut buckets = self.buckets();
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| StoreError::NoSuchBucket(bucket.to_string()))?;
        f(objects)
    }
}

impl BlobStore for MemoryBlobStore {
    fn head_bucket(&self, bucket: &str, deadline: &Deadline) -> Result<(), StoreError> {
        self.with_bucket_mut(bucket, deadline, |_| Ok(()))
    }

    fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        deadline: &Deadline,
    ) -> Result<(), StoreError> {
        self.with_bucket_mut(bucket, deadline, |objects| {
            objects.insert(key.to_string(), bytes.to_vec());
            Ok(())
        })
    }

    fn put_if_absent(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        deadline: &Deadline,
    ) -> Result<bool, StoreError> {
        self.with_bucket_mut(bucket, deadline, |objects| {
            if objects.contains_key(key) {
                return Ok(false);
            }
            objects.insert(key.to_string(), bytes.to_vec());
            Ok(true)
        })
    }

    fn get(&self, bucket: &str, key: &str, deadline: &Deadline) -> Result<Vec<u8>, StoreError> {
        self.with_bucket_mut(bucket, deadline, |objects| {
            objects.get(key).cloned().ok_or(StoreError::NotFound)
        })
    }

    fn delete(&self, bucket: &str, key: &str, deadline: &Deadline) -> Result<(), StoreError> {
        self.with_bucket_mut(bucket, deadline, |objects| {
            objects.remove(key);
            Ok(())
        })
    }

    fn list(&self, bucket: &str, deadline: &Deadline) -> Result<Vec<String>, StoreError> {
        self.with_bucket_mut(bucket, deadline, |objects| Ok(objects.keys().cloned().collect()))
    }
}
