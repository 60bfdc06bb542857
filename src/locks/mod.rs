//! Locking subsystem for bucketlock.
//!
//! A lock is one object in a blob store bucket:
//! - key: the resource name, verbatim
//! - payload: a [`LockRecord`](crate::record::LockRecord) naming the holder
//!
//! An object at the key means "locked", no object means "unlocked". Acquire
//! reads the key and writes the record if nothing was there; release reads the
//! key and deletes the object if something was there.
//!
//! # Guarantees
//!
//! With [`AcquireStrategy::CheckThenWrite`] (the default) the read and the
//! write are separate calls, so two workers racing on the same resource can
//! both succeed and the last write wins. The lock is advisory: it keeps
//! well-behaved callers apart when they do not race, and nothing more.
//! [`AcquireStrategy::Conditional`] closes that window on stores with an
//! atomic write-if-absent.
//!
//! Ordering between workers is whatever the store's read/write consistency
//! gives. On an eventually consistent store a fresh lock may not be visible
//! to another worker right away; deployments that need the lock to hold
//! should use a strongly consistent store.
//!
//! Plain release never checks who holds the lock. Use
//! [`LockManager::release_owned`] when only the holder may release.

mod manager;
mod types;


pub use manager::LockManager;
pub use types::{AcquireStrategy, LockInfo, LockOptions};
