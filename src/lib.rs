//! Bucketlock: advisory distributed locks on top of a blob store.
//!
//! Independent workers coordinate access to a named resource without a lock
//! server. A resource is locked while an object named after it exists in a
//! bucket; the object records who holds the lock and since when.
//!
//! ```no_run
//! use bucketlock::locks::LockManager;
//! use bucketlock::store::FsBlobStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(FsBlobStore::new("/mnt/shared/locks"));
//! let locks = LockManager::new(store, "deploys")?;
//!
//! if locks.acquire(123, "env-prod")? {
//!     // ... change env-prod ...
//!     locks.release("env-prod")?;
//! }
//! # Ok::<(), bucketlock::error::LockError>(())
//! ```
//!
//! See [`locks`] for what the lock does and does not guarantee.

pub mod config;
pub mod deadline;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod locks;
pub mod record;
pub mod store;

pub use deadline::{CancelToken, Deadline};
pub use error::{LockError, Result};
pub use locks::{AcquireStrategy, LockInfo, LockManager, LockOptions};
pub use record::LockRecord;
pub use store::{BlobStore, FsBlobStore, MemoryBlobStore, StoreError};
