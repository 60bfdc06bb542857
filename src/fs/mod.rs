//! Filesystem utilities for bucketlock.
//!
//! Atomic and exclusive file writes used by the directory-backed blob store.

pub mod atomic;

pub use atomic::{atomic_write, exclusive_write, is_temp_file_name};
