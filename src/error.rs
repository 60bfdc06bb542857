//! Error types for bucketlock.
//!
//! Uses thiserror for derive macros. Every store-facing variant carries the
//! operation and the object key so a failure can be diagnosed from the message
//! alone.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for lock operations.
///
/// A contended acquire or a release with nothing to release is *not* an error;
/// those are reported as `Ok(false)` by the lock manager.
#[derive(Error, Debug)]
pub enum LockError {
    /// The bucket could not be verified when building a lock manager.
    #[error("bucket '{bucket}' is not reachable: {reason}")]
    Unreachable { bucket: String, reason: String },

    /// Any other failure reported by the blob store.
    #[error("failed to {operation} lock '{key}': {reason}")]
    Store {
        operation: &'static str,
        key: String,
        reason: String,
    },

    /// An object exists at the resource key but is not a lock record.
    #[error("lock record at '{key}' is corrupt: {reason}")]
    CorruptRecord { key: String, reason: String },

    /// An owner-checked release was attempted by someone other than the holder.
    #[error("lock '{resource}' is held by {holder}, not {requested_by}")]
    NotOwner {
        resource: String,
        holder: i64,
        requested_by: i64,
    },

    /// The caller cancelled the operation.
    #[error("{operation} of lock '{key}' was cancelled")]
    Cancelled { operation: &'static str, key: String },

    /// The caller's deadline passed before the operation finished.
    #[error("{operation} of lock '{key}' timed out")]
    Timeout { operation: &'static str, key: String },

    /// The store lacks a capability the configured strategy needs.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Invalid configuration or arguments.
    #[error("{0}")]
    Config(String),
}

impl LockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockError::Config(_) => exit_codes::USER_ERROR,
            LockError::Unreachable { .. }
            | LockError::Store { .. }
            | LockError::Cancelled { .. }
            | LockError::Timeout { .. }
            | LockError::Unsupported(_) => exit_codes::STORE_FAILURE,
            LockError::CorruptRecord { .. } => exit_codes::CORRUPT_RECORD,
            LockError::NotOwner { .. } => exit_codes::LOCK_FAILURE,
        }
    }
}

/// Result type alias for lock operations.
pub type Result<T> = std::result::Result<T, LockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_share_an_exit_code() {
        let errs = [
            LockError::Unreachable {
                bucket: "locks".into(),
                reason: "no such bucket".into(),
            },
            LockError::Store {
                operation: "write",
                key: "env-prod".into(),
                reason: "throttled".into(),
            },
            LockError::Timeout {
                operation: "read",
                key: "env-prod".into(),
            },
            LockError::Cancelled {
                operation: "delete",
                key: "env-prod".into(),
            },
        ];
        for err in &errs {
            assert_eq!(err.exit_code(), exit_codes::STORE_FAILURE, "{err}");
        }
    }

    #[test]
    fn corrupt_record_has_its_own_exit_code() {
        let err = LockError::CorruptRecord {
            key: "env-stage".into(),
            reason: "expected value".into(),
        };
        assert_eq!(err.exit_code(), exit_codes::CORRUPT_RECORD);
    }

    #[test]
    fn not_owner_is_a_lock_failure() {
        let err = LockError::NotOwner {
            resource: "env-prod".into(),
            holder: 123,
            requested_by: 456,
        };
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
        assert_eq!(err.to_string(), "lock 'env-prod' is held by 123, not 456");
    }

    #[test]
    fn store_error_message_names_operation_and_key() {
        let err = LockError::Store {
            operation: "write",
            key: "env-prod".into(),
            reason: "access denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write lock 'env-prod': access denied"
        );
    }

    #[test]
    fn config_error_is_a_user_error() {
        let err = LockError::Config("bucket must not be empty".into());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(err.to_string(), "bucket must not be empty");
    }
}
