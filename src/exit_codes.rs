//! Exit code constants for the bucketlock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Store failure (unreachable bucket, remote error, cancelled, timed out)
//! - 3: Corrupt lock record
//! - 4: Lock refused (held by someone else, nothing to release, not the owner)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Store failure: the bucket or an object could not be reached or written.
pub const STORE_FAILURE: i32 = 2;

/// A lock object exists but does not decode as a lock record.
pub const CORRUPT_RECORD: i32 = 3;

/// Lock refused: contended acquire, no-op release, or release by a non-owner.
pub const LOCK_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, STORE_FAILURE, CORRUPT_RECORD, LOCK_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
