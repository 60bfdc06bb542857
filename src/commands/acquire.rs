//! Implementation of the `bucketlock acquire` command.

use super::Outcome;
use crate::cli::AcquireArgs;
use bucketlock::error::Result;
use bucketlock::locks::LockManager;
use bucketlock::store::BlobStore;
use tracing::debug;

/// Lock `args.resource` for `args.holder`.
///
/// A resource that is already locked is reported as [`Outcome::Refused`]
/// along with the current holder, when it can still be read.
pub fn cmd_acquire<S: BlobStore + ?Sized>(
    manager: &LockManager<S>,
    args: AcquireArgs,
) -> Result<Outcome> {
    if manager.acquire(args.holder, &args.resource)? {
        println!("Acquired '{}' for {}", args.resource, args.holder);
        return Ok(Outcome::Done);
    }

    // The refusal stands even if the holder can no longer be read.
    match manager.describe(&args.resource) {
        Ok(Some(record)) => println!(
            "Not acquired: '{}' is held by {} (for {})",
            args.resource,
            record.holder,
            record.age_string()
        ),
        Ok(None) => println!("Not acquired: '{}' is held by another worker", args.resource),
        Err(e) => {
            debug!(resource = %args.resource, error = %e, "could not read current holder");
            println!("Not acquired: '{}' is held by another worker", args.resource);
        }
    }
    Ok(Outcome::Refused)
}
