//! Implementation of the `bucketlock inspect` command.

use super::Outcome;
use crate::cli::InspectArgs;
use bucketlock::config::Config;
use bucketlock::error::Result;
use bucketlock::locks::LockManager;
use bucketlock::store::BlobStore;

/// Print the holder of `args.resource`, or that it is unlocked.
pub fn cmd_inspect<S: BlobStore + ?Sized>(
    manager: &LockManager<S>,
    args: InspectArgs,
    config: &Config,
) -> Result<Outcome> {
    match manager.describe(&args.resource)? {
        Some(record) => {
            let stale_marker = if record.is_stale(config.stale_after_minutes) {
                " [STALE]"
            } else {
                ""
            };
            println!(
                "{}: held by {} since {} ({} ago){}",
                args.resource,
                record.holder,
                record.created_at.to_rfc3339(),
                record.age_string(),
                stale_marker
            );
        }
        None => println!("{}: unlocked", args.resource),
    }
    Ok(Outcome::Done)
}
