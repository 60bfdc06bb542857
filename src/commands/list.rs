//! Implementation of the `bucketlock list` command.

use super::Outcome;
use bucketlock::config::Config;
use bucketlock::error::Result;
use bucketlock::locks::LockManager;
use bucketlock::store::BlobStore;

/// Print every lock in the bucket, marking stale ones.
pub fn cmd_list<S: BlobStore + ?Sized>(
    manager: &LockManager<S>,
    config: &Config,
) -> Result<Outcome> {
    let locks = manager.list()?;

    if locks.is_empty() {
        println!("No locks in bucket '{}'", manager.bucket());
        return Ok(Outcome::Done);
    }

    println!("Locks in bucket '{}':", manager.bucket());
    for lock in &locks {
        let stale_marker = if lock.is_stale(config.stale_after_minutes) {
            " [STALE]"
        } else {
            ""
        };
        println!("  - {}{}", lock, stale_marker);
    }

    let stale = locks
        .iter()
        .filter(|l| l.is_stale(config.stale_after_minutes))
        .count();
    if stale > 0 {
        println!();
        println!(
            "{} lock(s) older than {} minutes. Use `bucketlock release <resource>` if the holder is gone.",
            stale, config.stale_after_minutes
        );
    }
    Ok(Outcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context_with_bucket;

    #[test]
    fn list_empty_and_populated_bucket() {
        let (_temp_dir, ctx) = context_with_bucket();
        let manager = ctx.manager().unwrap();

        assert_eq!(cmd_list(&manager, &ctx.config).unwrap(), Outcome::Done);

        manager.acquire(1, "env-prod").unwrap();
        manager.acquire(2, "team-a/env-stage").unwrap();
        assert_eq!(cmd_list(&manager, &ctx.config).unwrap(), Outcome::Done);
        assert_eq!(manager.list().unwrap().len(), 2);
    }
}
