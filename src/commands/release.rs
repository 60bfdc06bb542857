//! Implementation of the `bucketlock release` command.

use super::Outcome;
use crate::cli::ReleaseArgs;
use bucketlock::error::{LockError, Result};
use bucketlock::locks::LockManager;
use bucketlock::store::BlobStore;

/// Unlock `args.resource`.
///
/// With `--holder` only that holder's lock is removed; a lock held by
/// someone else is reported as [`Outcome::Refused`].
pub fn cmd_release<S: BlobStore + ?Sized>(
    manager: &LockManager<S>,
    args: ReleaseArgs,
) -> Result<Outcome> {
    let result = match args.holder {
        Some(holder) => manager.release_owned(holder, &args.resource),
        None => manager.release(&args.resource),
    };

    match result {
        Ok(true) => {
            println!("Released '{}'", args.resource);
            Ok(Outcome::Done)
        }
        Ok(false) => {
            println!("Not released: '{}' is not locked", args.resource);
            Ok(Outcome::Refused)
        }
        Err(LockError::NotOwner {
            resource,
            holder,
            requested_by,
        }) => {
            println!(
                "Not released: '{}' is held by {}, not {}",
                resource, holder, requested_by
            );
            Ok(Outcome::Refused)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context_with_bucket;

    fn args(resource: &str, holder: Option<i64>) -> ReleaseArgs {
        ReleaseArgs {
            resource: resource.to_string(),
            holder,
        }
    }

    #[test]
    fn release_locked_then_unlocked() {
        let (_temp_dir, ctx) = context_with_bucket();
        let manager = ctx.manager().unwrap();
        manager.acquire(123, "env-prod").unwrap();

        assert_eq!(cmd_release(&manager, args("env-prod", None)).unwrap(), Outcome::Done);
        assert_eq!(
            cmd_release(&manager, args("env-prod", None)).unwrap(),
            Outcome::Refused
        );
    }

    #[test]
    fn release_with_wrong_holder_is_refused() {
        let (_temp_dir, ctx) = context_with_bucket();
        let manager = ctx.manager().unwrap();
        manager.acquire(123, "env-prod").unwrap();

        assert_eq!(
            cmd_release(&manager, args("env-prod", Some(456))).unwrap(),
            Outcome::Refused
        );
        assert_eq!(manager.inspect("env-prod").unwrap(), Some(123));

        assert_eq!(
            cmd_release(&manager, args("env-prod", Some(123))).unwrap(),
            Outcome::Done
        );
        assert_eq!(manager.inspect("env-prod").unwrap(), None);
    }
}
