//! Implementation of the `bucketlock init` command.

use super::{CommandContext, Outcome};
use bucketlock::error::{LockError, Result};

/// Create the configured bucket under the store root.
///
/// Running it again on an existing bucket is harmless.
pub fn cmd_init(ctx: &CommandContext) -> Result<Outcome> {
    let dir = ctx
        .store
        .create_bucket(&ctx.config.bucket)
        .map_err(|e| LockError::Unreachable {
            bucket: ctx.config.bucket.clone(),
            reason: format!("failed to create bucket directory: {}", e),
        })?;

    println!("Bucket '{}' ready at {}", ctx.config.bucket, dir.display());
    Ok(Outcome::Done)
}
