//! Command implementations for bucketlock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, and builds the store and lock manager they share from
//! the config file plus command-line overrides.

mod acquire;
mod init;
mod inspect;
mod list;
mod release;

use crate::cli::{Cli, Command};
use bucketlock::config::{Config, DEFAULT_CONFIG_FILE};
use bucketlock::error::Result;
use bucketlock::locks::LockManager;
use bucketlock::store::FsBlobStore;
use std::sync::Arc;

/// How a command that ran without error ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked.
    Done,
    /// The lock refused the request (held, not held, or not owned).
    Refused,
}

/// Store and settings resolved for one invocation.
pub struct CommandContext {
    pub config: Config,
    pub store: Arc<FsBlobStore>,
}

impl CommandContext {
    /// Resolve config and overrides, without touching the store.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(DEFAULT_CONFIG_FILE)?,
        };

        if let Some(bucket) = &cli.bucket {
            config.bucket = bucket.clone();
        }
        if let Some(root) = &cli.root {
            config.store_root = root.clone();
        }
        config.validate()?;

        let store = Arc::new(FsBlobStore::new(config.store_root.clone()));
        Ok(Self { config, store })
    }

    /// Build a lock manager bound to the configured bucket.
    pub fn manager(&self) -> Result<LockManager<FsBlobStore>> {
        LockManager::with_options(
            Arc::clone(&self.store),
            self.config.bucket.clone(),
            self.config.lock_options(),
        )
    }
}

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution.
pub fn dispatch(cli: Cli) -> Result<Outcome> {
    let ctx = CommandContext::resolve(&cli)?;

    match cli.command {
        Command::Init => init::cmd_init(&ctx),
        Command::Acquire(args) => acquire::cmd_acquire(&ctx.manager()?, args),
        Command::Release(args) => release::cmd_release(&ctx.manager()?, args),
        Command::Inspect(args) => inspect::cmd_inspect(&ctx.manager()?, args, &ctx.config),
        Command::List => list::cmd_list(&ctx.manager()?, &ctx.config),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use bucketlock::locks::AcquireStrategy;
    use tempfile::TempDir;

    /// A context over a fresh store root, bucket created.
    pub(crate) fn context_with_bucket() -> (TempDir, CommandContext) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            store_root: temp_dir.path().to_path_buf(),
            acquire_strategy: AcquireStrategy::Conditional,
            ..Config::default()
        };
        let store = Arc::new(FsBlobStore::new(temp_dir.path()));
        store.create_bucket(&config.bucket).unwrap();
        (temp_dir, CommandContext { config, store })
    }
}
