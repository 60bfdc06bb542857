//! CLI argument parsing for bucketlock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bucketlock: advisory locks for shared resources, stored as objects in a bucket.
///
/// A resource is locked while an object named after it exists in the bucket.
/// The object records the holder (a transaction/run id) and when it was taken.
#[derive(Parser, Debug)]
#[command(name = "bucketlock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: bucketlock.yaml, missing file means defaults).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Bucket name, overriding the config file.
    #[arg(long, global = true)]
    pub bucket: Option<String>,

    /// Store root directory, overriding the config file.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for bucketlock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the bucket under the store root.
    Init,

    /// Lock a resource for a holder.
    ///
    /// Exits with code 4 if the resource is already locked.
    Acquire(AcquireArgs),

    /// Unlock a resource.
    ///
    /// Without --holder any lock is removed. Exits with code 4 if there was
    /// nothing to release or the holder does not match.
    Release(ReleaseArgs),

    /// Show who holds a resource.
    Inspect(InspectArgs),

    /// List all locks in the bucket.
    List,
}

/// Arguments for the `acquire` command.
#[derive(Parser, Debug)]
pub struct AcquireArgs {
    /// Transaction/run id taking the lock.
    #[arg(allow_negative_numbers = true)]
    pub holder: i64,

    /// Resource to lock.
    pub resource: String,
}

/// Arguments for the `release` command.
#[derive(Parser, Debug)]
pub struct ReleaseArgs {
    /// Resource to unlock.
    pub resource: String,

    /// Only release if this holder owns the lock.
    #[arg(long, allow_negative_numbers = true)]
    pub holder: Option<i64>,
}

/// Arguments for the `inspect` command.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Resource to inspect.
    pub resource: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["bucketlock", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init));
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_acquire() {
        let cli = Cli::try_parse_from(["bucketlock", "acquire", "123", "env-prod"]).unwrap();
        if let Command::Acquire(args) = cli.command {
            assert_eq!(args.holder, 123);
            assert_eq!(args.resource, "env-prod");
        } else {
            panic!("Expected Acquire command");
        }
    }

    #[test]
    fn parse_acquire_negative_holder() {
        let cli = Cli::try_parse_from(["bucketlock", "acquire", "-5", "env-prod"]).unwrap();
        if let Command::Acquire(args) = cli.command {
            assert_eq!(args.holder, -5);
        } else {
            panic!("Expected Acquire command");
        }
    }

    #[test]
    fn parse_acquire_rejects_non_numeric_holder() {
        assert!(Cli::try_parse_from(["bucketlock", "acquire", "abc", "env-prod"]).is_err());
    }

    #[test]
    fn parse_release() {
        let cli = Cli::try_parse_from(["bucketlock", "release", "env-prod"]).unwrap();
        if let Command::Release(args) = cli.command {
            assert_eq!(args.resource, "env-prod");
            assert_eq!(args.holder, None);
        } else {
            panic!("Expected Release command");
        }
    }

    #[test]
    fn parse_release_with_holder() {
        let cli =
            Cli::try_parse_from(["bucketlock", "release", "env-prod", "--holder", "123"]).unwrap();
        if let Command::Release(args) = cli.command {
            assert_eq!(args.holder, Some(123));
        } else {
            panic!("Expected Release command");
        }
    }

    #[test]
    fn parse_inspect() {
        let cli = Cli::try_parse_from(["bucketlock", "inspect", "env-stage"]).unwrap();
        if let Command::Inspect(args) = cli.command {
            assert_eq!(args.resource, "env-stage");
        } else {
            panic!("Expected Inspect command");
        }
    }

    #[test]
    fn parse_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bucketlock",
            "list",
            "--bucket",
            "deploy-locks",
            "--root",
            "/tmp/store",
            "-v",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::List));
        assert_eq!(cli.bucket.as_deref(), Some("deploy-locks"));
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/store")));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["bucketlock"]).is_err());
    }
}
