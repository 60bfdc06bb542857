//! Per-call deadlines and cancellation.
//!
//! Every blob store call takes a [`Deadline`]. Stores check it before doing
//! any work and the lock manager checks it again between the remote calls of
//! a single operation, so an interrupted acquire never writes after the
//! caller gave up.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Why a deadline check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    /// The caller's cancel token was triggered.
    Cancelled,
    /// The deadline passed.
    TimedOut,
}

/// A shared cancellation flag.
///
/// Clones observe the same flag, so one clone can be handed to a worker and
/// another kept by whoever decides to abort it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Deadline and optional cancel token for one lock operation.
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    expires_at: Option<Instant>,
    cancel: Option<CancelToken>,
}

impl Deadline {
    /// A deadline that never expires and cannot be cancelled.
    pub fn none() -> Self {
        Self::default()
    }

    /// A deadline that expires `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            expires_at: Some(Instant::now() + timeout),
            cancel: None,
        }
    }

    /// Build a deadline from an optional timeout.
    pub fn from_timeout(timeout: Option<Duration>) -> Self {
        timeout.map(Self::after).unwrap_or_default()
    }

    /// Attach a cancel token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Time left before expiry, `None` when unbounded.
    ///
    /// Returns `Some(Duration::ZERO)` once expired.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Check whether the operation may continue.
    ///
    /// Cancellation is reported ahead of expiry.
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(Interrupted::Cancelled);
        }
        match self.expires_at {
            Some(at) if Instant::now() >= at => Err(Interrupted::TimedOut),
            _ => Ok(()),
        }
    }
}
