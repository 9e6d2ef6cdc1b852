//! Completion barrier
//!
//! Counting fan-in primitive: a coordinator waits until exactly `expected`
//! units of work have each signalled once. Signals are counted atomically so
//! any number of workers may finish at the same instant without losing one.
//!
//! The poller never calls [`CompletionBarrier::signal`] directly. It builds the
//! barrier with [`CompletionBarrier::with_guards`], which hands out exactly one
//! [`CompletionGuard`] per unit of work. A guard signals when dropped, so every
//! exit path of a worker (including a panic) signals exactly once.

use log::error;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

use crate::error::BarrierError;

#[derive(Debug)]
pub struct CompletionBarrier {
    expected: usize,
    signalled: AtomicUsize,
    released: Notify,
}

impl CompletionBarrier {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            signalled: AtomicUsize::new(0),
            released: Notify::new(),
        }
    }

    /// Create a barrier together with exactly `expected` completion guards
    pub fn with_guards(expected: usize) -> (Arc<Self>, Vec<CompletionGuard>) {
        let barrier = Arc::new(Self::new(expected));
        let guards = (0..expected)
            .map(|_| CompletionGuard {
                barrier: Arc::clone(&barrier),
            })
            .collect();
        (barrier, guards)
    }

    /// Record one completion
    ///
    /// Signalling past the expected count is rejected and leaves the count
    /// unchanged.
    pub fn signal(&self) -> Result<(), BarrierError> {
        let previous = self
            .signalled
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                (count < self.expected).then_some(count + 1)
            })
            .map_err(|_| {
                error!(
                    "Completion barrier overflow: already received {} of {} signals",
                    self.expected, self.expected
                );
                BarrierError::Overflow {
                    expected: self.expected,
                }
            })?;

        if previous + 1 == self.expected {
            self.released.notify_waiters();
        }
        Ok(())
    }

    /// Wait until every expected signal has arrived
    ///
    /// Returns immediately for a barrier expecting zero signals.
    pub async fn wait(&self) {
        loop {
            // Register before checking so a release in between is not missed
            let released = self.released.notified();
            if self.is_complete() {
                return;
            }
            released.await;
        }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn signalled(&self) -> usize {
        self.signalled.load(Ordering::Acquire)
    }

    pub fn remaining(&self) -> usize {
        self.expected - self.signalled()
    }

    pub fn is_complete(&self) -> bool {
        self.signalled() >= self.expected
    }
}

/// One unit of work's completion signal
///
/// Signals its barrier exactly once, when completed or dropped.
#[derive(Debug)]
#[must_use = "dropping a guard immediately signals its barrier"]
pub struct CompletionGuard {
    barrier: Arc<CompletionBarrier>,
}

impl CompletionGuard {
    /// Signal completion now
    pub fn complete(self) {
        drop(self);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        // Overflow is already logged by the barrier; guards cannot cause it
        let _ = self.barrier.signal();
    }
}
