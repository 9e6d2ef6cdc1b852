use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Outcome of one polling cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub kind: &'static str,
    /// Exchanges dispatched (present slots)
    pub exchanges: usize,
    /// Empty registry slots
    pub skipped_exchanges: usize,
    /// Instrument workers spawned
    pub instruments: usize,
    pub attempts: usize,
    pub successes: usize,
    pub failures: usize,
    pub elapsed: Duration,
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cycle: {} exchanges ({} skipped), {} instruments, {} fetches ({} ok, {} failed) in {:?}",
            self.kind,
            self.exchanges,
            self.skipped_exchanges,
            self.instruments,
            self.attempts,
            self.successes,
            self.failures,
            self.elapsed,
        )
    }
}

/// Counters shared by every task of one cycle
#[derive(Debug, Default)]
pub(crate) struct CycleTally {
    exchanges: AtomicUsize,
    skipped_exchanges: AtomicUsize,
    instruments: AtomicUsize,
    attempts: AtomicUsize,
    successes: AtomicUsize,
    failures: AtomicUsize,
}

impl CycleTally {
    pub(crate) fn exchange_dispatched(&self) {
        self.exchanges.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn exchange_skipped(&self) {
        self.skipped_exchanges.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn instruments_spawned(&self, count: usize) {
        self.instruments.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Read after the cycle's barrier has released
    pub(crate) fn report(&self, kind: &'static str, elapsed: Duration) -> CycleReport {
        CycleReport {
            kind,
            exchanges: self.exchanges.load(Ordering::Relaxed),
            skipped_exchanges: self.skipped_exchanges.load(Ordering::Relaxed),
            instruments: self.instruments.load(Ordering::Relaxed),
            attempts: self.attempts.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            elapsed,
        }
    }
}
