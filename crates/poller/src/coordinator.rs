//! Cycle coordinator
//!
//! Two states: Running (one dispatcher per registry slot, all concurrent,
//! joined by a completion barrier) and Idle (fixed sleep). The registry is
//! snapshotted once when a cycle starts.

use arc_swap::ArcSwapOption;
use log::info;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::barrier::CompletionBarrier;
use crate::config::PollerConfig;
use crate::dispatcher::ExchangeDispatcher;
use crate::error::Result;
use crate::kind::FetchKind;
use crate::registry::ExchangeRegistry;
use crate::report::{CycleReport, CycleTally};
use crate::reporting::ReportingPipeline;
use crate::worker::PollContext;

pub struct CycleCoordinator<K: FetchKind> {
    shared: Arc<PollContext<K>>,
    registry: Arc<ExchangeRegistry>,
    interval: Duration,
    cycles: AtomicUsize,
    last_report: ArcSwapOption<CycleReport>,
}

impl<K: FetchKind> CycleCoordinator<K> {
    pub fn new(
        kind: K,
        registry: Arc<ExchangeRegistry>,
        pipeline: Arc<ReportingPipeline>,
        config: PollerConfig,
    ) -> Result<Self> {
        config.validate()?;

        let shared = PollContext {
            kind,
            pipeline,
            limiter: Arc::new(Semaphore::new(config.max_concurrent_fetches)),
            fetch_timeout: config.fetch_timeout,
            fan_out: config.asset_fan_out,
        };

        Ok(Self {
            shared: Arc::new(shared),
            registry,
            interval: config.interval,
            cycles: AtomicUsize::new(0),
            last_report: ArcSwapOption::empty(),
        })
    }

    pub fn kind(&self) -> &'static str {
        self.shared.kind.name()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch permits not currently held by a worker
    pub fn available_permits(&self) -> usize {
        self.shared.limiter.available_permits()
    }

    pub fn cycles_completed(&self) -> usize {
        self.cycles.load(Ordering::Acquire)
    }

    pub fn last_report(&self) -> Option<Arc<CycleReport>> {
        self.last_report.load_full()
    }

    /// Run one full cycle over a fresh registry snapshot
    ///
    /// Returns only after every dispatcher, and every worker they spawned,
    /// has signalled completion.
    pub async fn run_cycle(&self) -> CycleReport {
        let started = Instant::now();
        let snapshot = self.registry.snapshot();
        let tally = Arc::new(CycleTally::default());

        let (barrier, guards) = CompletionBarrier::with_guards(snapshot.len());
        for (slot, guard) in snapshot.iter().cloned().zip(guards) {
            let dispatcher = ExchangeDispatcher::new(Arc::clone(&self.shared), Arc::clone(&tally));
            tokio::spawn(dispatcher.run(slot, guard));
        }
        barrier.wait().await;

        let report = tally.report(self.kind(), started.elapsed());
        info!("All enabled currency {}s fetched. {}", self.kind(), report);

        self.cycles.fetch_add(1, Ordering::AcqRel);
        self.last_report.store(Some(Arc::new(report.clone())));
        report
    }

    /// Cycle until cancelled
    ///
    /// Cancellation is observed between cycles; a running cycle always
    /// completes. Returns the number of cycles run.
    pub async fn run(&self, cancel: CancellationToken) -> usize {
        info!(
            "Starting {} updater routine ({:?} interval)",
            self.kind(),
            self.interval
        );

        let mut cycles = 0;
        while !cancel.is_cancelled() {
            self.run_cycle().await;
            cycles += 1;

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(
            "Stopped {} updater routine after {} cycles",
            self.kind(),
            cycles
        );
        cycles
    }
}
