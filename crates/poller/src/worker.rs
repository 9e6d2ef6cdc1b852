use argus_core::{AssetType, CurrencyPair};
use argus_ports::{Exchange, FetchError, FetchResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::barrier::{CompletionBarrier, CompletionGuard};
use crate::config::AssetFanOut;
use crate::kind::FetchKind;
use crate::report::CycleTally;
use crate::reporting::{FetchContext, ReportingPipeline};

/// State shared by every task a coordinator spawns
pub(crate) struct PollContext<K> {
    pub(crate) kind: K,
    pub(crate) pipeline: Arc<ReportingPipeline>,
    pub(crate) limiter: Arc<Semaphore>,
    pub(crate) fetch_timeout: Duration,
    pub(crate) fan_out: AssetFanOut,
}

/// Polls one currency pair on one exchange across its asset types
pub(crate) struct InstrumentWorker<K> {
    shared: Arc<PollContext<K>>,
    tally: Arc<CycleTally>,
    exchange: Arc<dyn Exchange>,
    pair: CurrencyPair,
    asset_types: Arc<[AssetType]>,
}

impl<K> Clone for InstrumentWorker<K> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            tally: Arc::clone(&self.tally),
            exchange: Arc::clone(&self.exchange),
            pair: self.pair.clone(),
            asset_types: Arc::clone(&self.asset_types),
        }
    }
}

impl<K: FetchKind> InstrumentWorker<K> {
    pub(crate) fn new(
        shared: Arc<PollContext<K>>,
        tally: Arc<CycleTally>,
        exchange: Arc<dyn Exchange>,
        pair: CurrencyPair,
        asset_types: Arc<[AssetType]>,
    ) -> Self {
        Self {
            shared,
            tally,
            exchange,
            pair,
            asset_types,
        }
    }

    /// Attempt every asset type, then signal `done`
    ///
    /// A failed fetch never stops the remaining asset types.
    pub(crate) async fn run(self, done: CompletionGuard) {
        match self.shared.fan_out {
            AssetFanOut::Sequential => {
                for asset_type in self.asset_types.iter() {
                    self.poll(asset_type).await;
                }
            }
            AssetFanOut::Concurrent => {
                let (barrier, guards) = CompletionBarrier::with_guards(self.asset_types.len());
                for (index, guard) in guards.into_iter().enumerate() {
                    let worker = self.clone();
                    tokio::spawn(async move {
                        worker.poll(&worker.asset_types[index]).await;
                        guard.complete();
                    });
                }
                barrier.wait().await;
            }
        }
        done.complete();
    }

    async fn poll(&self, asset_type: &AssetType) {
        let ctx = FetchContext {
            exchange: self.exchange.name(),
            pair: &self.pair,
            asset_type,
        };

        self.tally.attempt();
        match self.fetch(asset_type).await {
            Ok(snapshot) => {
                self.tally.success();
                self.shared
                    .kind
                    .report(&self.shared.pipeline, ctx, snapshot)
                    .await;
            }
            Err(e) => {
                self.tally.failure();
                self.shared
                    .pipeline
                    .fetch_failed(self.shared.kind.name(), ctx, &e);
            }
        }
    }

    /// One bounded, deadline-limited fetch
    ///
    /// The limiter permit is held only for the network call itself.
    async fn fetch(&self, asset_type: &AssetType) -> FetchResult<K::Snapshot> {
        let _permit = self
            .shared
            .limiter
            .acquire()
            .await
            .map_err(|_| FetchError::Unavailable("fetch limiter closed".to_string()))?;

        let deadline = self.shared.fetch_timeout;
        tokio::time::timeout(
            deadline,
            self.shared
                .kind
                .fetch(&*self.exchange, &self.pair, asset_type),
        )
        .await
        .unwrap_or_else(|_| Err(FetchError::Timeout(deadline)))
    }
}
