use argus_core::AssetType;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::barrier::{CompletionBarrier, CompletionGuard};
use crate::kind::FetchKind;
use crate::registry::ExchangeSlot;
use crate::report::CycleTally;
use crate::worker::{InstrumentWorker, PollContext};

/// Fans one exchange's instruments out to workers and waits for all of them
pub(crate) struct ExchangeDispatcher<K> {
    shared: Arc<PollContext<K>>,
    tally: Arc<CycleTally>,
}

impl<K: FetchKind> ExchangeDispatcher<K> {
    pub(crate) fn new(shared: Arc<PollContext<K>>, tally: Arc<CycleTally>) -> Self {
        Self { shared, tally }
    }

    /// Poll one registry slot, then signal `done`
    pub(crate) async fn run(self, slot: ExchangeSlot, done: CompletionGuard) {
        let Some(exchange) = slot else {
            self.tally.exchange_skipped();
            done.complete();
            return;
        };
        self.tally.exchange_dispatched();

        let name = exchange.name().to_string();
        let kind = self.shared.kind.name();

        let asset_types = exchange.supported_asset_types().unwrap_or_else(|e| {
            warn!("Failed to get {} asset types. Error: {}", name, e);
            Vec::new()
        });
        let instruments = exchange.enabled_instruments();

        if asset_types.is_empty() {
            warn!(
                "{} has no asset types, skipping {} {} instruments this cycle",
                name,
                instruments.len(),
                kind
            );
            done.complete();
            return;
        }

        debug!(
            "Dispatching {} {} instruments x {} asset types",
            name,
            instruments.len(),
            asset_types.len()
        );

        let asset_types: Arc<[AssetType]> = asset_types.into();
        let (barrier, guards) = CompletionBarrier::with_guards(instruments.len());
        self.tally.instruments_spawned(instruments.len());

        for (pair, guard) in instruments.into_iter().zip(guards) {
            let worker = InstrumentWorker::new(
                Arc::clone(&self.shared),
                Arc::clone(&self.tally),
                Arc::clone(&exchange),
                pair,
                Arc::clone(&asset_types),
            );
            tokio::spawn(worker.run(guard));
        }

        barrier.wait().await;
        info!("Finished exchange {} {} fetching.", name, kind);
        done.complete();
    }
}
