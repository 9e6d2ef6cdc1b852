//! Polling service - both cycles over one registry
//!
//! The ticker and order book cycles run as independent tasks. They share the
//! registry and the reporting sinks but nothing else, so a slow order book
//! cycle never delays tickers.

use argus_core::{AssetType, CurrencyPair};
use argus_poller::{CycleCoordinator, FetchKind, OrderBooks, Tickers};
use argus_relay::EventRelay;
use argus_stats::StatisticsStore;
use log::{error, info};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::bootstrap::PollerBootstrap;
use crate::config::{ConfigError, PollerConfigFile};

/// Cycles completed by each coordinator before shutdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceSummary {
    pub ticker_cycles: usize,
    pub orderbook_cycles: usize,
}

pub struct PollingService {
    tickers: Option<Arc<CycleCoordinator<Tickers>>>,
    order_books: Option<Arc<CycleCoordinator<OrderBooks>>>,
    stats: Arc<StatisticsStore>,
    relay: Arc<EventRelay>,
}

impl PollingService {
    /// Build the coordinators for every enabled cycle
    pub fn new(bootstrap: &PollerBootstrap, config: &PollerConfigFile) -> Result<Self, ConfigError> {
        let tickers = if config.ticker.enabled {
            Some(Arc::new(CycleCoordinator::new(
                Tickers,
                Arc::clone(&bootstrap.registry),
                Arc::clone(&bootstrap.pipeline),
                config.fetch.to_poller_config(&config.ticker),
            )?))
        } else {
            info!("Ticker cycle disabled");
            None
        };

        let order_books = if config.orderbook.enabled {
            Some(Arc::new(CycleCoordinator::new(
                OrderBooks,
                Arc::clone(&bootstrap.registry),
                Arc::clone(&bootstrap.pipeline),
                config.fetch.to_poller_config(&config.orderbook),
            )?))
        } else {
            info!("Orderbook cycle disabled");
            None
        };

        Ok(Self {
            tickers,
            order_books,
            stats: Arc::clone(&bootstrap.stats),
            relay: Arc::clone(&bootstrap.relay),
        })
    }

    pub fn tickers(&self) -> Option<&Arc<CycleCoordinator<Tickers>>> {
        self.tickers.as_ref()
    }

    pub fn order_books(&self) -> Option<&Arc<CycleCoordinator<OrderBooks>>> {
        self.order_books.as_ref()
    }

    /// Run every enabled cycle until cancelled
    ///
    /// Each coordinator finishes its current cycle before returning.
    pub async fn run(&self, cancel: CancellationToken) -> ServiceSummary {
        let tickers = self.tickers.clone().map(|c| spawn_cycles(c, cancel.clone()));
        let order_books = self
            .order_books
            .clone()
            .map(|c| spawn_cycles(c, cancel.clone()));

        let summary = ServiceSummary {
            ticker_cycles: join_cycles("ticker", tickers).await,
            orderbook_cycles: join_cycles("orderbook", order_books).await,
        };

        info!(
            "Polling stopped: {} ticker cycles, {} orderbook cycles, {} events published, {} dropped",
            summary.ticker_cycles,
            summary.orderbook_cycles,
            self.relay.published(),
            self.relay.dropped()
        );
        self.log_rankings();
        summary
    }

    /// Log the exchanges for every pair ranked by price and by volume
    pub fn log_rankings(&self) {
        let markets: BTreeSet<(CurrencyPair, AssetType)> = self
            .stats
            .snapshot()
            .into_iter()
            .map(|record| (record.pair, record.asset_type))
            .collect();

        for (pair, asset_type) in &markets {
            let by_price = self.stats.sorted_by_price(pair, asset_type, true);
            let by_volume = self.stats.sorted_by_volume(pair, asset_type, true);
            if by_price.len() < 2 {
                continue;
            }

            let prices: Vec<String> = by_price
                .iter()
                .map(|r| format!("{} {}", r.exchange, r.price))
                .collect();
            let volumes: Vec<String> = by_volume
                .iter()
                .map(|r| format!("{} {}", r.exchange, r.volume))
                .collect();

            info!("{} {} by price: {}", pair, asset_type, prices.join(", "));
            info!("{} {} by volume: {}", pair, asset_type, volumes.join(", "));
        }
    }
}

fn spawn_cycles<K: FetchKind>(
    coordinator: Arc<CycleCoordinator<K>>,
    cancel: CancellationToken,
) -> JoinHandle<usize> {
    tokio::spawn(async move { coordinator.run(cancel).await })
}

async fn join_cycles(kind: &str, handle: Option<JoinHandle<usize>>) -> usize {
    let Some(handle) = handle else {
        return 0;
    };
    match handle.await {
        Ok(cycles) => cycles,
        Err(e) => {
            error!("{} updater routine failed: {}", kind, e);
            0
        }
    }
}
