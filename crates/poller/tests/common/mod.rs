//! Shared fixtures for poller integration tests

#![allow(dead_code)]

use argus_clock::SystemClock;
use argus_core::{
    AssetType, BookLevel, CurrencyPair, Event, OrderBookSnapshot, TickerSnapshot,
};
use argus_poller::{ExchangeRegistry, ReportingPipeline};
use argus_ports::{
    ConversionError, CurrencyConverter, Exchange, ExchangeInfo, FetchError, FetchResult,
    MarketDataFetcher, RegistryError,
};
use argus_relay::{ChannelSubscriber, EventRelay, Subscriber};
use argus_stats::StatisticsStore;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// One recorded fetch call
#[derive(Debug, Clone)]
pub struct FetchCall {
    pub pair: CurrencyPair,
    pub asset_type: AssetType,
    pub at: Instant,
}

/// Exchange whose answers are fixed up front
pub struct ScriptedExchange {
    name: String,
    pairs: Mutex<Vec<CurrencyPair>>,
    asset_types: Option<Vec<AssetType>>,
    failing_pairs: Vec<CurrencyPair>,
    failing_assets: Vec<AssetType>,
    delay: Duration,
    hang: bool,
    calls: Mutex<Vec<FetchCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedExchange {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            pairs: Mutex::new(vec![CurrencyPair::btc_usd()]),
            asset_types: Some(vec![AssetType::spot()]),
            failing_pairs: Vec::new(),
            failing_assets: Vec::new(),
            delay: Duration::ZERO,
            hang: false,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_pairs(self, pairs: Vec<CurrencyPair>) -> Self {
        *self.pairs.lock() = pairs;
        self
    }

    pub fn with_asset_types(mut self, asset_types: Vec<AssetType>) -> Self {
        self.asset_types = Some(asset_types);
        self
    }

    /// `supported_asset_types` returns an error
    pub fn without_asset_types(mut self) -> Self {
        self.asset_types = None;
        self
    }

    pub fn failing_pair(mut self, pair: CurrencyPair) -> Self {
        self.failing_pairs.push(pair);
        self
    }

    pub fn failing_asset(mut self, asset_type: AssetType) -> Self {
        self.failing_assets.push(asset_type);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Every fetch never completes
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn set_pairs(&self, pairs: Vec<CurrencyPair>) {
        *self.pairs.lock() = pairs;
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn respond(&self, pair: &CurrencyPair, asset_type: &AssetType) -> FetchResult<()> {
        self.calls.lock().push(FetchCall {
            pair: pair.clone(),
            asset_type: asset_type.clone(),
            at: Instant::now(),
        });

        let _in_flight = InFlight::enter(&self.in_flight, &self.max_in_flight);

        if self.hang {
            std::future::pending::<()>().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.failing_pairs.contains(pair) || self.failing_assets.contains(asset_type) {
            return Err(FetchError::Network(format!(
                "{} {} {} scripted failure",
                self.name, pair, asset_type
            )));
        }
        Ok(())
    }
}

struct InFlight<'a> {
    current: &'a AtomicUsize,
}

impl<'a> InFlight<'a> {
    fn enter(current: &'a AtomicUsize, max: &AtomicUsize) -> Self {
        let now = current.fetch_add(1, Ordering::SeqCst) + 1;
        max.fetch_max(now, Ordering::SeqCst);
        Self { current }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ExchangeInfo for ScriptedExchange {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled_instruments(&self) -> Vec<CurrencyPair> {
        self.pairs.lock().clone()
    }

    fn supported_asset_types(&self) -> Result<Vec<AssetType>, RegistryError> {
        self.asset_types
            .clone()
            .ok_or_else(|| RegistryError::AssetTypesUnavailable(self.name.clone()))
    }
}

#[async_trait]
impl MarketDataFetcher for ScriptedExchange {
    async fn fetch_ticker(
        &self,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> FetchResult<TickerSnapshot> {
        self.respond(pair, asset_type).await?;
        Ok(TickerSnapshot::new(
            self.name.clone(),
            pair.clone(),
            asset_type.clone(),
            dec!(100),
            dec!(2),
            Utc::now(),
        ))
    }

    async fn fetch_order_book(
        &self,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> FetchResult<OrderBookSnapshot> {
        self.respond(pair, asset_type).await?;
        Ok(OrderBookSnapshot::new(
            self.name.clone(),
            pair.clone(),
            asset_type.clone(),
            vec![BookLevel::new(dec!(99), dec!(1))],
            vec![BookLevel::new(dec!(101), dec!(1))],
            Utc::now(),
        ))
    }
}

/// Identity conversion with fiat symbols
pub struct PassThrough;

impl CurrencyConverter for PassThrough {
    fn convert(&self, amount: Decimal, _from: &str, _to: &str) -> Result<Decimal, ConversionError> {
        Ok(amount)
    }

    fn symbol_for(&self, code: &str) -> Result<String, ConversionError> {
        argus_core::currency::fiat_symbol(code)
            .map(str::to_string)
            .ok_or_else(|| ConversionError::UnknownCurrency(code.to_string()))
    }
}

/// Everything a coordinator reports into
pub struct Harness {
    pub stats: Arc<StatisticsStore>,
    pub relay: Arc<EventRelay>,
    pub events: ChannelSubscriber<Event>,
    pub pipeline: Arc<ReportingPipeline>,
}

impl Harness {
    pub fn new() -> Self {
        let _ = env_logger::try_init();

        let stats = Arc::new(StatisticsStore::new());
        let relay = Arc::new(EventRelay::new(1024));
        let events = relay.subscribe();
        let pipeline = Arc::new(ReportingPipeline::new(
            stats.clone(),
            relay.clone(),
            Arc::new(PassThrough),
            Arc::new(SystemClock::new()),
            "USD",
        ));

        Self {
            stats,
            relay,
            events,
            pipeline,
        }
    }

    /// Every event published so far
    pub fn drain_events(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.events.try_next() {
            events.push(event);
        }
        events
    }
}

pub fn registry(exchanges: &[Arc<ScriptedExchange>]) -> Arc<ExchangeRegistry> {
    Arc::new(ExchangeRegistry::from_exchanges(
        exchanges
            .iter()
            .map(|e| Arc::clone(e) as Arc<dyn Exchange>),
    ))
}
