use argus_clock::SystemClock;
use argus_core::{AssetType, CurrencyPair, OrderBookSnapshot, TickerSnapshot};
use argus_ports::{
    Clock, ExchangeInfo, FetchError, FetchResult, MarketDataFetcher, RegistryError,
};
use async_trait::async_trait;
use log::{debug, info};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::infrastructure::MarketGenerator;
use crate::model::{MarketState, SimulationConfig};

/// HTTP-style code returned for pairs the exchange does not list
const UNKNOWN_PAIR_CODE: i32 = 404;

/// A simulated exchange answering ticker and order book fetches
pub struct SimulatedExchange {
    name: String,
    config: SimulationConfig,

    /// Pairs listed on the exchange
    available: Vec<CurrencyPair>,

    /// Subset of `available` currently enabled for polling
    enabled: RwLock<Vec<CurrencyPair>>,

    /// `None` means the exchange cannot report its asset types
    asset_types: Option<Vec<AssetType>>,

    /// Lock order: generator before markets
    generator: Mutex<MarketGenerator>,
    markets: Mutex<HashMap<(CurrencyPair, AssetType), MarketState>>,

    clock: Arc<dyn Clock>,
}

impl SimulatedExchange {
    /// Create an exchange listing `pairs`, all enabled, trading spot only
    pub fn new(
        name: impl Into<String>,
        pairs: Vec<CurrencyPair>,
        config: SimulationConfig,
    ) -> Result<Self> {
        config.validate()?;
        let name = name.into();
        info!(
            "Simulated exchange {} listing {} pairs (seed {})",
            name,
            pairs.len(),
            config.seed
        );

        Ok(Self {
            name,
            generator: Mutex::new(MarketGenerator::new(&config)),
            config,
            enabled: RwLock::new(pairs.clone()),
            available: pairs,
            asset_types: Some(vec![AssetType::spot()]),
            markets: Mutex::new(HashMap::new()),
            clock: Arc::new(SystemClock::new()),
        })
    }

    pub fn with_asset_types(mut self, asset_types: Vec<AssetType>) -> Self {
        self.asset_types = Some(asset_types);
        self
    }

    /// Make `supported_asset_types` fail
    pub fn without_asset_types(mut self) -> Self {
        self.asset_types = None;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn available_pairs(&self) -> &[CurrencyPair] {
        &self.available
    }

    /// Enable a listed pair; returns false if the pair is not listed
    pub fn enable_pair(&self, pair: &CurrencyPair) -> bool {
        if !self.available.contains(pair) {
            return false;
        }
        let mut enabled = self.enabled.write();
        if !enabled.contains(pair) {
            enabled.push(pair.clone());
            debug!("{} enabled {}", self.name, pair);
        }
        true
    }

    /// Disable a pair; returns false if it was not enabled
    pub fn disable_pair(&self, pair: &CurrencyPair) -> bool {
        let mut enabled = self.enabled.write();
        let before = enabled.len();
        enabled.retain(|p| p != pair);
        let removed = enabled.len() != before;
        if removed {
            debug!("{} disabled {}", self.name, pair);
        }
        removed
    }

    /// Current state of a market, if it has been fetched at least once
    pub fn market(&self, pair: &CurrencyPair, asset_type: &AssetType) -> Option<MarketState> {
        self.markets
            .lock()
            .get(&(pair.clone(), asset_type.clone()))
            .cloned()
    }

    /// Latency, listing checks and random failure shared by both fetch kinds
    async fn round_trip(&self, pair: &CurrencyPair, asset_type: &AssetType) -> FetchResult<()> {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        let supported = self
            .asset_types
            .as_ref()
            .is_some_and(|types| types.contains(asset_type));
        if !supported {
            return Err(FetchError::UnsupportedAssetType(asset_type.to_string()));
        }

        if !self.available.contains(pair) {
            return Err(FetchError::Api {
                code: UNKNOWN_PAIR_CODE,
                message: format!("{} does not list {}", self.name, pair),
            });
        }

        let roll = self.generator.lock().roll();
        if roll < self.config.failure_rate {
            return Err(FetchError::Network(format!(
                "{}: simulated connection reset",
                self.name
            )));
        }
        Ok(())
    }

    /// Step the market once and return its new state
    fn advance(&self, pair: &CurrencyPair, asset_type: &AssetType) -> MarketState {
        let mut generator = self.generator.lock();
        let mut markets = self.markets.lock();
        let state = markets
            .entry((pair.clone(), asset_type.clone()))
            .or_insert_with(|| MarketState::open(self.config.initial_price(&pair.to_string())));
        generator.step(state);
        state.clone()
    }
}

impl ExchangeInfo for SimulatedExchange {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled_instruments(&self) -> Vec<CurrencyPair> {
        self.enabled.read().clone()
    }

    fn supported_asset_types(&self) -> std::result::Result<Vec<AssetType>, RegistryError> {
        self.asset_types
            .clone()
            .ok_or_else(|| RegistryError::AssetTypesUnavailable(self.name.clone()))
    }
}

#[async_trait]
impl MarketDataFetcher for SimulatedExchange {
    async fn fetch_ticker(
        &self,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> FetchResult<TickerSnapshot> {
        self.round_trip(pair, asset_type).await?;

        let state = self.advance(pair, asset_type);
        let offset = self.config.tick_size;

        Ok(TickerSnapshot::new(
            self.name.clone(),
            pair.clone(),
            asset_type.clone(),
            state.last,
            state.volume,
            self.clock.now(),
        )
        .with_quote(state.last - offset, state.last + offset)
        .with_range(state.high, state.low))
    }

    async fn fetch_order_book(
        &self,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> FetchResult<OrderBookSnapshot> {
        self.round_trip(pair, asset_type).await?;

        let state = self.advance(pair, asset_type);
        let (bids, asks) = self.generator.lock().book(state.last);

        Ok(OrderBookSnapshot::new(
            self.name.clone(),
            pair.clone(),
            asset_type.clone(),
            bids,
            asks,
            self.clock.now(),
        ))
    }
}
