use argus_core::{AssetType, CurrencyPair, OrderBookSnapshot, TickerSnapshot};
use async_trait::async_trait;

use crate::error::{FetchResult, RegistryError};

/// Read-only view of an exchange's configuration
///
/// Implements Interface Segregation - only identity and instrument enumeration.
/// Values may change between calls; the poller reads them once per cycle.
pub trait ExchangeInfo: Send + Sync {
    /// Exchange display name
    fn name(&self) -> &str;

    /// Currency pairs currently enabled for polling
    fn enabled_instruments(&self) -> Vec<CurrencyPair>;

    /// Asset types this exchange supports, in polling order
    fn supported_asset_types(&self) -> Result<Vec<AssetType>, RegistryError>;
}

/// One network round trip per call
///
/// Implements Interface Segregation - only market data fetching capability.
#[async_trait]
pub trait MarketDataFetcher: Send + Sync {
    async fn fetch_ticker(
        &self,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> FetchResult<TickerSnapshot>;

    async fn fetch_order_book(
        &self,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> FetchResult<OrderBookSnapshot>;
}

/// Combined trait for a pollable exchange
///
/// Supertrait combining ExchangeInfo and MarketDataFetcher so the poller can
/// hold a single `Arc<dyn Exchange>` per registry slot.
pub trait Exchange: ExchangeInfo + MarketDataFetcher {}

// Blanket implementation: anything implementing both traits is an Exchange
impl<T: ExchangeInfo + MarketDataFetcher> Exchange for T {}
