use argus_core::{AssetType, CurrencyPair, Event, Price, Quantity};
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::{BroadcastError, ConversionError};

/// Aggregate statistics storage
///
/// Shared by every cycle and exchange concurrently; implementations must be
/// safe for concurrent insert/update. Fire-and-forget.
pub trait StatisticsSink: Send + Sync {
    fn record(
        &self,
        exchange: &str,
        pair: &CurrencyPair,
        asset_type: &AssetType,
        last: Price,
        volume: Quantity,
    );
}

/// Event broadcast transport
///
/// Errors are reported to the caller but are never fatal to a fetch.
#[async_trait]
pub trait EventBroadcaster: Send + Sync {
    async fn publish(&self, event: &Event) -> Result<(), BroadcastError>;
}

/// Currency conversion and display symbols
///
/// Used only for human-readable log output.
pub trait CurrencyConverter: Send + Sync {
    fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal, ConversionError>;

    fn symbol_for(&self, code: &str) -> Result<String, ConversionError>;

    fn is_fiat(&self, code: &str) -> bool {
        argus_core::currency::is_fiat(code)
    }
}
