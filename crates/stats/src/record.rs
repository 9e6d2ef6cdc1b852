use argus_core::{AssetType, CurrencyPair, Price, Quantity};

/// Identity of a statistics record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatKey {
    pub exchange: String,
    pub pair: CurrencyPair,
    pub asset_type: AssetType,
}

impl StatKey {
    pub fn new(exchange: impl Into<String>, pair: CurrencyPair, asset_type: AssetType) -> Self {
        Self {
            exchange: exchange.into(),
            pair,
            asset_type,
        }
    }
}

/// Latest price and volume seen for one key
#[derive(Debug, Clone, PartialEq)]
pub struct StatRecord {
    pub exchange: String,
    pub pair: CurrencyPair,
    pub asset_type: AssetType,
    pub price: Price,
    pub volume: Quantity,
    /// Number of times this record has been written
    pub updates: u64,
}
