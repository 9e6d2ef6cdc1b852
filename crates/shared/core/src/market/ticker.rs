use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::instruments::{AssetType, CurrencyPair};
use crate::values::{Price, Quantity, Timestamp};

/// Price ticker for one (exchange, pair, asset type)
///
/// Produced fresh on every poll; no history is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSnapshot {
    pub exchange: String,
    pub pair: CurrencyPair,
    pub asset_type: AssetType,
    pub last: Price,
    pub ask: Price,
    pub bid: Price,
    pub high: Price,
    pub low: Price,
    pub volume: Quantity,
    pub timestamp: Timestamp,
}

impl TickerSnapshot {
    /// Create a ticker where every price equals `last`
    pub fn new(
        exchange: impl Into<String>,
        pair: CurrencyPair,
        asset_type: AssetType,
        last: Price,
        volume: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            exchange: exchange.into(),
            pair,
            asset_type,
            last,
            ask: last,
            bid: last,
            high: last,
            low: last,
            volume,
            timestamp,
        }
    }

    pub fn with_quote(mut self, bid: Price, ask: Price) -> Self {
        self.bid = bid;
        self.ask = ask;
        self
    }

    pub fn with_range(mut self, high: Price, low: Price) -> Self {
        self.high = high;
        self.low = low;
        self
    }

    /// Ask minus bid
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }

    /// Midpoint between bid and ask
    pub fn mid(&self) -> Price {
        (self.bid + self.ask) / Decimal::TWO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ticker_quote_helpers() {
        let ticker = TickerSnapshot::new(
            "bitstamp",
            CurrencyPair::btc_usd(),
            AssetType::spot(),
            dec!(50000),
            dec!(12.5),
            Utc::now(),
        )
        .with_quote(dec!(49990), dec!(50010))
        .with_range(dec!(51000), dec!(49000));

        assert_eq!(ticker.spread(), dec!(20));
        assert_eq!(ticker.mid(), dec!(50000));
        assert_eq!(ticker.high, dec!(51000));
        assert_eq!(ticker.low, dec!(49000));
    }
}
