use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::instruments::{AssetType, CurrencyPair};
use crate::values::{Price, Quantity, Timestamp};

/// Order book level (price + amount)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Price,
    pub amount: Quantity,
}

impl BookLevel {
    pub fn new(price: Price, amount: Quantity) -> Self {
        Self { price, amount }
    }

    /// Price times amount
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }
}

/// Aggregate of one side of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookTotals {
    /// Sum of amounts, in base currency
    pub amount: Quantity,
    /// Sum of price * amount, in quote currency
    pub value: Decimal,
}

impl BookTotals {
    fn of(levels: &[BookLevel]) -> Self {
        levels.iter().fold(BookTotals::default(), |acc, level| BookTotals {
            amount: acc.amount + level.amount,
            value: acc.value + level.notional(),
        })
    }
}

/// Order book snapshot for one (exchange, pair, asset type)
///
/// Bids are ordered best (highest) first, asks best (lowest) first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub exchange: String,
    pub pair: CurrencyPair,
    pub asset_type: AssetType,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
    pub timestamp: Timestamp,
}

impl OrderBookSnapshot {
    pub fn new(
        exchange: impl Into<String>,
        pair: CurrencyPair,
        asset_type: AssetType,
        bids: Vec<BookLevel>,
        asks: Vec<BookLevel>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            exchange: exchange.into(),
            pair,
            asset_type,
            bids,
            asks,
            timestamp,
        }
    }

    pub fn total_bids(&self) -> BookTotals {
        BookTotals::of(&self.bids)
    }

    pub fn total_asks(&self) -> BookTotals {
        BookTotals::of(&self.asks)
    }

    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
