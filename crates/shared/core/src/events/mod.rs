//! Broadcast events
//!
//! One event is built per successful fetch and handed to the broadcast
//! transport. Events are immutable once built.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::instruments::AssetType;
use crate::market::{OrderBookSnapshot, TickerSnapshot};
use crate::values::Timestamp;

/// Kind of market data update carried by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "ticker_update")]
    TickerUpdate,
    #[serde(rename = "orderbook_update")]
    OrderBookUpdate,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TickerUpdate => "ticker_update",
            Self::OrderBookUpdate => "orderbook_update",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot carried by an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    Ticker(TickerSnapshot),
    OrderBook(OrderBookSnapshot),
}

impl From<TickerSnapshot> for EventPayload {
    fn from(ticker: TickerSnapshot) -> Self {
        Self::Ticker(ticker)
    }
}

impl From<OrderBookSnapshot> for EventPayload {
    fn from(book: OrderBookSnapshot) -> Self {
        Self::OrderBook(book)
    }
}

/// Event envelope handed to the broadcaster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub exchange: String,
    pub asset_type: AssetType,
    #[serde(rename = "event")]
    pub kind: EventKind,
    #[serde(rename = "data")]
    pub payload: EventPayload,
    pub timestamp: Timestamp,
}

impl Event {
    /// Build a `ticker_update` event from a ticker snapshot
    pub fn ticker(ticker: TickerSnapshot, timestamp: Timestamp) -> Self {
        Self {
            exchange: ticker.exchange.clone(),
            asset_type: ticker.asset_type.clone(),
            kind: EventKind::TickerUpdate,
            payload: EventPayload::Ticker(ticker),
            timestamp,
        }
    }

    /// Build an `orderbook_update` event from an order book snapshot
    pub fn order_book(book: OrderBookSnapshot, timestamp: Timestamp) -> Self {
        Self {
            exchange: book.exchange.clone(),
            asset_type: book.asset_type.clone(),
            kind: EventKind::OrderBookUpdate,
            payload: EventPayload::OrderBook(book),
            timestamp,
        }
    }

    pub fn as_ticker(&self) -> Option<&TickerSnapshot> {
        match &self.payload {
            EventPayload::Ticker(ticker) => Some(ticker),
            EventPayload::OrderBook(_) => None,
        }
    }

    pub fn as_order_book(&self) -> Option<&OrderBookSnapshot> {
        match &self.payload {
            EventPayload::OrderBook(book) => Some(book),
            EventPayload::Ticker(_) => None,
        }
    }
}
