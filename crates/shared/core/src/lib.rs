//! Argus Core Domain
//!
//! Pure domain types for the Argus market-data poller.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod currency;
pub mod events;
pub mod instruments;
pub mod market;
pub mod values;

// Re-export commonly used types at crate root
pub use events::{Event, EventKind, EventPayload};
pub use instruments::{AssetType, CurrencyPair, PairParseError};
pub use market::{BookLevel, BookTotals, OrderBookSnapshot, TickerSnapshot};
pub use values::{Price, Quantity, Timestamp};
