//! Market data snapshots produced by a single fetch

mod order_book;
mod ticker;

pub use order_book::{BookLevel, BookTotals, OrderBookSnapshot};
pub use ticker::TickerSnapshot;
