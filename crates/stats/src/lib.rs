//! Argus Stats
//!
//! Aggregate statistics over the latest ticker of every
//! (exchange, pair, asset type). Each successful ticker fetch overwrites the
//! previous record for its key; nothing else is retained.
//!
//! The store is shared by all polling cycles at once and is lock-free from
//! the caller's point of view (sharded `DashMap`).

mod record;
mod store;

pub use record::{StatKey, StatRecord};
pub use store::StatisticsStore;
