//! Instrument identifiers
//!
//! An instrument is a currency pair traded under one asset type on one
//! exchange. Both halves are immutable values.

mod asset;
mod pair;

pub use asset::AssetType;
pub use pair::{CurrencyPair, PairParseError};
