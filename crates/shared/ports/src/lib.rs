//! Argus Ports
//!
//! Port definitions (traits) for the Argus market-data poller.
//! These define the boundaries between the polling core and the
//! collaborators it drives: exchanges, statistics, broadcast and
//! currency conversion.

mod clock;
mod error;
mod exchange;
mod reporting;

pub use clock::Clock;
pub use error::{BroadcastError, ConversionError, FetchError, FetchResult, RegistryError};
pub use exchange::{Exchange, ExchangeInfo, MarketDataFetcher};
pub use reporting::{CurrencyConverter, EventBroadcaster, StatisticsSink};
