//! Argus Runner - Market Data Polling Service
//!
//! Wires the poller to its surroundings and runs it:
//!
//! - **Config**: JSON configuration with embedded defaults
//! - **Bootstrap**: Simulated exchanges, registry and reporting sinks
//! - **FX**: Fixed-rate fiat conversion for log output
//! - **Service**: Ticker and order book cycles until shutdown
//!
//! ## Architecture
//!
//! ```text
//!     poller_config.json
//!            │
//!            ▼
//!   ┌─────────────────┐      ┌──────────────────────────────┐
//!   │ PollerBootstrap │─────▶│ ExchangeRegistry (slots)     │
//!   └────────┬────────┘      └──────────────┬───────────────┘
//!            │                              │ snapshot per cycle
//!            ▼                              ▼
//!   ┌─────────────────┐      ┌──────────────────────────────┐
//!   │ PollingService  │─────▶│ CycleCoordinator<Tickers>    │
//!   │                 │─────▶│ CycleCoordinator<OrderBooks> │
//!   └─────────────────┘      └──────────────┬───────────────┘
//!                                           │
//!                                           ▼
//!                      ReportingPipeline ─▶ StatisticsStore
//!                                       ─▶ EventRelay
//! ```

pub mod bootstrap;
pub mod config;
pub mod fx;
pub mod service;

// Re-export main types
pub use bootstrap::PollerBootstrap;
pub use config::{ConfigError, PollerConfigFile, load_config, load_config_from_str, load_default_config};
pub use fx::FixedRateConverter;
pub use service::{PollingService, ServiceSummary};
