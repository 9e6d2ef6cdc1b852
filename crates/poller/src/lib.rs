//! Argus Poller
//!
//! The concurrent polling engine. Two independent cycle coordinators (one for
//! tickers, one for order books) repeatedly fan out over every configured
//! exchange and every enabled instrument, then report results.
//!
//! ## Architecture
//!
//! ```text
//!   CycleCoordinator<K>        one per fetch kind, fixed interval
//!        │  registry snapshot, barrier(N slots)
//!        ├── ExchangeDispatcher   one task per slot
//!        │      │  barrier(M instruments)
//!        │      ├── InstrumentWorker   one task per pair
//!        │      │      └── fetch per asset type (semaphore + timeout)
//!        │      │             └── ReportingPipeline (stats, events, logs)
//! ```
//!
//! Every spawned task holds a [`CompletionGuard`] for its enclosing barrier,
//! so each one signals exactly once however it exits.

pub mod barrier;
pub mod config;
pub mod coordinator;
mod dispatcher;
pub mod error;
pub mod kind;
pub mod registry;
pub mod report;
pub mod reporting;
mod worker;

pub use barrier::{CompletionBarrier, CompletionGuard};
pub use config::{AssetFanOut, PollerConfig};
pub use coordinator::CycleCoordinator;
pub use error::{BarrierError, PollerError};
pub use kind::{FetchKind, OrderBooks, Tickers};
pub use registry::{ExchangeRegistry, ExchangeSlot, RegistrySnapshot};
pub use report::CycleReport;
pub use reporting::{FetchContext, ReportingPipeline};
