//! Argus Exchange Simulator
//!
//! Stand-in exchanges for running the poller without network access. Each
//! simulated exchange keeps a random-walk market per (pair, asset type) and
//! answers fetches with configurable latency and failure probability.

// Application layer
pub mod application;

// Infrastructure layer
pub mod infrastructure;

// Cross-cutting concerns
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use application::SimulatedExchange;
pub use error::SimError;
pub use model::SimulationConfig;
