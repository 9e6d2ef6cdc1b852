//! Argus Relay
//!
//! Broadcast transport for market data events. Provides:
//! - Transport abstraction (tokio broadcast channels, with traits for future transports)
//! - [`EventRelay`], the `EventBroadcaster` handed to the poller
//!
//! ## Architecture
//!
//! ```text
//!   Reporting Pipeline
//!         │ publish(Event)
//!    ┌────▼─────┐
//!    │EventRelay│──── typed Event ────▶ subscribers (in-process consumers)
//!    │          │──── JSON frame  ────▶ frame subscribers (websocket bridges)
//!    └──────────┘
//! ```
//!
//! A relay with no subscribers silently drops events.

pub mod error;
pub mod relay;
pub mod transport;

// Re-export commonly used types
pub use error::TransportError;
pub use relay::EventRelay;
pub use transport::{
    Publisher, Subscriber,
    channel::{ChannelPublisher, ChannelSubscriber},
};
