//! Error types for the relay crate

use argus_ports::BroadcastError;
use thiserror::Error;

/// Transport-level errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Channel closed")]
    ChannelClosed,
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        TransportError::Serialization(e.to_string())
    }
}

impl From<TransportError> for BroadcastError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Serialization(msg) => BroadcastError::Serialization(msg),
            TransportError::ChannelClosed => BroadcastError::ChannelClosed,
        }
    }
}
