use std::time::Duration;
use thiserror::Error;

/// Errors from a single ticker or order book fetch
///
/// Implementations convert their transport-specific failures into this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {code}: {message}")]
    Api { code: i32, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Asset type not supported: {0}")]
    UnsupportedAssetType(String),

    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("Exchange unavailable: {0}")]
    Unavailable(String),
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Errors reading an exchange's configuration-level metadata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Asset types unavailable for {0}")]
    AssetTypesUnavailable(String),
}

/// Errors from the event broadcast transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BroadcastError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Channel closed")]
    ChannelClosed,
}

/// Errors from currency conversion and symbol lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("No rate from {from} to {to}")]
    MissingRate { from: String, to: String },

    #[error("Converting {from} to {to} overflowed")]
    Overflow { from: String, to: String },
}
