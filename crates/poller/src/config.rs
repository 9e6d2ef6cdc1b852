use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{PollerError, Result};

/// Delay between the end of one cycle and the start of the next
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);
/// Deadline for a single fetch call
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
/// Cap on simultaneous outbound fetch calls per coordinator
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 64;

/// How an instrument worker walks its asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFanOut {
    /// One fetch at a time, in asset type order
    #[default]
    Sequential,
    /// One sub-task per asset type behind a nested completion barrier
    Concurrent,
}

/// Runtime configuration for one cycle coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    pub interval: Duration,
    pub fetch_timeout: Duration,
    pub max_concurrent_fetches: usize,
    pub asset_fan_out: AssetFanOut,
}

impl Default for PollerConfig {
    fn default() -> Self {
        PollerConfig {
            interval: DEFAULT_INTERVAL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            asset_fan_out: AssetFanOut::default(),
        }
    }
}

impl PollerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_max_concurrent_fetches(mut self, max: usize) -> Self {
        self.max_concurrent_fetches = max;
        self
    }

    pub fn with_asset_fan_out(mut self, fan_out: AssetFanOut) -> Self {
        self.asset_fan_out = fan_out;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(PollerError::InvalidConfig(
                "interval must be greater than zero".to_string(),
            ));
        }
        if self.fetch_timeout.is_zero() {
            return Err(PollerError::InvalidConfig(
                "fetch timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(PollerError::InvalidConfig(
                "max concurrent fetches must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
