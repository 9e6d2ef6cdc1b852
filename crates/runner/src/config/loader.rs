use argus_core::{AssetType, CurrencyPair, PairParseError, currency};
use argus_exchange_sim::SimError;
use argus_poller::PollerError;
use std::path::Path;
use thiserror::Error;

use super::types::{ExchangeConfig, PollerConfigFile};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Exchange {exchange}: {source}")]
    InvalidPair {
        exchange: String,
        #[source]
        source: PairParseError,
    },
    #[error("No enabled exchanges in config")]
    NoEnabledExchanges,
    #[error("Duplicate exchange name: {0}")]
    DuplicateExchange(String),
    #[error("Invalid FX rate for {0}: must be positive")]
    InvalidRate(String),
    #[error("Unknown display currency: {0}")]
    UnknownDisplayCurrency(String),
    #[error("Invalid poller settings: {0}")]
    Poller(#[from] PollerError),
    #[error("Invalid simulation settings: {0}")]
    Simulation(#[from] SimError),
}

/// Load poller configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PollerConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: PollerConfigFile = serde_json::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<PollerConfigFile, ConfigError> {
    let config: PollerConfigFile = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<PollerConfigFile, ConfigError> {
    let default_config = include_str!("poller_config.json");
    load_config_from_str(default_config)
}

impl PollerConfigFile {
    /// Get only enabled exchanges
    pub fn enabled_exchanges(&self) -> Vec<&ExchangeConfig> {
        self.exchanges.iter().filter(|e| e.enabled).collect()
    }

    /// Get a specific exchange by name (case-insensitive)
    pub fn get_exchange(&self, name: &str) -> Option<&ExchangeConfig> {
        self.exchanges
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled_exchanges().is_empty() {
            return Err(ConfigError::NoEnabledExchanges);
        }

        for (i, exchange) in self.exchanges.iter().enumerate() {
            if self.exchanges[..i]
                .iter()
                .any(|e| e.name.eq_ignore_ascii_case(&exchange.name))
            {
                return Err(ConfigError::DuplicateExchange(exchange.name.clone()));
            }
            exchange.parsed_pairs()?;
            exchange.parsed_disabled_pairs()?;
            exchange
                .simulation
                .to_simulation_config(i as u64)
                .validate()?;
        }

        let display = &self.global.fiat_display_currency;
        if !currency::is_fiat(display) {
            return Err(ConfigError::UnknownDisplayCurrency(display.clone()));
        }
        if let Some((code, _)) = self
            .global
            .fx_rates
            .iter()
            .find(|(_, rate)| rate.is_sign_negative() || rate.is_zero())
        {
            return Err(ConfigError::InvalidRate(code.clone()));
        }

        self.fetch.to_poller_config(&self.ticker).validate()?;
        self.fetch.to_poller_config(&self.orderbook).validate()?;
        Ok(())
    }
}

impl ExchangeConfig {
    /// Pairs listed on the exchange, enabled or not
    pub fn parsed_pairs(&self) -> Result<Vec<CurrencyPair>, ConfigError> {
        self.parse(self.pairs.iter().chain(&self.disabled_pairs))
    }

    /// Pairs listed but initially disabled
    pub fn parsed_disabled_pairs(&self) -> Result<Vec<CurrencyPair>, ConfigError> {
        self.parse(self.disabled_pairs.iter())
    }

    /// `None` when the exchange cannot report its asset types
    pub fn parsed_asset_types(&self) -> Option<Vec<AssetType>> {
        self.asset_types
            .as_ref()
            .map(|types| types.iter().map(|t| AssetType::new(t.as_str())).collect())
    }

    fn parse<'a>(
        &self,
        symbols: impl Iterator<Item = &'a String>,
    ) -> Result<Vec<CurrencyPair>, ConfigError> {
        symbols
            .map(|symbol| {
                symbol
                    .parse::<CurrencyPair>()
                    .map_err(|source| ConfigError::InvalidPair {
                        exchange: self.name.clone(),
                        source,
                    })
            })
            .collect()
    }
}
