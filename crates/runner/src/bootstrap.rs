//! Bootstrap - wiring the poller from configuration
//!
//! Builds one simulated exchange per configured exchange, the registry they
//! are polled from, and the shared reporting sinks:
//! - Statistics store (ticker cycle only)
//! - Event relay (both cycles)
//! - Fixed-rate converter for log formatting

use argus_clock::{Clock, SystemClock};
use argus_exchange_sim::SimulatedExchange;
use argus_poller::{ExchangeRegistry, ExchangeSlot, ReportingPipeline};
use argus_ports::{Exchange, ExchangeInfo};
use argus_relay::EventRelay;
use argus_stats::StatisticsStore;
use log::info;
use std::sync::Arc;

use crate::config::{ConfigError, ExchangeConfig, PollerConfigFile};
use crate::fx::FixedRateConverter;

/// Everything the polling service needs, built from one config file
pub struct PollerBootstrap {
    /// Registry slots in config order; disabled exchanges hold `None`
    pub registry: Arc<ExchangeRegistry>,
    pub stats: Arc<StatisticsStore>,
    pub relay: Arc<EventRelay>,
    pub pipeline: Arc<ReportingPipeline>,
    /// Enabled exchanges, in config order
    pub exchanges: Vec<Arc<SimulatedExchange>>,
}

impl PollerBootstrap {
    /// Validate a config and build from it using wall-clock time
    pub fn from_config(config: &PollerConfigFile) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Validate a config and build from it with an explicit clock
    pub fn with_clock(
        config: &PollerConfigFile,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut slots: Vec<ExchangeSlot> = Vec::with_capacity(config.exchanges.len());
        let mut exchanges = Vec::new();

        for (index, exchange_config) in config.exchanges.iter().enumerate() {
            if !exchange_config.enabled {
                info!("Exchange {} is disabled", exchange_config.name);
                slots.push(None);
                continue;
            }

            let exchange = Arc::new(build_exchange(
                exchange_config,
                index as u64,
                Arc::clone(&clock),
            )?);
            slots.push(Some(Arc::clone(&exchange) as Arc<dyn Exchange>));
            exchanges.push(exchange);
        }

        let stats = Arc::new(StatisticsStore::new());
        let relay = Arc::new(EventRelay::new(config.relay.capacity));
        let converter = Arc::new(FixedRateConverter::new(&config.global.fx_rates));
        let pipeline = Arc::new(ReportingPipeline::new(
            Arc::clone(&stats) as _,
            Arc::clone(&relay) as _,
            converter,
            clock,
            config.global.fiat_display_currency.as_str(),
        ));

        info!(
            "Bootstrapped {} exchanges ({} enabled), displaying prices in {}",
            slots.len(),
            exchanges.len(),
            pipeline.display_currency()
        );

        Ok(Self {
            registry: Arc::new(ExchangeRegistry::new(slots)),
            stats,
            relay,
            pipeline,
            exchanges,
        })
    }

    /// Get an enabled exchange by name
    pub fn get_exchange(&self, name: &str) -> Option<&Arc<SimulatedExchange>> {
        self.exchanges
            .iter()
            .find(|e| e.name().eq_ignore_ascii_case(name))
    }
}

fn build_exchange(
    config: &ExchangeConfig,
    default_seed: u64,
    clock: Arc<dyn Clock>,
) -> Result<SimulatedExchange, ConfigError> {
    let simulation = config.simulation.to_simulation_config(default_seed);
    let exchange = SimulatedExchange::new(config.name.clone(), config.parsed_pairs()?, simulation)?
        .with_clock(clock);

    let exchange = match config.parsed_asset_types() {
        Some(asset_types) => exchange.with_asset_types(asset_types),
        None => exchange.without_asset_types(),
    };

    for pair in config.parsed_disabled_pairs()? {
        exchange.disable_pair(&pair);
    }
    Ok(exchange)
}
