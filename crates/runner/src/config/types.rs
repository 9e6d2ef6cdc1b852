use argus_exchange_sim::SimulationConfig;
use argus_poller::{AssetFanOut, PollerConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Root configuration for the polling service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfigFile {
    pub exchanges: Vec<ExchangeConfig>,
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub ticker: CycleConfig,
    #[serde(default)]
    pub orderbook: CycleConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

/// Settings shared by every exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Fiat currency prices are displayed in
    #[serde(default = "default_display_currency")]
    pub fiat_display_currency: String,
    /// USD value of one unit of each currency (USD itself is implied)
    #[serde(default)]
    pub fx_rates: HashMap<String, Decimal>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            fiat_display_currency: default_display_currency(),
            fx_rates: HashMap::new(),
        }
    }
}

/// One polling cycle (ticker or order book)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Delay between the end of one cycle and the start of the next
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        CycleConfig {
            enabled: true,
            interval_secs: default_interval_secs(),
        }
    }
}

/// Fetch limits shared by both cycles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Simultaneous fetch calls per cycle coordinator
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    #[serde(default)]
    pub asset_fan_out: AssetFanOut,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout_ms: default_timeout_ms(),
            max_concurrent: default_max_concurrent(),
            asset_fan_out: AssetFanOut::default(),
        }
    }
}

impl FetchConfig {
    /// Convert to the poller's runtime config for one cycle
    pub fn to_poller_config(&self, cycle: &CycleConfig) -> PollerConfig {
        PollerConfig::new()
            .with_interval(Duration::from_secs(cycle.interval_secs))
            .with_fetch_timeout(Duration::from_millis(self.timeout_ms))
            .with_max_concurrent_fetches(self.max_concurrent)
            .with_asset_fan_out(self.asset_fan_out)
    }
}

/// Event relay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Events buffered per subscriber before it starts lagging
    #[serde(default = "default_relay_capacity")]
    pub capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig {
            capacity: default_relay_capacity(),
        }
    }
}

/// Configuration for a single exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub name: String,
    /// Disabled exchanges keep their registry slot but are not polled
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Currency pairs, e.g. "BTC-USD"
    #[serde(default)]
    pub pairs: Vec<String>,
    /// Pairs listed but not polled until enabled at runtime
    #[serde(default)]
    pub disabled_pairs: Vec<String>,
    /// Omitted means the exchange cannot report its asset types
    #[serde(default)]
    pub asset_types: Option<Vec<String>>,
    #[serde(default)]
    pub simulation: SimulationJson,
}

/// Simulated exchange behaviour (JSON representation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationJson {
    /// Defaults to the exchange's position in the file
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    #[serde(default)]
    pub failure_rate: f64,
    #[serde(default = "default_volatility")]
    pub volatility: Decimal,
    #[serde(default = "default_tick_size")]
    pub tick_size: Decimal,
    #[serde(default = "default_book_depth")]
    pub book_depth: usize,
    #[serde(default)]
    pub initial_prices: HashMap<String, Decimal>,
}

impl Default for SimulationJson {
    fn default() -> Self {
        SimulationJson {
            seed: None,
            latency_ms: default_latency_ms(),
            failure_rate: 0.0,
            volatility: default_volatility(),
            tick_size: default_tick_size(),
            book_depth: default_book_depth(),
            initial_prices: HashMap::new(),
        }
    }
}

impl SimulationJson {
    /// Convert to the simulator's config, layering prices over its defaults
    pub fn to_simulation_config(&self, default_seed: u64) -> SimulationConfig {
        let base = SimulationConfig::default()
            .with_seed(self.seed.unwrap_or(default_seed))
            .with_latency(Duration::from_millis(self.latency_ms))
            .with_failure_rate(self.failure_rate)
            .with_volatility(self.volatility)
            .with_tick_size(self.tick_size)
            .with_book_depth(self.book_depth);

        self.initial_prices
            .iter()
            .fold(base, |config, (symbol, price)| {
                config.with_initial_price(symbol.to_uppercase(), *price)
            })
    }
}

fn default_true() -> bool {
    true
}

fn default_display_currency() -> String {
    "USD".to_string()
}

fn default_interval_secs() -> u64 {
    10
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_concurrent() -> usize {
    64
}

fn default_relay_capacity() -> usize {
    1024
}

fn default_latency_ms() -> u64 {
    50
}

fn default_volatility() -> Decimal {
    dec!(0.001)
}

fn default_tick_size() -> Decimal {
    dec!(0.01)
}

fn default_book_depth() -> usize {
    10
}
