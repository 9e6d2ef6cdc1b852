use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Result, SimError};

/// Price used for pairs with no configured starting price
pub const DEFAULT_INITIAL_PRICE: Decimal = dec!(100);

/// Behaviour of one simulated exchange
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Starting last price per pair symbol ("BTC-USD")
    pub initial_prices: HashMap<String, Decimal>,
    /// Max relative move per fetch (0.001 = 0.1%)
    pub volatility: Decimal,
    /// Price increment; also the quoted spread
    pub tick_size: Decimal,
    /// Levels per side in generated books
    pub book_depth: usize,
    /// Simulated round-trip time per fetch
    pub latency: Duration,
    /// Probability in [0, 1] that a fetch fails
    pub failure_rate: f64,
    /// Random seed for reproducible runs
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let mut initial_prices = HashMap::new();
        initial_prices.insert("BTC-USD".to_string(), dec!(50000));
        initial_prices.insert("ETH-USD".to_string(), dec!(3000));
        initial_prices.insert("ETH-BTC".to_string(), dec!(0.06));

        Self {
            initial_prices,
            volatility: dec!(0.001),
            tick_size: dec!(0.01),
            book_depth: 10,
            latency: Duration::from_millis(50),
            failure_rate: 0.0,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    pub fn with_initial_price(mut self, symbol: impl Into<String>, price: Decimal) -> Self {
        self.initial_prices.insert(symbol.into(), price);
        self
    }

    pub fn with_volatility(mut self, volatility: Decimal) -> Self {
        self.volatility = volatility;
        self
    }

    pub fn with_tick_size(mut self, tick_size: Decimal) -> Self {
        self.tick_size = tick_size;
        self
    }

    pub fn with_book_depth(mut self, depth: usize) -> Self {
        self.book_depth = depth;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn initial_price(&self, symbol: &str) -> Decimal {
        self.initial_prices
            .get(symbol)
            .copied()
            .unwrap_or(DEFAULT_INITIAL_PRICE)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_size <= Decimal::ZERO {
            return Err(SimError::InvalidConfig("tick_size must be positive".into()));
        }
        if self.volatility < Decimal::ZERO || self.volatility >= Decimal::ONE {
            return Err(SimError::InvalidConfig(
                "volatility must be in [0, 1)".into(),
            ));
        }
        if self.book_depth == 0 {
            return Err(SimError::InvalidConfig("book_depth must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(SimError::InvalidConfig(
                "failure_rate must be in [0, 1]".into(),
            ));
        }
        if let Some((symbol, _)) = self
            .initial_prices
            .iter()
            .find(|(_, price)| **price <= Decimal::ZERO)
        {
            return Err(SimError::InvalidConfig(format!(
                "initial price for {} must be positive",
                symbol
            )));
        }
        Ok(())
    }
}

/// Running state of one simulated market
#[derive(Debug, Clone, PartialEq)]
pub struct MarketState {
    pub last: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    /// Cumulative traded volume since the market opened
    pub volume: Decimal,
}

impl MarketState {
    pub fn open(price: Decimal) -> Self {
        Self {
            last: price,
            high: price,
            low: price,
            volume: Decimal::ZERO,
        }
    }

    /// Move to a new last price, widening the day range
    pub fn trade(&mut self, price: Decimal, amount: Decimal) {
        self.last = price;
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.volume += amount;
    }
}
