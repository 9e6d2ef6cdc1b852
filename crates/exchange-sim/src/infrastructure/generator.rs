//! Seeded market data generator
//!
//! Random walk for last price: price * (1 + volatility * u), u uniform in
//! [-1, 1), rounded to the tick. Books are laid out one tick apart on either
//! side of the last price with random amounts.

use argus_core::BookLevel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use crate::model::{MarketState, SimulationConfig};

/// Decimal places kept on generated amounts
const AMOUNT_DP: u32 = 4;

pub struct MarketGenerator {
    rng: StdRng,
    volatility: f64,
    tick_size: Decimal,
    book_depth: usize,
}

impl MarketGenerator {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            volatility: config.volatility.to_f64().unwrap_or(0.0),
            tick_size: config.tick_size,
            book_depth: config.book_depth,
        }
    }

    /// Uniform draw in [0, 1)
    pub fn roll(&mut self) -> f64 {
        self.rng.r#gen()
    }

    /// Advance a market by one simulated trade
    pub fn step(&mut self, state: &mut MarketState) {
        let change: f64 = self.rng.gen_range(-1.0..1.0);
        let multiplier = Decimal::from_f64_retain(1.0 + self.volatility * change)
            .unwrap_or(Decimal::ONE);

        let price = self.round_to_tick(state.last * multiplier).max(self.tick_size);
        let amount = self.amount(dec!(0.01), 5.0);
        state.trade(price, amount);
    }

    /// Bid and ask levels around a mid price, best first
    pub fn book(&mut self, mid: Decimal) -> (Vec<BookLevel>, Vec<BookLevel>) {
        let mid = self.round_to_tick(mid);
        let mut bids = Vec::with_capacity(self.book_depth);
        let mut asks = Vec::with_capacity(self.book_depth);

        for level in 1..=self.book_depth {
            let offset = self.tick_size * Decimal::from(level);

            let bid = mid - offset;
            if bid > Decimal::ZERO {
                let amount = self.amount(dec!(0.0001), 10.0);
                bids.push(BookLevel::new(bid, amount));
            }

            let amount = self.amount(dec!(0.0001), 10.0);
            asks.push(BookLevel::new(mid + offset, amount));
        }

        (bids, asks)
    }

    pub fn tick_size(&self) -> Decimal {
        self.tick_size
    }

    fn round_to_tick(&self, price: Decimal) -> Decimal {
        (price / self.tick_size).round() * self.tick_size
    }

    fn amount(&mut self, min: Decimal, max: f64) -> Decimal {
        let raw: f64 = self.rng.gen_range(0.0..max);
        Decimal::from_f64_retain(raw)
            .unwrap_or(min)
            .round_dp(AMOUNT_DP)
            .max(min)
    }
}
