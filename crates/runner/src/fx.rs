//! Fixed-rate currency conversion for log output

use argus_core::currency;
use argus_ports::{ConversionError, CurrencyConverter};
use log::warn;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Code every configured rate is quoted against
const PIVOT: &str = "USD";

/// Converts between fiat currencies using rates fixed at startup
///
/// Each rate is the USD value of one unit of the currency. Conversions
/// between two non-USD currencies go through USD. Rates that are not
/// positive are ignored, so those currencies have no rate.
#[derive(Debug, Clone)]
pub struct FixedRateConverter {
    usd_per_unit: HashMap<String, Decimal>,
}

impl FixedRateConverter {
    pub fn new(rates: &HashMap<String, Decimal>) -> Self {
        let mut usd_per_unit: HashMap<String, Decimal> = rates
            .iter()
            .filter(|(code, rate)| {
                let usable = rate.is_sign_positive() && !rate.is_zero();
                if !usable {
                    warn!("Ignoring non-positive FX rate {} for {}", rate, code);
                }
                usable
            })
            .map(|(code, rate)| (code.to_uppercase(), *rate))
            .collect();
        usd_per_unit.insert(PIVOT.to_string(), Decimal::ONE);
        Self { usd_per_unit }
    }

    fn rate(&self, code: &str, from: &str, to: &str) -> Result<Decimal, ConversionError> {
        if !currency::is_fiat(code) {
            return Err(ConversionError::UnknownCurrency(code.to_string()));
        }
        self.usd_per_unit
            .get(&code.to_uppercase())
            .copied()
            .ok_or_else(|| ConversionError::MissingRate {
                from: from.to_uppercase(),
                to: to.to_uppercase(),
            })
    }
}

impl Default for FixedRateConverter {
    fn default() -> Self {
        Self::new(&HashMap::new())
    }
}

impl CurrencyConverter for FixedRateConverter {
    fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal, ConversionError> {
        if from.eq_ignore_ascii_case(to) {
            return Ok(amount);
        }
        let from_usd = self.rate(from, from, to)?;
        let to_usd = self.rate(to, from, to)?;
        amount
            .checked_mul(from_usd)
            .and_then(|usd| usd.checked_div(to_usd))
            .ok_or_else(|| ConversionError::Overflow {
                from: from.to_uppercase(),
                to: to.to_uppercase(),
            })
    }

    fn symbol_for(&self, code: &str) -> Result<String, ConversionError> {
        currency::fiat_symbol(code)
            .map(str::to_string)
            .ok_or_else(|| ConversionError::UnknownCurrency(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn converter() -> FixedRateConverter {
        let mut rates = HashMap::new();
        rates.insert("eur".to_string(), dec!(1.25));
        rates.insert("GBP".to_string(), dec!(1.5));
        FixedRateConverter::new(&rates)
    }

    #[test]
    fn test_convert_to_and_from_usd() {
        let fx = converter();
        assert_eq!(fx.convert(dec!(100), "EUR", "USD").unwrap(), dec!(125));
        assert_eq!(fx.convert(dec!(150), "USD", "GBP").unwrap(), dec!(100));
        assert_eq!(fx.convert(dec!(7), "usd", "USD").unwrap(), dec!(7));
    }

    #[test]
    fn test_cross_rate_goes_through_usd() {
        let fx = converter();
        assert_eq!(fx.convert(dec!(120), "EUR", "GBP").unwrap(), dec!(100));
    }

    #[test]
    fn test_missing_and_unknown_currencies() {
        let fx = converter();
        assert_eq!(
            fx.convert(dec!(1), "JPY", "USD"),
            Err(ConversionError::MissingRate {
                from: "JPY".to_string(),
                to: "USD".to_string()
            })
        );
        assert_eq!(
            fx.convert(dec!(1), "BTC", "USD"),
            Err(ConversionError::UnknownCurrency("BTC".to_string()))
        );
    }

    #[test]
    fn test_zero_rate_is_missing_not_a_panic() {
        let mut rates = HashMap::new();
        rates.insert("EUR".to_string(), Decimal::ZERO);
        rates.insert("GBP".to_string(), dec!(-1.5));
        let fx = FixedRateConverter::new(&rates);

        assert_eq!(
            fx.convert(dec!(100), "USD", "EUR"),
            Err(ConversionError::MissingRate {
                from: "USD".to_string(),
                to: "EUR".to_string()
            })
        );
        assert!(matches!(
            fx.convert(dec!(100), "GBP", "USD"),
            Err(ConversionError::MissingRate { .. })
        ));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let fx = converter();
        assert_eq!(
            fx.convert(Decimal::MAX, "GBP", "USD"),
            Err(ConversionError::Overflow {
                from: "GBP".to_string(),
                to: "USD".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_zero_rate_still_records_and_broadcasts_once() {
        use argus_clock::{Clock, SystemClock};
        use argus_core::{AssetType, CurrencyPair, TickerSnapshot};
        use argus_poller::{FetchContext, ReportingPipeline};
        use argus_relay::{EventRelay, Subscriber};
        use argus_stats::StatisticsStore;
        use std::sync::Arc;

        let mut rates = HashMap::new();
        rates.insert("EUR".to_string(), Decimal::ZERO);

        let stats = Arc::new(StatisticsStore::new());
        let relay = Arc::new(EventRelay::default());
        let mut events = relay.subscribe();
        let clock = Arc::new(SystemClock::new());
        let pipeline = ReportingPipeline::new(
            Arc::clone(&stats) as _,
            Arc::clone(&relay) as _,
            Arc::new(FixedRateConverter::new(&rates)),
            Arc::clone(&clock) as _,
            "EUR",
        );

        let pair = CurrencyPair::btc_usd();
        let spot = AssetType::spot();
        let ticker = TickerSnapshot::new(
            "bitstamp",
            pair.clone(),
            spot.clone(),
            dec!(50000),
            dec!(2),
            clock.now(),
        );
        let ctx = FetchContext {
            exchange: "bitstamp",
            pair: &pair,
            asset_type: &spot,
        };
        pipeline.ticker_fetched(ctx, ticker).await;

        assert_eq!(stats.len(), 1);
        assert!(events.try_next().unwrap().is_some());
        assert!(events.try_next().unwrap().is_none());
    }

    #[test]
    fn test_symbols() {
        let fx = FixedRateConverter::default();
        assert_eq!(fx.symbol_for("EUR").unwrap(), "€");
        assert!(fx.symbol_for("ETH").is_err());
        assert!(fx.is_fiat("usd"));
    }
}
