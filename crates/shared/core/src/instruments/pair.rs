use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Delimiters accepted when parsing a pair from text
const DELIMITERS: [char; 3] = ['-', '/', '_'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairParseError {
    #[error("Invalid currency pair '{0}': expected BASE-QUOTE")]
    Invalid(String),
}

/// An ordered pair of currency codes (e.g., BTC/USD, ETH/BTC)
///
/// Codes are normalized to upper case on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Base currency (the one being bought/sold)
    pub base: String,
    /// Quote currency (the one used to price the base)
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
        }
    }

    pub fn btc_usd() -> Self {
        Self::new("BTC", "USD")
    }

    pub fn eth_usd() -> Self {
        Self::new("ETH", "USD")
    }

    pub fn eth_btc() -> Self {
        Self::new("ETH", "BTC")
    }

    /// Concatenated exchange-style symbol: `BTCUSD`
    pub fn symbol(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }

    /// Same pair with a different base currency
    pub fn with_base(&self, base: impl Into<String>) -> Self {
        Self::new(base, self.quote.clone())
    }

    /// Same pair with a different quote currency
    pub fn with_quote(&self, quote: impl Into<String>) -> Self {
        Self::new(self.base.clone(), quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = PairParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split(|c| DELIMITERS.contains(&c));

        match (parts.next(), parts.next(), parts.next()) {
            (Some(base), Some(quote), None) if !base.is_empty() && !quote.is_empty() => {
                Ok(Self::new(base, quote))
            }
            _ => Err(PairParseError::Invalid(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_normalizes_case() {
        let pair = CurrencyPair::new("btc", "usd");
        assert_eq!(pair, CurrencyPair::btc_usd());
        assert_eq!(pair.symbol(), "BTCUSD");
        assert_eq!(pair.to_string(), "BTC-USD");
    }

    #[test]
    fn test_parse_accepts_common_delimiters() {
        for text in ["BTC-USD", "btc/usd", "BTC_USD", " BTC-USD "] {
            let pair: CurrencyPair = text.parse().unwrap();
            assert_eq!(pair, CurrencyPair::btc_usd());
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["BTCUSD", "BTC-", "-USD", "BTC-USD-EUR", ""] {
            assert!(text.parse::<CurrencyPair>().is_err(), "{text} should fail");
        }
    }

    #[test]
    fn test_with_base_and_quote() {
        let pair = CurrencyPair::new("XBT", "USDT");
        assert_eq!(pair.with_base("BTC"), CurrencyPair::new("BTC", "USDT"));
        assert_eq!(pair.with_quote("usd"), CurrencyPair::new("XBT", "USD"));
    }
}
