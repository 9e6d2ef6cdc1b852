//! Fiat currency reference data
//!
//! Display symbols for the fiat currencies the reporting layer knows how to
//! format. Anything not listed here is treated as a crypto asset.

const FIAT_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("AUD", "$"),
    ("CAD", "$"),
    ("NZD", "$"),
    ("SGD", "$"),
    ("HKD", "$"),
    ("MXN", "$"),
    ("BRL", "R$"),
    ("KRW", "₩"),
    ("RUB", "₽"),
    ("INR", "₹"),
    ("TRY", "₺"),
    ("CHF", "Fr"),
    ("PLN", "zł"),
    ("ZAR", "R"),
    ("SEK", "kr"),
    ("NOK", "kr"),
    ("DKK", "kr"),
];

/// Check whether a currency code is a known fiat currency
pub fn is_fiat(code: &str) -> bool {
    fiat_symbol(code).is_some()
}

/// Display symbol for a fiat currency code
pub fn fiat_symbol(code: &str) -> Option<&'static str> {
    FIAT_SYMBOLS
        .iter()
        .find(|(fiat, _)| fiat.eq_ignore_ascii_case(code))
        .map(|(_, symbol)| *symbol)
}

/// All fiat codes with a known symbol
pub fn fiat_codes() -> impl Iterator<Item = &'static str> {
    FIAT_SYMBOLS.iter().map(|(code, _)| *code)
}
