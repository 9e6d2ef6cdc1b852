use argus_core::{AssetType, CurrencyPair, Price, Quantity};
use argus_ports::StatisticsSink;
use dashmap::DashMap;
use log::trace;
use std::cmp::Ordering;

use crate::record::{StatKey, StatRecord};

/// Base currency codes also recorded under their common name
const BASE_ALIASES: &[(&str, &str)] = &[("XBT", "BTC")];

/// Quote currency codes also recorded under their fiat equivalent
const QUOTE_ALIASES: &[(&str, &str)] = &[("USDT", "USD")];

/// Thread-safe statistics store keyed by (exchange, pair, asset type)
#[derive(Debug, Default)]
pub struct StatisticsStore {
    records: DashMap<StatKey, StatRecord>,
}

impl StatisticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest price and volume for a key
    ///
    /// Incomplete records (empty exchange or asset type, zero price or zero
    /// volume) are ignored. Aliased pairs (XBT base, USDT quote) are also
    /// recorded under their common name so rankings line up across exchanges.
    ///
    /// Returns false if the record was ignored.
    pub fn add(
        &self,
        exchange: &str,
        pair: &CurrencyPair,
        asset_type: &AssetType,
        price: Price,
        volume: Quantity,
    ) -> bool {
        if exchange.is_empty()
            || asset_type.as_str().is_empty()
            || pair.base.is_empty()
            || pair.quote.is_empty()
            || price.is_zero()
            || volume.is_zero()
        {
            trace!("Ignoring incomplete statistics record for {} {}", exchange, pair);
            return false;
        }

        for (alias, canonical) in BASE_ALIASES {
            if pair.base == *alias {
                self.upsert(exchange, pair.with_base(*canonical), asset_type, price, volume);
            }
        }

        for (alias, canonical) in QUOTE_ALIASES {
            if pair.quote == *alias {
                self.upsert(exchange, pair.with_quote(*canonical), asset_type, price, volume);
            }
        }

        self.upsert(exchange, pair.clone(), asset_type, price, volume);
        true
    }

    fn upsert(
        &self,
        exchange: &str,
        pair: CurrencyPair,
        asset_type: &AssetType,
        price: Price,
        volume: Quantity,
    ) {
        let key = StatKey::new(exchange, pair.clone(), asset_type.clone());
        self.records
            .entry(key)
            .and_modify(|record| {
                record.price = price;
                record.volume = volume;
                record.updates += 1;
            })
            .or_insert_with(|| StatRecord {
                exchange: exchange.to_string(),
                pair,
                asset_type: asset_type.clone(),
                price,
                volume,
                updates: 1,
            });
    }

    /// Get the record for a key
    pub fn get(
        &self,
        exchange: &str,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> Option<StatRecord> {
        let key = StatKey::new(exchange, pair.clone(), asset_type.clone());
        self.records.get(&key).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of every record, in no particular order
    pub fn snapshot(&self) -> Vec<StatRecord> {
        self.records.iter().map(|r| r.value().clone()).collect()
    }

    pub fn clear(&self) {
        self.records.clear();
    }

    /// Exchanges quoting a pair/asset type, ranked by last price
    pub fn sorted_by_price(
        &self,
        pair: &CurrencyPair,
        asset_type: &AssetType,
        descending: bool,
    ) -> Vec<StatRecord> {
        self.ranked(pair, asset_type, descending, |a, b| a.price.cmp(&b.price))
    }

    /// Exchanges quoting a pair/asset type, ranked by volume
    pub fn sorted_by_volume(
        &self,
        pair: &CurrencyPair,
        asset_type: &AssetType,
        descending: bool,
    ) -> Vec<StatRecord> {
        self.ranked(pair, asset_type, descending, |a, b| a.volume.cmp(&b.volume))
    }

    fn ranked<F>(
        &self,
        pair: &CurrencyPair,
        asset_type: &AssetType,
        descending: bool,
        by: F,
    ) -> Vec<StatRecord>
    where
        F: Fn(&StatRecord, &StatRecord) -> Ordering,
    {
        let mut matching: Vec<StatRecord> = self
            .records
            .iter()
            .filter(|r| &r.pair == pair && &r.asset_type == asset_type)
            .map(|r| r.value().clone())
            .collect();

        matching.sort_by(|a, b| {
            let primary = if descending { by(b, a) } else { by(a, b) };
            primary.then_with(|| a.exchange.cmp(&b.exchange))
        });
        matching
    }
}

impl StatisticsSink for StatisticsStore {
    fn record(
        &self,
        exchange: &str,
        pair: &CurrencyPair,
        asset_type: &AssetType,
        last: Price,
        volume: Quantity,
    ) {
        self.add(exchange, pair, asset_type, last, volume);
    }
}
