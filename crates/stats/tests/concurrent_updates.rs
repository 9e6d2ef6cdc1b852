//! Concurrent writers against one shared store

use argus_core::{AssetType, CurrencyPair};
use argus_stats::StatisticsStore;
use rust_decimal::Decimal;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_keep_one_record_per_key() {
    let store = Arc::new(StatisticsStore::new());
    let exchanges = ["alpha", "beta", "gamma", "delta"];

    let mut handles = Vec::new();
    for exchange in exchanges {
        for writer in 0..8u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                for i in 1..=50u32 {
                    store.add(
                        exchange,
                        &CurrencyPair::btc_usd(),
                        &AssetType::spot(),
                        Decimal::from(writer * 1000 + i),
                        Decimal::from(i),
                    );
                }
            }));
        }
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.len(), exchanges.len());
    for exchange in exchanges {
        let record = store
            .get(exchange, &CurrencyPair::btc_usd(), &AssetType::spot())
            .unwrap();
        assert_eq!(record.updates, 8 * 50);
    }
}
