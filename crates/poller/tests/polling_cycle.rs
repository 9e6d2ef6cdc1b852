//! Integration tests: one coordinator driving scripted exchanges through a
//! full polling cycle.

mod common;

use argus_core::{AssetType, CurrencyPair, EventKind};
use argus_poller::{
    AssetFanOut, CycleCoordinator, ExchangeRegistry, OrderBooks, PollerConfig, Tickers,
};
use argus_ports::Exchange;
use common::{Harness, ScriptedExchange, registry};
use std::sync::Arc;
use std::time::Duration;

fn tickers(registry: Arc<ExchangeRegistry>, harness: &Harness) -> CycleCoordinator<Tickers> {
    tickers_with(registry, harness, PollerConfig::default())
}

fn tickers_with(
    registry: Arc<ExchangeRegistry>,
    harness: &Harness,
    config: PollerConfig,
) -> CycleCoordinator<Tickers> {
    CycleCoordinator::new(Tickers, registry, harness.pipeline.clone(), config)
        .expect("valid poller config")
}

#[tokio::test]
async fn test_two_exchange_scenario() {
    let mut harness = Harness::new();
    let eth = CurrencyPair::eth_usd();

    let a = Arc::new(ScriptedExchange::new("alpha"));
    let b = Arc::new(
        ScriptedExchange::new("beta")
            .with_pairs(vec![CurrencyPair::btc_usd(), eth.clone()])
            .failing_pair(eth),
    );
    let coordinator = tickers(registry(&[a.clone(), b.clone()]), &harness);

    let report = coordinator.run_cycle().await;

    assert_eq!(report.exchanges, 2);
    assert_eq!(report.instruments, 3);
    assert_eq!(report.attempts, 3);
    assert_eq!(report.successes, 2);
    assert_eq!(report.failures, 1);
    assert_eq!(a.call_count() + b.call_count(), 3);

    let events = harness.drain_events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.kind == EventKind::TickerUpdate));
    assert_eq!(harness.stats.len(), 2);
    assert_eq!(coordinator.cycles_completed(), 1);
}

#[tokio::test]
async fn test_every_pair_and_asset_type_is_attempted() {
    let mut harness = Harness::new();
    let pairs = vec![
        CurrencyPair::btc_usd(),
        CurrencyPair::eth_usd(),
        CurrencyPair::eth_btc(),
    ];
    let exchange = Arc::new(
        ScriptedExchange::new("kraken")
            .with_pairs(pairs.clone())
            .with_asset_types(vec![AssetType::spot(), AssetType::margin()])
            .failing_asset(AssetType::spot()),
    );
    let coordinator = tickers(registry(&[exchange.clone()]), &harness);

    let report = coordinator.run_cycle().await;

    assert_eq!(report.instruments, 3);
    assert_eq!(report.attempts, 6);
    assert_eq!(report.failures, 3);
    assert_eq!(report.successes, 3);

    // Asset types are walked in list order within each pair
    let calls = exchange.calls();
    for pair in &pairs {
        let order: Vec<_> = calls
            .iter()
            .filter(|c| &c.pair == pair)
            .map(|c| c.asset_type.clone())
            .collect();
        assert_eq!(order, vec![AssetType::spot(), AssetType::margin()]);
    }

    let events = harness.drain_events();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.asset_type == AssetType::margin()));
}

#[tokio::test]
async fn test_failures_do_not_stop_other_exchanges() {
    let harness = Harness::new();
    let broken = Arc::new(
        ScriptedExchange::new("broken")
            .with_pairs(vec![CurrencyPair::btc_usd(), CurrencyPair::eth_usd()])
            .failing_pair(CurrencyPair::btc_usd())
            .failing_pair(CurrencyPair::eth_usd()),
    );
    let healthy = Arc::new(
        ScriptedExchange::new("healthy")
            .with_pairs(vec![CurrencyPair::btc_usd(), CurrencyPair::eth_usd()]),
    );
    let coordinator = tickers(registry(&[broken.clone(), healthy.clone()]), &harness);

    let report = coordinator.run_cycle().await;

    assert_eq!(broken.call_count(), 2);
    assert_eq!(healthy.call_count(), 2);
    assert_eq!(report.failures, 2);
    assert_eq!(report.successes, 2);
    assert!(harness.stats.get("broken", &CurrencyPair::btc_usd(), &AssetType::spot()).is_none());
    assert!(harness.stats.get("healthy", &CurrencyPair::btc_usd(), &AssetType::spot()).is_some());
}

#[tokio::test]
async fn test_no_asset_types_skips_exchange() {
    let mut harness = Harness::new();
    let empty = Arc::new(ScriptedExchange::new("empty").with_asset_types(Vec::new()));
    let unavailable = Arc::new(ScriptedExchange::new("unavailable").without_asset_types());
    let healthy = Arc::new(ScriptedExchange::new("healthy"));
    let coordinator = tickers(
        registry(&[empty.clone(), unavailable.clone(), healthy.clone()]),
        &harness,
    );

    let report = coordinator.run_cycle().await;

    assert_eq!(report.exchanges, 3);
    assert_eq!(report.instruments, 1);
    assert_eq!(report.attempts, 1);
    assert_eq!(empty.call_count(), 0);
    assert_eq!(unavailable.call_count(), 0);
    assert_eq!(harness.drain_events().len(), 1);
}

#[tokio::test]
async fn test_empty_slots_and_registry() {
    let harness = Harness::new();

    let empty = tickers(Arc::new(ExchangeRegistry::default()), &harness);
    let report = empty.run_cycle().await;
    assert_eq!(report.exchanges, 0);
    assert_eq!(report.attempts, 0);

    let exchange = Arc::new(ScriptedExchange::new("alpha"));
    let slots = Arc::new(ExchangeRegistry::new(vec![
        None,
        Some(exchange.clone() as Arc<dyn Exchange>),
        None,
    ]));
    let report = tickers(slots, &harness).run_cycle().await;
    assert_eq!(report.skipped_exchanges, 2);
    assert_eq!(report.exchanges, 1);
    assert_eq!(report.attempts, 1);
}

#[tokio::test]
async fn test_exchange_without_pairs_completes() {
    let harness = Harness::new();
    let idle = Arc::new(ScriptedExchange::new("idle").with_pairs(Vec::new()));
    let coordinator = tickers(registry(&[idle.clone()]), &harness);

    let report = coordinator.run_cycle().await;

    assert_eq!(report.exchanges, 1);
    assert_eq!(report.instruments, 0);
    assert_eq!(report.attempts, 0);
}

#[tokio::test(start_paused = true)]
async fn test_hung_fetch_times_out_as_failure() {
    let harness = Harness::new();
    let hung = Arc::new(ScriptedExchange::new("hung").hanging());
    let healthy = Arc::new(ScriptedExchange::new("healthy"));
    let config = PollerConfig::default().with_fetch_timeout(Duration::from_secs(2));
    let coordinator = tickers_with(registry(&[hung.clone(), healthy.clone()]), &harness, config);

    let report = coordinator.run_cycle().await;

    assert_eq!(report.attempts, 2);
    assert_eq!(report.failures, 1);
    assert_eq!(report.successes, 1);
    assert!(report.elapsed >= Duration::from_secs(2));
    assert_eq!(coordinator.available_permits(), PollerConfig::default().max_concurrent_fetches);
}

#[tokio::test(start_paused = true)]
async fn test_concurrency_is_bounded_by_limiter() {
    let harness = Harness::new();
    let pairs: Vec<_> = ["BTC", "ETH", "LTC", "XRP", "ADA", "SOL"]
        .iter()
        .map(|base| CurrencyPair::new(*base, "USD"))
        .collect();
    let slow = Arc::new(
        ScriptedExchange::new("slow")
            .with_pairs(pairs)
            .with_delay(Duration::from_secs(1)),
    );
    let config = PollerConfig::default().with_max_concurrent_fetches(2);
    let coordinator = tickers_with(registry(&[slow.clone()]), &harness, config);

    let report = coordinator.run_cycle().await;

    assert_eq!(report.successes, 6);
    assert_eq!(slow.max_in_flight(), 2);
    assert!(report.elapsed >= Duration::from_secs(3));
    assert_eq!(coordinator.available_permits(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_asset_fan_out() {
    let harness = Harness::new();
    let asset_types = vec![AssetType::spot(), AssetType::margin(), AssetType::futures()];

    let sequential = Arc::new(
        ScriptedExchange::new("sequential")
            .with_asset_types(asset_types.clone())
            .with_delay(Duration::from_secs(1)),
    );
    let report = tickers(registry(&[sequential.clone()]), &harness)
        .run_cycle()
        .await;
    assert_eq!(report.attempts, 3);
    assert!(report.elapsed >= Duration::from_secs(3));

    let concurrent = Arc::new(
        ScriptedExchange::new("concurrent")
            .with_asset_types(asset_types)
            .with_delay(Duration::from_secs(1)),
    );
    let config = PollerConfig::default().with_asset_fan_out(AssetFanOut::Concurrent);
    let report = tickers_with(registry(&[concurrent.clone()]), &harness, config)
        .run_cycle()
        .await;
    assert_eq!(report.attempts, 3);
    assert_eq!(report.instruments, 1);
    assert!(report.elapsed < Duration::from_secs(3));
    assert_eq!(concurrent.max_in_flight(), 3);
}

#[tokio::test]
async fn test_registry_and_instrument_changes_apply_next_cycle() {
    let harness = Harness::new();
    let alpha = Arc::new(ScriptedExchange::new("alpha"));
    let beta = Arc::new(ScriptedExchange::new("beta"));
    let registry = registry(&[alpha.clone()]);
    let coordinator = tickers(registry.clone(), &harness);

    assert_eq!(coordinator.run_cycle().await.attempts, 1);

    registry.load(beta.clone());
    alpha.set_pairs(vec![CurrencyPair::btc_usd(), CurrencyPair::eth_usd()]);
    assert_eq!(coordinator.run_cycle().await.attempts, 3);

    registry.unload("alpha");
    let report = coordinator.run_cycle().await;
    assert_eq!(report.attempts, 1);
    assert_eq!(report.skipped_exchanges, 1);
    assert_eq!(coordinator.cycles_completed(), 3);
}

#[tokio::test]
async fn test_order_book_cycle_broadcasts_without_statistics() {
    let mut harness = Harness::new();
    let exchange = Arc::new(
        ScriptedExchange::new("bitstamp")
            .with_pairs(vec![CurrencyPair::btc_usd(), CurrencyPair::eth_btc()]),
    );
    let coordinator = CycleCoordinator::new(
        OrderBooks,
        registry(&[exchange.clone()]),
        harness.pipeline.clone(),
        PollerConfig::default(),
    )
    .unwrap();

    let report = coordinator.run_cycle().await;

    assert_eq!(report.kind, "orderbook");
    assert_eq!(report.successes, 2);
    assert!(harness.stats.is_empty());

    let events = harness.drain_events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.kind == EventKind::OrderBookUpdate));
    assert!(events.iter().all(|e| e.as_order_book().is_some()));
}

#[test]
fn test_invalid_config_is_rejected() {
    let harness = Harness::new();
    let result = CycleCoordinator::new(
        Tickers,
        Arc::new(ExchangeRegistry::default()),
        harness.pipeline.clone(),
        PollerConfig::default().with_max_concurrent_fetches(0),
    );
    assert!(result.is_err());
}
