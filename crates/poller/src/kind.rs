//! Fetch kinds
//!
//! Ticker and order book polling share one coordinator/dispatcher/worker
//! implementation; a [`FetchKind`] supplies the fetch call and where its
//! result goes.

use argus_core::{AssetType, CurrencyPair, OrderBookSnapshot, TickerSnapshot};
use argus_ports::{Exchange, FetchResult};
use async_trait::async_trait;

use crate::reporting::{FetchContext, ReportingPipeline};

#[async_trait]
pub trait FetchKind: Send + Sync + 'static {
    type Snapshot: Send + 'static;

    /// Name used in log lines
    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        exchange: &dyn Exchange,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> FetchResult<Self::Snapshot>;

    /// Hand a successful fetch to the reporting pipeline
    async fn report(
        &self,
        pipeline: &ReportingPipeline,
        ctx: FetchContext<'_>,
        snapshot: Self::Snapshot,
    );
}

/// Price tickers
#[derive(Debug, Clone, Copy, Default)]
pub struct Tickers;

#[async_trait]
impl FetchKind for Tickers {
    type Snapshot = TickerSnapshot;

    fn name(&self) -> &'static str {
        "ticker"
    }

    async fn fetch(
        &self,
        exchange: &dyn Exchange,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> FetchResult<TickerSnapshot> {
        exchange.fetch_ticker(pair, asset_type).await
    }

    async fn report(
        &self,
        pipeline: &ReportingPipeline,
        ctx: FetchContext<'_>,
        snapshot: TickerSnapshot,
    ) {
        pipeline.ticker_fetched(ctx, snapshot).await;
    }
}

/// Order books
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderBooks;

#[async_trait]
impl FetchKind for OrderBooks {
    type Snapshot = OrderBookSnapshot;

    fn name(&self) -> &'static str {
        "orderbook"
    }

    async fn fetch(
        &self,
        exchange: &dyn Exchange,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> FetchResult<OrderBookSnapshot> {
        exchange.fetch_order_book(pair, asset_type).await
    }

    async fn report(
        &self,
        pipeline: &ReportingPipeline,
        ctx: FetchContext<'_>,
        snapshot: OrderBookSnapshot,
    ) {
        pipeline.order_book_fetched(ctx, snapshot).await;
    }
}
