//! Reporting pipeline
//!
//! The only place fetch results leave the poller: successful tickers update
//! the statistics sink, every success becomes a broadcast event, and every
//! failure becomes one log line. Nothing here reports back to the caller.

use argus_core::{
    AssetType, BookTotals, CurrencyPair, Event, EventKind, EventPayload, OrderBookSnapshot, Price,
    TickerSnapshot,
};
use argus_ports::{Clock, CurrencyConverter, EventBroadcaster, FetchError, StatisticsSink};
use log::{info, warn};
use std::sync::Arc;

/// Where a fetch came from
#[derive(Debug, Clone, Copy)]
pub struct FetchContext<'a> {
    pub exchange: &'a str,
    pub pair: &'a CurrencyPair,
    pub asset_type: &'a AssetType,
}

pub struct ReportingPipeline {
    stats: Arc<dyn StatisticsSink>,
    broadcaster: Arc<dyn EventBroadcaster>,
    converter: Arc<dyn CurrencyConverter>,
    clock: Arc<dyn Clock>,
    display_currency: String,
}

impl ReportingPipeline {
    pub fn new(
        stats: Arc<dyn StatisticsSink>,
        broadcaster: Arc<dyn EventBroadcaster>,
        converter: Arc<dyn CurrencyConverter>,
        clock: Arc<dyn Clock>,
        display_currency: impl Into<String>,
    ) -> Self {
        Self {
            stats,
            broadcaster,
            converter,
            clock,
            display_currency: display_currency.into().to_uppercase(),
        }
    }

    pub fn display_currency(&self) -> &str {
        &self.display_currency
    }

    /// Record, summarize and broadcast a fetched ticker
    pub async fn ticker_fetched(&self, ctx: FetchContext<'_>, ticker: TickerSnapshot) {
        self.stats.record(
            ctx.exchange,
            ctx.pair,
            ctx.asset_type,
            ticker.last,
            ticker.volume,
        );

        let quote = &ctx.pair.quote;
        info!(
            "{} {} {}: Last {} Ask {} Bid {} High {} Low {} Volume {:.8}",
            ctx.exchange,
            ctx.pair,
            ctx.asset_type,
            self.format_price(ticker.last, quote),
            self.format_price(ticker.ask, quote),
            self.format_price(ticker.bid, quote),
            self.format_price(ticker.high, quote),
            self.format_price(ticker.low, quote),
            ticker.volume,
        );

        self.broadcast(ctx, EventKind::TickerUpdate, ticker).await;
    }

    /// Summarize and broadcast a fetched order book
    pub async fn order_book_fetched(&self, ctx: FetchContext<'_>, book: OrderBookSnapshot) {
        info!(
            "{} {} {}: Orderbook Bids {} Asks {}",
            ctx.exchange,
            ctx.pair,
            ctx.asset_type,
            self.book_side(book.bids.len(), book.total_bids(), ctx.pair),
            self.book_side(book.asks.len(), book.total_asks(), ctx.pair),
        );

        self.broadcast(ctx, EventKind::OrderBookUpdate, book).await;
    }

    /// Log a failed fetch; no statistics, no event
    pub fn fetch_failed(&self, what: &str, ctx: FetchContext<'_>, err: &FetchError) {
        warn!(
            "Failed to get {} {} {} {}. Error: {}",
            ctx.pair, ctx.asset_type, ctx.exchange, what, err
        );
    }

    async fn broadcast(
        &self,
        ctx: FetchContext<'_>,
        kind: EventKind,
        payload: impl Into<EventPayload>,
    ) {
        let event = Event {
            exchange: ctx.exchange.to_string(),
            asset_type: ctx.asset_type.clone(),
            kind,
            payload: payload.into(),
            timestamp: self.clock.now(),
        };

        if let Err(e) = self.broadcaster.publish(&event).await {
            warn!("Failed to broadcast {} event. Error: {}", kind, e);
        }
    }

    /// Human readable price in the display currency
    ///
    /// - fiat quote other than the display currency: converted, with the
    ///   original amount in parentheses
    /// - fiat quote equal to the display currency: display symbol + 8 dp
    /// - anything else: the bare amount to 8 dp
    pub fn format_price(&self, price: Price, quote: &str) -> String {
        let quote = quote.to_uppercase();
        if !self.converter.is_fiat(&quote) {
            return format!("{:.8}", price);
        }

        if quote == self.display_currency {
            return format!("{}{:.8}", self.symbol(&self.display_currency), price);
        }

        let converted = match self.converter.convert(price, &quote, &self.display_currency) {
            Ok(converted) => converted,
            Err(e) => {
                warn!("Failed to convert currency: {}", e);
                return format!("{:.8}", price);
            }
        };

        format!(
            "{}{:.2} {} ({}{:.2} {})",
            self.symbol(&self.display_currency),
            converted,
            self.display_currency,
            self.symbol(&quote),
            price,
            quote,
        )
    }

    /// One side of an order book summary, amounts to 6 dp
    pub fn book_side(&self, levels: usize, totals: BookTotals, pair: &CurrencyPair) -> String {
        format!(
            "len: {} Amount: {:.6} {}. Total value: {}",
            levels,
            totals.amount,
            pair.base,
            self.format_price(totals.value, &pair.quote),
        )
    }

    fn symbol(&self, code: &str) -> String {
        self.converter.symbol_for(code).unwrap_or_else(|e| {
            warn!("Failed to get {} symbol: {}", code, e);
            String::new()
        })
    }
}
