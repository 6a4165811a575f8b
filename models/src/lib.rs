pub mod kline;
pub mod latest_price;
pub mod order_book_level;
pub mod recent_trade;
pub mod schema;
pub mod ticker_24hr;

pub use kline::Kline;
pub use latest_price::LatestPrice;
pub use order_book_level::OrderBookLevel;
pub use recent_trade::RecentTrade;
pub use ticker_24hr::Ticker24hr;

/// Rows bound for one table, produced by a single fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    LatestPrices(Vec<LatestPrice>),
    OrderBook(Vec<OrderBookLevel>),
    RecentTrades(Vec<RecentTrade>),
    Klines(Vec<Kline>),
    Ticker24hr(Vec<Ticker24hr>),
}

impl Batch {
    pub fn table_name(&self) -> &'static str {
        return match self {
            Batch::LatestPrices(_) => "latest_prices",
            Batch::OrderBook(_) => "order_book",
            Batch::RecentTrades(_) => "recent_trades",
            Batch::Klines(_) => "klines",
            Batch::Ticker24hr(_) => "ticker_24hr",
        };
    }

    pub fn len(&self) -> usize {
        return match self {
            Batch::LatestPrices(rows) => rows.len(),
            Batch::OrderBook(rows) => rows.len(),
            Batch::RecentTrades(rows) => rows.len(),
            Batch::Klines(rows) => rows.len(),
            Batch::Ticker24hr(rows) => rows.len(),
        };
    }

    pub fn is_empty(&self) -> bool {
        return self.len() == 0;
    }
}
