use core::fmt;

/// The market data kinds collected every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    LatestPrices,
    OrderBook,
    RecentTrades,
    Klines,
    Ticker24hr,
}

impl Resource {
    /// Processing order within a cycle.
    pub const ALL: [Resource; 5] = [
        Resource::LatestPrices,
        Resource::OrderBook,
        Resource::RecentTrades,
        Resource::Klines,
        Resource::Ticker24hr,
    ];

}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Resource::LatestPrices => "latest prices",
            Resource::OrderBook => "order book",
            Resource::RecentTrades => "recent trades",
            Resource::Klines => "klines",
            Resource::Ticker24hr => "24hr ticker",
        };
        return write!(f, "{value}");
    }
}
