//! Public market data endpoints of the spot REST API, each paired with the
//! wire shape of its response. Numeric fields stay as the strings the
//! exchange sends them as.

pub mod depth;
pub mod klines;
pub mod ticker_24hr;
pub mod ticker_price;
pub mod trades;
