use std::{borrow::Cow, ops::Deref};

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{de::IgnoredAny, Deserialize};
use types::KlineInterval;

use crate::rest::{endpoint::Endpoint, params::QueryParams};

#[derive(Debug, Clone, Builder)]
pub struct Klines<'a> {
    symbol: Cow<'a, str>,
    #[builder(default)]
    interval: KlineInterval,
    #[builder(default = "100")]
    limit: u16,
}

/// One bar, sent as a 12 element array. Deserializing checks the arity.
#[derive(Debug, Clone, Getters, Deserialize)]
pub struct RawKline {
    open_time: i64,
    open: String,
    high: String,
    low: String,
    close: String,
    volume: String,
    close_time: i64,
    quote_asset_volume: String,
    number_of_trades: u64,
    taker_buy_base_asset_volume: String,
    taker_buy_quote_asset_volume: String,
    #[getter(skip)]
    #[allow(dead_code)]
    ignore: IgnoredAny,
}

impl<'a> Endpoint for Klines<'a> {
    fn endpoint(&self) -> Cow<'static, str> {
        return Cow::Borrowed("api/v3/klines");
    }

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::default();

        params
            .push("symbol", self.symbol.deref())
            .push("interval", self.interval)
            .push("limit", self.limit);
        return params;
    }
}
