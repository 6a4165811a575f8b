use std::{borrow::Cow, ops::Deref};

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::rest::{endpoint::Endpoint, params::QueryParams};

#[derive(Debug, Clone, Builder)]
pub struct Ticker24hr<'a> {
    symbol: Cow<'a, str>,
}

/// Rolling 24 hour statistics. Only the fields that get stored are kept.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTicker {
    symbol: String,
    price_change: String,
    price_change_percent: String,
    weighted_avg_price: String,
    prev_close_price: String,
    last_price: String,
    volume: String,
}

impl<'a> Endpoint for Ticker24hr<'a> {
    fn endpoint(&self) -> Cow<'static, str> {
        return Cow::Borrowed("api/v3/ticker/24hr");
    }

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::default();

        params.push("symbol", self.symbol.deref());
        return params;
    }
}
