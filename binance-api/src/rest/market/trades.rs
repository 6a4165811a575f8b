use std::{borrow::Cow, ops::Deref};

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::rest::{endpoint::Endpoint, params::QueryParams};

#[derive(Debug, Clone, Builder)]
pub struct Trades<'a> {
    symbol: Cow<'a, str>,
    #[builder(default = "50")]
    limit: u16,
}

#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrade {
    id: u64,
    price: String,
    qty: String,
    #[serde(default)]
    quote_qty: Option<String>,
    time: i64,
    is_buyer_maker: bool,
    #[serde(default)]
    is_best_match: Option<bool>,
}

impl<'a> Endpoint for Trades<'a> {
    fn endpoint(&self) -> Cow<'static, str> {
        return Cow::Borrowed("api/v3/trades");
    }

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::default();

        params
            .push("symbol", self.symbol.deref())
            .push("limit", self.limit);
        return params;
    }
}
