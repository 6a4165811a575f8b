use std::{borrow::Cow, ops::Deref};

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::rest::{endpoint::Endpoint, params::QueryParams};

#[derive(Debug, Clone, Builder)]
pub struct TickerPrice<'a> {
    symbol: Cow<'a, str>,
}

#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct PriceTicker {
    symbol: String,
    price: String,
}

impl<'a> Endpoint for TickerPrice<'a> {
    fn endpoint(&self) -> Cow<'static, str> {
        return Cow::Borrowed("api/v3/ticker/price");
    }

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::default();

        params.push("symbol", self.symbol.deref());
        return params;
    }
}
