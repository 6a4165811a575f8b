use std::{borrow::Cow, ops::Deref};

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::rest::{endpoint::Endpoint, params::QueryParams};

#[derive(Debug, Clone, Builder)]
pub struct Depth<'a> {
    symbol: Cow<'a, str>,
    #[builder(default = "5")]
    limit: u16,
}

/// Bids are sorted best (highest) first, asks best (lowest) first.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthSnapshot {
    #[serde(default)]
    last_update_id: u64,
    #[serde(default)]
    bids: Vec<PriceLevel>,
    #[serde(default)]
    asks: Vec<PriceLevel>,
}

/// `[price, quantity]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceLevel(pub String, pub String);

impl<'a> Endpoint for Depth<'a> {
    fn endpoint(&self) -> Cow<'static, str> {
        return Cow::Borrowed("api/v3/depth");
    }

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::default();

        params
            .push("symbol", self.symbol.deref())
            .push("limit", self.limit);
        return params;
    }
}
