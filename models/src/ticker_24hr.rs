use derive_builder::Builder;
use derive_getters::Getters;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Insertable, Builder, Getters, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::ticker_24hr)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Ticker24hr {
    symbol: String,
    price_change: Decimal,
    price_change_percent: Decimal,
    weighted_avg_price: Decimal,
    prev_close_price: Decimal,
    last_price: Decimal,
    volume: Decimal,
}
