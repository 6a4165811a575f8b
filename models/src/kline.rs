use derive_builder::Builder;
use derive_getters::Getters;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Insertable, Builder, Getters, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::klines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Kline {
    symbol: String,
    open_time: i64,
    open_price: Decimal,
    high_price: Decimal,
    low_price: Decimal,
    close_price: Decimal,
    volume: Decimal,
    close_time: i64,
}
