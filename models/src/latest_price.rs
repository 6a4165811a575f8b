use derive_builder::Builder;
use derive_getters::Getters;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Insertable, Builder, Getters, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::latest_prices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LatestPrice {
    symbol: String,
    price: Decimal,
}
