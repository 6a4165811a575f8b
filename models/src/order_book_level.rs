use derive_builder::Builder;
use derive_getters::Getters;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The n-th best bid stored next to the n-th best ask. The two sides are
/// not a matched pair.
#[derive(Debug, Clone, PartialEq, Insertable, Builder, Getters, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::order_book)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderBookLevel {
    symbol: String,
    bid_price: Decimal,
    bid_quantity: Decimal,
    ask_price: Decimal,
    ask_quantity: Decimal,
}
