use derive_builder::Builder;
use derive_getters::Getters;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Insertable, Builder, Getters, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::recent_trades)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecentTrade {
    symbol: String,
    price: Decimal,
    quantity: Decimal,
    /// Exchange execution time, epoch milliseconds.
    trade_time: i64,
    is_buyer_maker: bool,
}
