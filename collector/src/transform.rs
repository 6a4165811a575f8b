//! Reshapes raw market payloads into table rows.
//!
//! Every price, quantity and percent field arrives as a string and is parsed
//! into a [`Decimal`]. Any shape or parse error rejects the whole payload.

use std::str::FromStr;

use anyhow::Context;
use binance_api::rest::{
    market::{
        depth::DepthSnapshot, klines::RawKline, ticker_24hr::DailyTicker,
        ticker_price::PriceTicker, trades::RawTrade,
    },
    OneOrMany,
};
use models::{
    kline::KlineBuilder, latest_price::LatestPriceBuilder, order_book_level::OrderBookLevelBuilder,
    recent_trade::RecentTradeBuilder, ticker_24hr::Ticker24hrBuilder, Batch, Kline, LatestPrice,
    OrderBookLevel, RecentTrade, Ticker24hr,
};
use rust_decimal::Decimal;
use tracing::debug;
use types::Symbol;

use crate::resource::Resource;

/// Levels kept per side of the book.
pub const ORDER_BOOK_DEPTH: usize = 5;

/// Trades kept per payload, in the order the exchange sent them.
pub const RECENT_TRADES_CAP: usize = 50;

pub fn transform(
    resource: Resource,
    payload: serde_json::Value,
    symbol: &Symbol,
) -> anyhow::Result<Batch> {
    let batch = match resource {
        Resource::LatestPrices => Batch::LatestPrices(latest_prices(payload)?),
        Resource::OrderBook => Batch::OrderBook(order_book(payload, symbol)?),
        Resource::RecentTrades => Batch::RecentTrades(recent_trades(payload, symbol)?),
        Resource::Klines => Batch::Klines(klines(payload, symbol)?),
        Resource::Ticker24hr => Batch::Ticker24hr(ticker_24hr(payload)?),
    };
    return Ok(batch);
}

fn decimal(field: &str, value: &str) -> anyhow::Result<Decimal> {
    return Decimal::from_str(value)
        .with_context(|| format!("Coercing {field}={value:?} to decimal"));
}

/// One row per symbol, whether the payload is a single ticker or a list.
pub fn latest_prices(payload: serde_json::Value) -> anyhow::Result<Vec<LatestPrice>> {
    let tickers: OneOrMany<PriceTicker> =
        OneOrMany::from_value(payload).context("Parsing latest prices payload")?;

    return tickers
        .into_vec()
        .iter()
        .map(|ticker| -> anyhow::Result<LatestPrice> {
            let row = LatestPriceBuilder::default()
                .symbol(ticker.symbol().to_owned())
                .price(decimal("price", ticker.price())?)
                .build()?;
            Ok(row)
        })
        .collect();
}

/// Pairs the n-th best bid with the n-th best ask. When one side has fewer
/// levels the other side is cut to the same length.
pub fn order_book(
    payload: serde_json::Value,
    symbol: &Symbol,
) -> anyhow::Result<Vec<OrderBookLevel>> {
    let snapshot: DepthSnapshot =
        serde_json::from_value(payload).context("Parsing order book payload")?;
    let bids = &snapshot.bids()[..snapshot.bids().len().min(ORDER_BOOK_DEPTH)];
    let asks = &snapshot.asks()[..snapshot.asks().len().min(ORDER_BOOK_DEPTH)];
    if bids.len() != asks.len() {
        debug!(
            bids = bids.len(),
            asks = asks.len(),
            "Truncating order book to {} aligned levels",
            bids.len().min(asks.len())
        );
    }

    return bids
        .iter()
        .zip(asks.iter())
        .map(|(bid, ask)| -> anyhow::Result<OrderBookLevel> {
            let row = OrderBookLevelBuilder::default()
                .symbol(symbol.to_string())
                .bid_price(decimal("bid_price", &bid.0)?)
                .bid_quantity(decimal("bid_quantity", &bid.1)?)
                .ask_price(decimal("ask_price", &ask.0)?)
                .ask_quantity(decimal("ask_quantity", &ask.1)?)
                .build()?;
            Ok(row)
        })
        .collect();
}

pub fn recent_trades(
    payload: serde_json::Value,
    symbol: &Symbol,
) -> anyhow::Result<Vec<RecentTrade>> {
    let trades: Vec<RawTrade> =
        serde_json::from_value(payload).context("Parsing recent trades payload")?;

    return trades
        .iter()
        .take(RECENT_TRADES_CAP)
        .map(|trade| -> anyhow::Result<RecentTrade> {
            let row = RecentTradeBuilder::default()
                .symbol(symbol.to_string())
                .price(decimal("price", trade.price())?)
                .quantity(decimal("qty", trade.qty())?)
                .trade_time(*trade.time())
                .is_buyer_maker(*trade.is_buyer_maker())
                .build()?;
            Ok(row)
        })
        .collect();
}

pub fn klines(payload: serde_json::Value, symbol: &Symbol) -> anyhow::Result<Vec<Kline>> {
    let bars: Vec<RawKline> =
        serde_json::from_value(payload).context("Parsing klines payload")?;

    return bars
        .iter()
        .map(|bar| -> anyhow::Result<Kline> {
            let row = KlineBuilder::default()
                .symbol(symbol.to_string())
                .open_time(*bar.open_time())
                .open_price(decimal("open_price", bar.open())?)
                .high_price(decimal("high_price", bar.high())?)
                .low_price(decimal("low_price", bar.low())?)
                .close_price(decimal("close_price", bar.close())?)
                .volume(decimal("volume", bar.volume())?)
                .close_time(*bar.close_time())
                .build()?;
            Ok(row)
        })
        .collect();
}

pub fn ticker_24hr(payload: serde_json::Value) -> anyhow::Result<Vec<Ticker24hr>> {
    let tickers: OneOrMany<DailyTicker> =
        OneOrMany::from_value(payload).context("Parsing 24hr ticker payload")?;

    return tickers
        .into_vec()
        .iter()
        .map(|ticker| -> anyhow::Result<Ticker24hr> {
            let row = Ticker24hrBuilder::default()
                .symbol(ticker.symbol().to_owned())
                .price_change(decimal("price_change", ticker.price_change())?)
                .price_change_percent(decimal(
                    "price_change_percent",
                    ticker.price_change_percent(),
                )?)
                .weighted_avg_price(decimal("weighted_avg_price", ticker.weighted_avg_price())?)
                .prev_close_price(decimal("prev_close_price", ticker.prev_close_price())?)
                .last_price(decimal("last_price", ticker.last_price())?)
                .volume(decimal("volume", ticker.volume())?)
                .build()?;
            Ok(row)
        })
        .collect();
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;
    use types::Symbol;

    use super::{klines, latest_prices, order_book, recent_trades, ticker_24hr, transform};
    use crate::resource::Resource;

    fn btc() -> Symbol {
        return "BTCUSDT".parse().unwrap();
    }

    fn levels(count: usize, start: u32) -> serde_json::Value {
        return (0..count)
            .map(|i| json!([format!("{}.00", start + i as u32), "1.50000000"]))
            .collect();
    }

    fn bar(open_time: i64) -> serde_json::Value {
        return json!([
            open_time,
            "16200.00",
            "16250.10",
            "16190.00",
            "16220.50",
            "812.337",
            open_time + 3_599_999,
            "13160000.12",
            9123,
            "401.2",
            "6500000.5",
            "0"
        ]);
    }

    #[test]
    fn latest_prices_single_object() {
        let payload = json!({"symbol": "BTCUSDT", "price": "16220.50000000"});
        let rows = latest_prices(payload).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol(), "BTCUSDT");
        assert_eq!(*rows[0].price(), dec!(16220.5));
    }

    #[test]
    fn latest_prices_list() {
        let rows = latest_prices(json!([
            {"symbol": "BTCUSDT", "price": "16220.50"},
            {"symbol": "ETHUSDT", "price": "1200.01"}
        ]))
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].symbol(), "ETHUSDT");
        assert_eq!(*rows[1].price(), dec!(1200.01));
    }

    #[test]
    fn latest_prices_rejects_non_numeric_price() {
        let err = latest_prices(json!({"symbol": "BTCUSDT", "price": "n/a"})).unwrap_err();

        assert!(format!("{err:#}").contains("price"));
    }

    #[test]
    fn order_book_caps_each_side() {
        let payload = json!({"lastUpdateId": 1, "bids": levels(7, 100), "asks": levels(9, 200)});
        let rows = order_book(payload, &btc()).unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(*rows[0].bid_price(), dec!(100));
        assert_eq!(*rows[4].bid_price(), dec!(104));
        assert_eq!(*rows[4].ask_price(), dec!(204));
        assert!(rows.iter().all(|row| *row.bid_quantity() == dec!(1.5)));
    }

    #[test]
    fn order_book_truncates_to_shorter_side() {
        let payload = json!({"lastUpdateId": 1, "bids": levels(7, 100), "asks": levels(3, 200)});
        let rows = order_book(payload, &btc()).unwrap();

        assert_eq!(rows.len(), 3);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.symbol(), "BTCUSDT");
            assert_eq!(*row.bid_price(), dec!(100) + rust_decimal::Decimal::from(i));
            assert_eq!(*row.ask_price(), dec!(200) + rust_decimal::Decimal::from(i));
        }

        let payload = json!({"lastUpdateId": 1, "bids": levels(2, 100), "asks": levels(7, 200)});
        let rows = order_book(payload, &btc()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn order_book_missing_side_yields_no_rows() {
        let rows = order_book(json!({"lastUpdateId": 1, "bids": levels(5, 100)}), &btc()).unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn order_book_rejects_non_numeric_level() {
        order_book(
            json!({"bids": [["abc", "1.0"]], "asks": [["1.0", "1.0"]]}),
            &btc(),
        )
        .expect_err("non numeric bid price should not be coerced");
    }

    #[test]
    fn recent_trades_caps_and_renames() {
        let trades: Vec<serde_json::Value> = (0..60)
            .map(|i| {
                json!({
                    "id": 28457 + i,
                    "price": "16220.50",
                    "qty": "0.01200000",
                    "quoteQty": "194.646",
                    "time": 1672515782136i64 - i,
                    "isBuyerMaker": i % 2 == 0,
                    "isBestMatch": true
                })
            })
            .collect();

        let rows = recent_trades(serde_json::Value::Array(trades), &btc()).unwrap();

        assert_eq!(rows.len(), 50);
        assert_eq!(*rows[0].trade_time(), 1672515782136);
        assert_eq!(*rows[49].trade_time(), 1672515782136 - 49);
        assert_eq!(*rows[0].quantity(), dec!(0.012));
        assert!(*rows[0].is_buyer_maker());
        assert!(!*rows[1].is_buyer_maker());

        let value = serde_json::to_value(&rows[0]).unwrap();
        let object = value.as_object().unwrap();
        for name in ["symbol", "price", "quantity", "trade_time", "is_buyer_maker"] {
            assert!(object.contains_key(name), "missing {name}");
        }
        for name in ["qty", "time", "isBuyerMaker"] {
            assert!(!object.contains_key(name), "leaked {name}");
        }
        assert_eq!(object.len(), 5);
    }

    #[test]
    fn recent_trades_reject_non_numeric_quantity() {
        let payload = json!([{
            "id": 1,
            "price": "16220.50",
            "qty": "lots",
            "time": 1672515782136i64,
            "isBuyerMaker": true
        }]);

        let err = recent_trades(payload, &btc()).unwrap_err();

        assert!(format!("{err:#}").contains("qty"), "{err:#}");
    }

    #[test]
    fn klines_one_row_per_bar() {
        let rows = klines(json!([bar(1672513200000), bar(1672516800000)]), &btc()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(*rows[0].open_time(), 1672513200000);
        assert_eq!(*rows[0].close_time(), 1672516799999);
        assert_eq!(*rows[0].open_price(), dec!(16200.00));
        assert_eq!(*rows[0].high_price(), dec!(16250.10));
        assert_eq!(*rows[0].low_price(), dec!(16190.00));
        assert_eq!(*rows[0].close_price(), dec!(16220.50));
        assert_eq!(*rows[0].volume(), dec!(812.337));
    }

    #[test]
    fn klines_reject_short_bar() {
        klines(json!([[1672513200000i64, "1", "2", "0.5", "1.5", "10"]]), &btc())
            .expect_err("a bar must carry 12 fields");
    }

    #[test]
    fn klines_reject_non_numeric_price() {
        let mut bad = bar(1672513200000);
        bad[4] = json!("n/a");

        let err = klines(json!([bar(1672509600000), bad]), &btc()).unwrap_err();
        assert!(format!("{err:#}").contains("close_price"), "{err:#}");
    }

    #[test]
    fn ticker_24hr_scenario() {
        let rows = ticker_24hr(json!({
            "symbol": "BTCUSDT",
            "priceChange": "120.50",
            "priceChangePercent": "0.75",
            "weightedAvgPrice": "16200.33",
            "prevClosePrice": "16100.00",
            "lastPrice": "16220.50",
            "volume": "2500.125"
        }))
        .unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.symbol(), "BTCUSDT");
        assert_eq!(*row.price_change(), dec!(120.50));
        assert_eq!(*row.price_change_percent(), dec!(0.75));
        assert_eq!(*row.weighted_avg_price(), dec!(16200.33));
        assert_eq!(*row.prev_close_price(), dec!(16100.00));
        assert_eq!(*row.last_price(), dec!(16220.50));
        assert_eq!(*row.volume(), dec!(2500.125));
    }

    #[test]
    fn ticker_24hr_rejects_missing_field() {
        let err = ticker_24hr(json!({"symbol": "BTCUSDT", "priceChange": "1.0"})).unwrap_err();

        assert!(format!("{err:#}").contains("missing field"), "{err:#}");
    }

    #[test]
    fn ticker_24hr_rejects_non_numeric_percent() {
        let err = ticker_24hr(json!({
            "symbol": "BTCUSDT",
            "priceChange": "120.50",
            "priceChangePercent": "up",
            "weightedAvgPrice": "16200.33",
            "prevClosePrice": "16100.00",
            "lastPrice": "16220.50",
            "volume": "2500.125"
        }))
        .unwrap_err();

        assert!(format!("{err:#}").contains("price_change_percent"), "{err:#}");
    }

    #[test]
    fn dispatch_tags_batch_with_table() {
        let batch = transform(
            Resource::LatestPrices,
            json!({"symbol": "BTCUSDT", "price": "1"}),
            &btc(),
        )
        .unwrap();

        assert_eq!(batch.table_name(), "latest_prices");
        assert_eq!(batch.len(), 1);
    }
}
