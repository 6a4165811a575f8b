use anyhow::Context;
use diesel::{Connection, PgConnection, RunQueryDsl};

/// One statement per table. Every table is standalone and safe to create
/// again, so order does not matter.
pub const CREATE_TABLES: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS latest_prices (
        id SERIAL PRIMARY KEY,
        symbol VARCHAR(50) NOT NULL,
        price DECIMAL(20,8) NOT NULL,
        timestamp TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_book (
        id SERIAL PRIMARY KEY,
        symbol VARCHAR(50) NOT NULL,
        bid_price DECIMAL(20,8) NOT NULL,
        bid_quantity DECIMAL(20,8) NOT NULL,
        ask_price DECIMAL(20,8) NOT NULL,
        ask_quantity DECIMAL(20,8) NOT NULL,
        timestamp TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS recent_trades (
        id SERIAL PRIMARY KEY,
        symbol VARCHAR(50) NOT NULL,
        price DECIMAL(20,8) NOT NULL,
        quantity DECIMAL(20,8) NOT NULL,
        trade_time BIGINT NOT NULL,
        is_buyer_maker BOOLEAN NOT NULL,
        timestamp TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS klines (
        id SERIAL PRIMARY KEY,
        symbol VARCHAR(50) NOT NULL,
        open_time BIGINT NOT NULL,
        open_price DECIMAL(20,8) NOT NULL,
        high_price DECIMAL(20,8) NOT NULL,
        low_price DECIMAL(20,8) NOT NULL,
        close_price DECIMAL(20,8) NOT NULL,
        volume DECIMAL(20,8) NOT NULL,
        close_time BIGINT NOT NULL,
        timestamp TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ticker_24hr (
        id SERIAL PRIMARY KEY,
        symbol VARCHAR(50) NOT NULL,
        price_change DECIMAL(20,8) NOT NULL,
        price_change_percent DECIMAL(10,4) NOT NULL,
        weighted_avg_price DECIMAL(20,8) NOT NULL,
        prev_close_price DECIMAL(20,8) NOT NULL,
        last_price DECIMAL(20,8) NOT NULL,
        volume DECIMAL(20,8) NOT NULL,
        timestamp TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
];

/// Creates any missing table in a single transaction.
pub fn create_tables(pg_conn: &mut PgConnection) -> anyhow::Result<()> {
    pg_conn
        .transaction::<_, diesel::result::Error, _>(|conn| {
            for statement in CREATE_TABLES {
                diesel::sql_query(statement).execute(conn)?;
            }
            Ok(())
        })
        .context("Creating tables")?;
    return Ok(());
}
