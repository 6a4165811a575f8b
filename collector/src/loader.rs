use std::time::Duration;

use anyhow::Context;
use diesel::{
    r2d2::ConnectionManager,
    result::{DatabaseErrorKind, Error as DieselError},
    PgConnection, RunQueryDsl,
};
use models::{
    schema::{klines, latest_prices, order_book, recent_trades, ticker_24hr},
    Batch,
};

use crate::config::DatabaseConfig;

pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The store cannot be reached at all; every other table would fail too.
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Inserting into {table}: {source}")]
    Rejected {
        table: &'static str,
        #[source]
        source: DieselError,
    },
}

/// Appends rows to their table. Never updates or deletes.
pub trait Loader {
    fn load(&self, batch: &Batch) -> Result<usize, LoadError>;
}

/// The pool does not connect eagerly, so an unreachable database shows up
/// as `LoadError::Unavailable` inside the loop rather than at startup.
pub fn init_pg_pool(database: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let database_url = database.url().context("Building database url")?;
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    return Ok(r2d2::Pool::builder()
        .max_size(database.pool_size.max(1))
        .min_idle(Some(0))
        .connection_timeout(database.connection_timeout.max(Duration::from_secs(1)))
        .build_unchecked(manager));
}

pub struct PgLoader {
    pool: PgPool,
}

impl PgLoader {
    pub fn new(pool: PgPool) -> Self {
        return Self { pool };
    }
}

impl Loader for PgLoader {
    fn load(&self, batch: &Batch) -> Result<usize, LoadError> {
        if batch.is_empty() {
            return Ok(0);
        }
        let table = batch.table_name();
        let pg_conn = &mut self
            .pool
            .get()
            .map_err(|err| LoadError::Unavailable(err.to_string()))?;

        let res = match batch {
            Batch::LatestPrices(rows) => diesel::insert_into(latest_prices::table)
                .values(rows)
                .execute(pg_conn),
            Batch::OrderBook(rows) => diesel::insert_into(order_book::table)
                .values(rows)
                .execute(pg_conn),
            Batch::RecentTrades(rows) => diesel::insert_into(recent_trades::table)
                .values(rows)
                .execute(pg_conn),
            Batch::Klines(rows) => diesel::insert_into(klines::table)
                .values(rows)
                .execute(pg_conn),
            Batch::Ticker24hr(rows) => diesel::insert_into(ticker_24hr::table)
                .values(rows)
                .execute(pg_conn),
        };

        return res.map_err(|source| match source {
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                LoadError::Unavailable(info.message().to_owned())
            }
            source => LoadError::Rejected { table, source },
        });
    }
}

#[cfg(test)]
mod tests {
    //! Round trip against a real database. Run with
    //! `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

    use diesel::{prelude::*, Connection, PgConnection};
    use models::{
        latest_price::LatestPriceBuilder,
        schema::latest_prices,
        Batch,
    };
    use rust_decimal_macros::dec;

    use super::{init_pg_pool, Loader, PgLoader};
    use crate::{config::Config, schema::create_tables};

    fn batch(count: usize) -> Batch {
        return Batch::LatestPrices(
            (0..count)
                .map(|_| {
                    LatestPriceBuilder::default()
                        .symbol("BTCUSDT".to_owned())
                        .price(dec!(16220.50))
                        .build()
                        .unwrap()
                })
                .collect(),
        );
    }

    #[test]
    #[ignore]
    fn appends_without_touching_existing_rows() {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL");
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.database.url = Some(url.clone());

        let mut conn = PgConnection::establish(&url).unwrap();
        create_tables(&mut conn).expect("first schema pass");
        create_tables(&mut conn).expect("schema creation is idempotent");

        let count = |conn: &mut PgConnection| -> i64 {
            return latest_prices::table.count().get_result(conn).unwrap();
        };
        let first_id = |conn: &mut PgConnection| -> Option<i32> {
            return latest_prices::table
                .select(latest_prices::id)
                .order(latest_prices::id.asc())
                .first(conn)
                .optional()
                .unwrap();
        };
        let before = count(&mut conn);

        let loader = PgLoader::new(init_pg_pool(&config.database).unwrap());
        let sizes = [3, 0, 2];
        for size in sizes {
            assert_eq!(loader.load(&batch(size)).unwrap(), size);
        }
        let oldest = first_id(&mut conn);

        assert_eq!(count(&mut conn), before + sizes.iter().sum::<usize>() as i64);
        loader.load(&batch(1)).unwrap();
        assert_eq!(first_id(&mut conn), oldest);
    }

    #[test]
    fn empty_batch_skips_the_database() {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.database.url = Some("postgres://nobody@127.0.0.1:9/none".to_owned());
        let loader = PgLoader::new(init_pg_pool(&config.database).unwrap());

        assert_eq!(loader.load(&batch(0)).unwrap(), 0);
    }
}
