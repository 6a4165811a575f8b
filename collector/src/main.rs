use anyhow::Context;
use binance_api::RestClient;
use collector::{
    driver::{Driver, TokioSleeper},
    fetcher::BinanceFetcher,
    loader::{init_pg_pool, PgLoader},
    schema, Config,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env().context("Reading configuration")?;
    let pg_pool = init_pg_pool(&config.database).context("Creating PgPool")?;

    if config.create_tables {
        let res = pg_pool
            .get()
            .context("Getting connection from pg_pool")
            .and_then(|mut pg_conn| schema::create_tables(&mut pg_conn));
        match res {
            Ok(()) => info!("Tables created successfully"),
            Err(err) => error!("Error creating tables: {err:#}"),
        }
    }

    let client = RestClient::new(&config.api.base_url, config.api.timeout)
        .context("Creating Binance REST client")?;
    let fetcher = BinanceFetcher::new(client, config.symbol.clone(), config.api.clone());
    let driver = Driver::new(
        fetcher,
        PgLoader::new(pg_pool),
        TokioSleeper,
        config.symbol.clone(),
        config.schedule,
    );

    info!(
        symbol = %config.symbol,
        poll_interval_secs = config.schedule.poll_interval.as_secs(),
        error_cooldown_secs = config.schedule.error_cooldown.as_secs(),
        "Starting collector"
    );
    tokio::select! {
        _ = driver.run() => {}
        res = tokio::signal::ctrl_c() => {
            res.context("Listening for ctrl-c")?;
            info!("Received ctrl-c, shutting down");
        }
    }
    return Ok(());
}
