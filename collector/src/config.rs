use std::{str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use types::{KlineInterval, Symbol};
use url::Url;

use crate::driver::Schedule;

/// Static settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub symbol: Symbol,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub schedule: Schedule,
    pub create_tables: bool,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub depth_limit: u16,
    pub trades_limit: u16,
    pub kline_interval: KlineInterval,
    pub kline_limit: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        return Self {
            base_url: binance_api::DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(10),
            depth_limit: 5,
            trades_limit: 50,
            kline_interval: KlineInterval::Hour(1),
            kline_limit: 100,
        };
    }
}

#[derive(Clone)]
pub struct DatabaseConfig {
    /// Takes precedence over the individual connection parts when set.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub pool_size: u32,
    pub connection_timeout: Duration,
}

impl DatabaseConfig {
    /// Credentials are percent-encoded, so any character is allowed in them.
    pub fn url(&self) -> anyhow::Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.to_owned());
        }
        let mut url = Url::parse(&format!("postgres://{}:{}", self.host, self.port))
            .with_context(|| format!("POSTGRES_HOST={} from environment", self.host))?;
        url.set_path(&format!("/{}", self.dbname));
        url.set_username(&self.user)
            .map_err(|()| anyhow!("POSTGRES_USER={} from environment", self.user))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|()| anyhow!("Setting POSTGRES_PASSWORD in database url"))?;
        }
        return Ok(url.into());
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return f
            .debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("dbname", &self.dbname)
            .field("pool_size", &self.pool_size)
            .field("connection_timeout", &self.connection_timeout)
            .finish_non_exhaustive();
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        return Self::from_lookup(|key| std::env::var(key).ok());
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_defaults = ApiConfig::default();
        let schedule_defaults = Schedule::default();

        let api = ApiConfig {
            base_url: lookup("BINANCE_BASE_URL").unwrap_or(api_defaults.base_url),
            timeout: secs_or(&lookup, "HTTP_TIMEOUT_SECS", api_defaults.timeout)?,
            depth_limit: parse_or(&lookup, "DEPTH_LIMIT", api_defaults.depth_limit)?,
            trades_limit: parse_or(&lookup, "TRADES_LIMIT", api_defaults.trades_limit)?,
            kline_interval: parse_or(&lookup, "KLINE_INTERVAL", api_defaults.kline_interval)?,
            kline_limit: parse_or(&lookup, "KLINE_LIMIT", api_defaults.kline_limit)?,
        };
        let database = DatabaseConfig {
            url: lookup("DATABASE_URL"),
            host: lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_owned()),
            port: parse_or(&lookup, "POSTGRES_PORT", 5432)?,
            user: lookup("POSTGRES_USER").unwrap_or_else(|| "postgres".to_owned()),
            password: lookup("POSTGRES_PASSWORD").unwrap_or_default(),
            dbname: lookup("POSTGRES_DB").unwrap_or_else(|| "binance_crypto_db".to_owned()),
            pool_size: parse_or(&lookup, "PG_POOL_SIZE", 2)?,
            connection_timeout: secs_or(
                &lookup,
                "PG_CONNECTION_TIMEOUT_SECS",
                Duration::from_secs(10),
            )?,
        };
        let schedule = Schedule {
            poll_interval: secs_or(&lookup, "POLL_INTERVAL_SECS", schedule_defaults.poll_interval)?,
            error_cooldown: secs_or(
                &lookup,
                "ERROR_COOLDOWN_SECS",
                schedule_defaults.error_cooldown,
            )?,
        };

        return Ok(Self {
            symbol: parse_or(&lookup, "SYMBOL", Symbol::default())?,
            api,
            database,
            schedule,
            create_tables: parse_or(&lookup, "CREATE_TABLES", true)?,
        });
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    return match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key}={value} from environment")),
        None => Ok(default),
    };
}

/// Whole seconds, at least one.
fn secs_or<F>(lookup: &F, key: &str, default: Duration) -> anyhow::Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = parse_or(lookup, key, default.as_secs())?;
    anyhow::ensure!(secs > 0, "{key}=0 from environment, must be at least 1 second");
    return Ok(Duration::from_secs(secs));
}
