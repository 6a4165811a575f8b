pub mod error;
pub mod rest;

pub use error::Error;
pub use rest::{client::RestClient, query::Query};

/// Production host of the public spot REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com/";
