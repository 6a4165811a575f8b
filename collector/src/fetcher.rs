use std::borrow::Cow;

use anyhow::Context;
use async_trait::async_trait;
use binance_api::{
    rest::{
        client::Client,
        market::{
            depth::DepthBuilder, klines::KlinesBuilder, ticker_24hr::Ticker24hrBuilder,
            ticker_price::TickerPriceBuilder, trades::TradesBuilder,
        },
    },
    Error, Query,
};
use tracing::error;
use types::Symbol;

use crate::{config::ApiConfig, resource::Resource};

#[async_trait]
pub trait Fetcher {
    /// Raw JSON payload of `resource`, or the transport/status failure.
    async fn fetch(&self, resource: Resource) -> Result<serde_json::Value, Error>;
}

pub struct BinanceFetcher<C> {
    client: C,
    symbol: Symbol,
    api: ApiConfig,
}

impl<C> BinanceFetcher<C>
where
    C: Client + Sync,
{
    pub fn new(client: C, symbol: Symbol, api: ApiConfig) -> Self {
        return Self {
            client,
            symbol,
            api,
        };
    }

    async fn query(&self, resource: Resource) -> Result<serde_json::Value, Error> {
        let symbol = Cow::Borrowed(self.symbol.as_str());

        return match resource {
            Resource::LatestPrices => {
                TickerPriceBuilder::default()
                    .symbol(symbol)
                    .build()
                    .context("Building ticker price request")?
                    .query(&self.client)
                    .await
            }
            Resource::OrderBook => {
                DepthBuilder::default()
                    .symbol(symbol)
                    .limit(self.api.depth_limit)
                    .build()
                    .context("Building depth request")?
                    .query(&self.client)
                    .await
            }
            Resource::RecentTrades => {
                TradesBuilder::default()
                    .symbol(symbol)
                    .limit(self.api.trades_limit)
                    .build()
                    .context("Building trades request")?
                    .query(&self.client)
                    .await
            }
            Resource::Klines => {
                KlinesBuilder::default()
                    .symbol(symbol)
                    .interval(self.api.kline_interval)
                    .limit(self.api.kline_limit)
                    .build()
                    .context("Building klines request")?
                    .query(&self.client)
                    .await
            }
            Resource::Ticker24hr => {
                Ticker24hrBuilder::default()
                    .symbol(symbol)
                    .build()
                    .context("Building 24hr ticker request")?
                    .query(&self.client)
                    .await
            }
        };
    }
}

#[async_trait]
impl<C> Fetcher for BinanceFetcher<C>
where
    C: Client + Send + Sync,
{
    async fn fetch(&self, resource: Resource) -> Result<serde_json::Value, Error> {
        let res = self.query(resource).await;
        if let Err(err) = &res {
            error!(%resource, "Error fetching {resource} data: {err:#}");
        }
        return res;
    }
}
