use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::{header::ACCEPT, request, response, HeaderValue};
use url::Url;

use crate::error::Error;

#[async_trait]
pub trait Client {
    fn url(&self, endpoint: &str) -> Result<Url, Error>;

    async fn exec(
        &self,
        request: request::Builder,
        body: Vec<u8>,
    ) -> Result<response::Response<Bytes>, Error>;
}

pub struct RestClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    /// `timeout` bounds both the TCP connect and the whole request.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self, Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };

        return Ok(Self { client, base_url });
    }
}

#[async_trait]
impl Client for RestClient {
    fn url(&self, endpoint: &str) -> anyhow::Result<Url, Error> {
        let url = self.base_url.join(endpoint)?.to_owned();

        return Ok(url);
    }

    async fn exec(
        &self,
        request: request::Builder,
        body: Vec<u8>,
    ) -> anyhow::Result<response::Response<Bytes>, Error> {
        let mut http_request = request.body(body)?;
        http_request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        let request: reqwest::Request = http_request.try_into()?;
        let resp = self.client.execute(request).await?;
        let mut http_resp = http::response::Response::builder()
            .status(resp.status())
            .version(resp.version());

        if let Some(http_headers) = http_resp.headers_mut() {
            for (key, value) in resp.headers() {
                http_headers.insert(key, value.to_owned());
            }
        }
        return Ok(http_resp.body(resp.bytes().await?)?);
    }
}
