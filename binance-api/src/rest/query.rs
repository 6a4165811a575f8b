use async_trait::async_trait;
use http::Method;

use crate::error::Error;

use super::{client::Client, endpoint::Endpoint};

#[async_trait]
pub trait Query<T, C>
where
    C: Client,
{
    async fn query(&self, client: &C) -> Result<T, Error>;
}

/// Every endpoint can be queried for its raw JSON body. Decoding into a wire
/// type is left to the caller so a malformed payload surfaces where it is used.
#[async_trait]
impl<E, C> Query<serde_json::Value, C> for E
where
    E: Endpoint + Sync,
    C: Client + Sync,
{
    async fn query(&self, client: &C) -> Result<serde_json::Value, Error> {
        let endpoint = self.endpoint();
        let mut url = client.url(&endpoint)?;
        self.params().add_to_url(&mut url);

        let request = http::Request::builder()
            .method(Method::GET)
            .uri(url.as_str());
        let response = client.exec(request, Vec::new()).await?;
        if !response.status().is_success() {
            return Err(Error::StatusError {
                endpoint: endpoint.into_owned(),
                status: response.status(),
                body: String::from_utf8_lossy(response.body()).into_owned(),
            });
        }
        let payload = serde_json::from_slice(response.body())?;
        return Ok(payload);
    }
}
