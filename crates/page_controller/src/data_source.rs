//! Where the data loader gets its payload from.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::LoadError;

#[async_trait(?Send)]
pub trait DataSource {
    /// `GET` the path and parse the body as JSON.
    async fn fetch_json(&self, path: &str) -> Result<Value, LoadError>;
}

/// `reqwest`-backed source rooted at a base URL.
///
/// The response status is not inspected: whatever body comes back is parsed, so
/// an error page surfaces as a decode failure. No timeout is applied.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    http: Client,
    base_url: Url,
}

impl HttpDataSource {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn parse(base_url: &str) -> Result<Self, LoadError> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, LoadError> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait(?Send)]
impl DataSource for HttpDataSource {
    async fn fetch_json(&self, path: &str) -> Result<Value, LoadError> {
        let url = self.endpoint(path)?;
        debug!(%url, "fetching page data");
        let body = self.http.get(url).send().await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
