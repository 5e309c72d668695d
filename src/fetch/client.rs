// src/fetch/client.rs

use reqwest::Client;
use tracing::debug;

use super::{urls::month_url, FetchError, PageSource};
use crate::config::SourceConfig;
use crate::dates::MonthQuery;

/// Fetches month pages over HTTP.
pub struct HttpSource {
    client: Client,
    source: SourceConfig,
}

impl HttpSource {
    pub fn new(client: Client, source: SourceConfig) -> Self {
        Self { client, source }
    }
}

impl PageSource for HttpSource {
    async fn fetch_month(&self, query: MonthQuery) -> Result<Vec<u8>, FetchError> {
        let url = month_url(&self.source, query)?;
        debug!(%url, "GET");
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }
}
