use super::SheetTransport;
use crate::errors::TransportError;
use crate::source::SheetSource;
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use std::time::Duration;

/// Fetches CSV exports over HTTP, bypassing intermediate caches.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    source: SheetSource,
}

impl HttpTransport {
    pub fn new(source: SheetSource) -> Self {
        Self::with_client(Client::new(), source)
    }

    /// Build with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns the client builder error (TLS backend unavailable).
    pub fn with_timeout(source: SheetSource, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, source))
    }

    pub fn with_client(client: Client, source: SheetSource) -> Self {
        Self { client, source }
    }

    pub fn source(&self) -> &SheetSource {
        &self.source
    }
}

#[async_trait]
impl SheetTransport for HttpTransport {
    async fn fetch(&self, tab: &str, cache_bust: i64) -> Result<String, TransportError> {
        let url = self.source.csv_url(tab, cache_bust)?;
        tracing::debug!(tab, url = %url, "fetching tab");

        let network = |e: reqwest::Error| TransportError::Network {
            tab: tab.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http {
                tab: tab.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(network)
    }
}
