//! Sheet transports: how a tab's raw CSV payload is obtained.

mod dir;
mod http;

pub use dir::DirTransport;
pub use http::HttpTransport;

use crate::errors::TransportError;
use async_trait::async_trait;

/// Fetches the raw delimited-text payload of one sheet tab.
///
/// Retries and timeouts belong to the implementation; the loader calls each
/// tab once per cycle.
#[async_trait]
pub trait SheetTransport: Send + Sync {
    async fn fetch(&self, tab: &str, cache_bust: i64) -> Result<String, TransportError>;
}
