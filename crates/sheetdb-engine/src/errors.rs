//! Transport errors.
//!
//! A transport error never aborts a load cycle: the table it concerns
//! degrades to an empty dataset for that cycle.

use sheetdb_core::errors::{ExError, ExErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success status
    #[error("HTTP {status} fetching tab {tab}")]
    Http { tab: String, status: u16 },

    /// The request did not complete
    #[error("Network error fetching tab {tab}: {message}")]
    Network { tab: String, message: String },

    /// A local payload file could not be read
    #[error("Cannot read tab {tab}: {source}")]
    Io {
        tab: String,
        #[source]
        source: std::io::Error,
    },

    /// No configured sheet serves this tab
    #[error("No sheet serves tab {tab}")]
    UnknownTable { tab: String },
}

impl TransportError {
    pub fn tab(&self) -> &str {
        match self {
            TransportError::Http { tab, .. }
            | TransportError::Network { tab, .. }
            | TransportError::Io { tab, .. }
            | TransportError::UnknownTable { tab } => tab,
        }
    }
}

impl From<TransportError> for ExError {
    fn from(err: TransportError) -> Self {
        let kind = match err {
            TransportError::UnknownTable { .. } => ExErrorKind::InvalidConfig,
            _ => ExErrorKind::Transport,
        };
        ExError::new(kind)
            .with_op("fetch")
            .with_table(err.tab().to_string())
            .with_message(err.to_string())
    }
}
