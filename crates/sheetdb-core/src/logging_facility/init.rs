//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Environment variable consulted before `RUST_LOG`
pub const LOG_ENV_VAR: &str = "SHEETDB_LOG";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize the logging facility
///
/// Call once at application startup; later calls are no-ops, as is a call
/// made after another global subscriber was installed.
///
/// - **Development**: human-readable logs at debug level
/// - **Production**: JSON logs at info level
/// - **Test**: bare registry (use `init_test_capture` to assert on events)
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(filter_or("sheetdb=debug"))
                .with_writer(std::io::stderr)
                .finish()
                .try_init()
                .ok();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter_or("sheetdb=info"))
                .with_writer(std::io::stderr)
                .finish()
                .try_init()
                .ok();
        }
        Profile::Test => {
            tracing_subscriber::registry().try_init().ok();
        }
    });
}
