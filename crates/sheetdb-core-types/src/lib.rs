//! Core types shared across sheetdb crates
//!
//! - **Correlation types**: CycleId, CycleContext
//! - **Schema constants**: Canonical structured-logging field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{CycleContext, CycleId};
