//! Correlation types for load-cycle tracking
//!
//! Every load cycle carries a [`CycleId`] so that the per-table fetch, parse
//! and diff events it emits can be grouped together in the logs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single load cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleId(String);

impl CycleId {
    /// Generate a new time-ordered CycleId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through one load cycle
#[derive(Debug, Clone)]
pub struct CycleContext {
    pub cycle_id: CycleId,
    /// Cache-bust token appended to every fetch of this cycle
    pub cache_bust: i64,
}

impl CycleContext {
    pub fn new(cache_bust: i64) -> Self {
        Self {
            cycle_id: CycleId::new(),
            cache_bust,
        }
    }
}
