//! Content hashes for change detection.
//!
//! A record's hash is the SHA-256 of its canonical JSON form. Field order is
//! part of that form, so reordering columns changes every hash in the table.

use crate::model::Record;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a record's canonical JSON (64 characters).
pub fn record_hash(record: &Record) -> String {
    hash_string(&record.to_canonical_json())
}

pub(crate) fn hash_string(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hex::encode(hasher.finalize())
}
