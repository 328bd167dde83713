//! Canonical schema constants for structured logging and events
//!
//! Field names emitted by the `log_op_*` macros and looked up by log
//! consumers such as the test capture layer.

pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_CYCLE_ID: &str = "cycle_id";
pub const FIELD_TABLE: &str = "table";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
