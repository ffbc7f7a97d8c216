//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent across the index builder,
//! the classifier and the CLI.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Comparison sizes
pub const FIELD_TEXT_COUNT: &str = "text_count";
pub const FIELD_LINK_COUNT: &str = "link_count";
pub const FIELD_IMAGE_COUNT: &str = "image_count";
pub const FIELD_DIFF_COUNT: &str = "diff_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
