//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_FEATURE_ID: &str = "feature_id";
pub const FIELD_ENVIRONMENT_ID: &str = "environment_id";
pub const FIELD_SEGMENT_ID: &str = "segment_id";

// Collection sizes
pub const FIELD_FEATURE_COUNT: &str = "feature_count";
pub const FIELD_TOTAL_CHANGES: &str = "total_changes";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
