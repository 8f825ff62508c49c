//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging. The `tracing` macros spell
// these as identifiers; readers of captured or JSON events use the constants.
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Traversal identifiers
pub const FIELD_NODE: &str = "node";

// Traversal counters
pub const FIELD_ROOTS: &str = "roots";
pub const FIELD_GROUPS: &str = "groups";
pub const FIELD_TRANSFERRED: &str = "transferred";
pub const FIELD_SKIPPED_GROUPS: &str = "skipped_groups";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical operation names
pub const OP_SAVE: &str = "save";
pub const OP_LOAD: &str = "load";
pub const OP_SYNC: &str = "sync";
pub const OP_OPEN: &str = "open";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
