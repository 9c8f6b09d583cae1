//! Canonical schema constants for structured logging and events
//!
//! Every field name the logging macros and the comparison engine emit is
//! declared here.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison context
pub const FIELD_DIFF_COUNT: &str = "diff_count";
pub const FIELD_PATH: &str = "path";
pub const FIELD_PATH_DEPTH: &str = "path_depth";
pub const FIELD_SHAPE: &str = "shape";
pub const FIELD_LEFT_SHAPE: &str = "left_shape";
pub const FIELD_RIGHT_SHAPE: &str = "right_shape";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_DIFF_COUNT.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_field_names_are_distinct() {
        let mut fields = vec![
            FIELD_COMPONENT,
            FIELD_OP,
            FIELD_EVENT,
            FIELD_DURATION_MS,
            FIELD_DIFF_COUNT,
            FIELD_PATH,
            FIELD_PATH_DEPTH,
            FIELD_SHAPE,
            FIELD_LEFT_SHAPE,
            FIELD_RIGHT_SHAPE,
            FIELD_ERR_KIND,
            FIELD_ERR_CODE,
        ];
        let total = fields.len();
        fields.sort_unstable();
        fields.dedup();
        assert_eq!(fields.len(), total);
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }
}
