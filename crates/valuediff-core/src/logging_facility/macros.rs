//! Operation logging macros.
//!
//! Every event carries `component`, `op` and `event`; names come from
//! `valuediff_core_types::schema`. Extra `key = value` fields are passed
//! through to `tracing` unchanged, including `%`/`?` sigils.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event
            $(, $($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use valuediff_core::log_op_start;
/// log_op_start!("deep_diff_values");
/// log_op_start!("deep_diff_values", left_shape = "Mapping");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(info, $op, $crate::schema::EVENT_START $(, $($field)*)?)
    };
}

/// Log the successful end of an operation. `duration_ms` is required.
///
/// ```
/// # use valuediff_core::log_op_end;
/// log_op_end!("deep_diff_values", duration_ms = 3, diff_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log a failed operation with the error's kind and code.
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
///
/// ```
/// # use valuediff_core::log_op_error;
/// use valuediff_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::InvalidJson);
/// log_op_error!("json::parse", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
