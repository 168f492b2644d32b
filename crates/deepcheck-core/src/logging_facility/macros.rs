//! Canonical logging macros
//!
//! Every operation logs one `start` event and exactly one of `end` or
//! `end_error`. Extra fields pass through to `tracing` unchanged.

/// Log the start of an operation
///
/// ```
/// # use deepcheck_core::log_op_start;
/// log_op_start!("render");
/// log_op_start!("render", bytes = 42);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        )
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        )
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use deepcheck_core::log_op_end;
/// log_op_end!("render", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        )
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        )
    };
}

/// Log an operation error; `$err` is anything convertible into `CheckError`
///
/// ```
/// # use deepcheck_core::log_op_error;
/// use deepcheck_core::errors::{CheckError, CheckErrorKind};
///
/// let err = CheckError::new(CheckErrorKind::InvalidInput).with_message("no such file");
/// log_op_error!("show", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let check_err: $crate::errors::CheckError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?check_err.kind(),
            err.code = check_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let check_err: $crate::errors::CheckError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?check_err.kind(),
            err.code = check_err.code(),
            $($field)*
        );
    }};
}
