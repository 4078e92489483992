//! Field-scoped logging helpers.
//!
//! Every field log line carries the field's canonical `path` so lines from one
//! field can be grouped regardless of which layer emitted them.

/// Log an event about one field.
///
/// # Example
///
/// ```rust,ignore
/// log_field_event!(debug, field.identifier(), "Display changed", display = %next);
/// ```
#[macro_export]
macro_rules! log_field_event {
    ($level:ident, $path:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            path = %$path,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an event about the form container as a whole.
#[macro_export]
macro_rules! log_form_event {
    ($level:ident, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            scope = "form",
            $($($field)*,)?
            $msg
        )
    };
}
