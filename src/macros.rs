//! Recording macros with compile-time origin capture.
//!
//! These macros fill in the calling file, function and line, and format the
//! message like `format!`. Nothing is formatted or captured when the logger
//! is disabled.
//!
//! # Examples
//!
//! ```
//! use batch_logger::prelude::*;
//! use batch_logger::{record, record_to};
//! use std::sync::Arc;
//!
//! let logger = Logger::disabled();
//!
//! record!(logger, "Server started");
//!
//! let port = 8080;
//! record!(logger, "Server listening on port {}", port);
//!
//! record_to!(logger, "audit", "User {} signed in", 42);
//!
//! let fields = Arc::new(CsvFields::new().with_field("GET").with_field(200));
//! record_to!(logger, "http", ext = fields; "Request served in {}ms", 12);
//! ```

/// Capture the current source location as an [`Origin`](crate::core::Origin).
///
/// The function part is the path of the enclosing function, with closure
/// segments removed.
///
/// ```
/// use batch_logger::origin;
///
/// fn handler() -> batch_logger::core::Origin {
///     origin!()
/// }
///
/// let origin = handler();
/// assert!(origin.function.ends_with("handler"));
/// assert!(origin.line > 0);
/// ```
#[macro_export]
macro_rules! origin {
    () => {
        $crate::core::Origin::new(file!(), $crate::__function_name!(), line!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::macros::trim_function_name(type_name_of(f))
    }};
}

#[doc(hidden)]
pub fn trim_function_name(name: &'static str) -> &'static str {
    let mut name = name.strip_suffix("::f").unwrap_or(name);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

/// Record a formatted message into the default log.
///
/// An extension can be attached with `ext = <Arc<impl LogExtension>>;`
/// before the format arguments.
///
/// ```
/// # use batch_logger::prelude::*;
/// # let logger = Logger::disabled();
/// use batch_logger::record;
/// record!(logger, "Simple message");
/// record!(logger, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! record {
    ($logger:expr, ext = $ext:expr; $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_enabled() {
            let extension: ::std::sync::Arc<dyn $crate::core::LogExtension> = $ext;
            logger.record(format!($($arg)+), Some(extension), $crate::origin!());
        }
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_enabled() {
            logger.record(format!($($arg)+), None, $crate::origin!());
        }
    }};
}

/// Record a formatted message into a named log.
///
/// ```
/// # use batch_logger::prelude::*;
/// # let logger = Logger::disabled();
/// use batch_logger::record_to;
/// record_to!(logger, "audit", "Password changed for user {}", 7);
/// ```
#[macro_export]
macro_rules! record_to {
    ($logger:expr, $log_name:expr, ext = $ext:expr; $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_enabled() {
            let extension: ::std::sync::Arc<dyn $crate::core::LogExtension> = $ext;
            logger.record_to($log_name, format!($($arg)+), Some(extension), $crate::origin!());
        }
    }};
    ($logger:expr, $log_name:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_enabled() {
            logger.record_to($log_name, format!($($arg)+), None, $crate::origin!());
        }
    }};
}
