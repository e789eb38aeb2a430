//! crates/logging/src/macros.rs
//! Formatting macros over [`Logger::log`](crate::Logger::log).
//!
//! The message arguments are captured with `format_args!`, so nothing is
//! rendered unless the logger is enabled for the requested level.

/// Logs through `logger` at an arbitrary severity, standard or custom.
///
/// # Example
/// ```
/// use logging::{Registry, Severity, log_at};
///
/// let logger = Registry::new().logger("net.peer");
/// log_at!(logger, Severity::new(19), "handshake with {} took {}ms", "10.0.0.7", 42);
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+))
    };
}

/// Logs through `logger` at [`Severity::CRITICAL`](crate::Severity::CRITICAL).
///
/// # Example
/// ```ignore
/// critical!(logger, "cannot open {}", path);
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::CRITICAL, $($arg)+)
    };
}

/// Logs through `logger` at [`Severity::ERROR`](crate::Severity::ERROR).
///
/// # Example
/// ```ignore
/// error!(logger, "request {} failed: {}", id, err);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::ERROR, $($arg)+)
    };
}

/// Logs through `logger` at [`Severity::WARNING`](crate::Severity::WARNING).
///
/// # Example
/// ```ignore
/// warning!(logger, "retrying in {}s", delay);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::WARNING, $($arg)+)
    };
}

/// Logs through `logger` at [`Severity::INFO`](crate::Severity::INFO).
///
/// # Example
/// ```ignore
/// info!(logger, "listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::INFO, $($arg)+)
    };
}

/// Logs through `logger` at [`Severity::DEBUG`](crate::Severity::DEBUG).
///
/// # Example
/// ```ignore
/// debug!(logger, "cache hit for {}", key);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Severity::DEBUG, $($arg)+)
    };
}
