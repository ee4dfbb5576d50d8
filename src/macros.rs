//! Logging macros for ergonomic call sites
//!
//! Each macro expands to the guarded check-then-build-then-emit unit: the
//! category's enablement is tested first, so the message is only
//! formatted when something will actually consume it.
//!
//! # Examples
//!
//! ```
//! use logtree::prelude::*;
//! use logtree::info;
//!
//! let registry = Registry::new();
//! let category = registry.category("server");
//!
//! // Basic logging
//! info!(category, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(category, "Listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use logtree::prelude::*;
/// # let registry = Registry::new();
/// # let category = registry.category("server");
/// use logtree::log;
/// log!(category, Level::INFO, "Simple message");
/// log!(category, Level(4), "Status code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($category:expr, $level:expr, $($arg:tt)+) => {
        if $category.is_enabled($level) {
            $category.log($level, format!($($arg)+));
        }
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::Level::TRACE, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::Level::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::Level::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::Level::WARN, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::Level::ERROR, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Level, Registry};

    #[test]
    fn test_log_macro() {
        let registry = Registry::new();
        let category = registry.category("macros");
        log!(category, Level::INFO, "Test message");
        log!(category, Level::INFO, "Formatted: {}", 42);
    }

    #[test]
    fn test_level_macros() {
        let registry = Registry::new();
        let category = registry.category("macros");
        category.set_level(Level::TRACE, false);
        trace!(category, "Trace message");
        debug!(category, "Count: {}", 5);
        info!(category, "Items: {}", 100);
        warn!(category, "Retry {} of {}", 1, 3);
        error!(category, "Code: {}", 500);
    }

    #[test]
    fn test_macro_skips_format_when_disabled() {
        let registry = Registry::new();
        let category = registry.category("macros");
        category.set_level(Level::OFF, false);

        let evaluated = std::cell::Cell::new(false);
        let expensive = || {
            evaluated.set(true);
            "costly"
        };
        log!(category, Level::INFO, "{}", expensive());
        // No sink is attached, so is_enabled is false and the argument
        // must never have been evaluated.
        assert!(!evaluated.get());
    }
}
