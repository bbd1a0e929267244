#![deny(missing_docs)]
//! Shared logging utilities for the swagger-ring workspace.
//!
//! Every crate logs through the `ring_*` macros so that targets stay under the
//! `ring_` prefix the application's logger filters on.

#[doc(hidden)]
pub use log as __log;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! ring_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! ring_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! ring_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! ring_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! ring_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!($($arg)*);
    }};
}

/// Routes log output of the `ring_*` crates into the test harness.
///
/// Output goes through `simplelog::TestLogger`, so `cargo test` only shows it
/// for failing tests. Later calls are no-ops.
pub fn initialize_for_tests() {
    use simplelog::{ConfigBuilder, LevelFilter, TestLogger};

    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .add_filter_allow_str("ring_")
        .build();
    let _ = TestLogger::init(LevelFilter::Debug, config);
}
