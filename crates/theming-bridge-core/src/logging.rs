//! Logging facilities for theming-bridge.
//!
//! theming-bridge uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in your
//! application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("theming_bridge=debug")
//!     .init();
//! ```

/// Span names used throughout theming-bridge for tracing.
pub mod span_names {
    /// One platform polling pass.
    pub const WATCH_PASS: &str = "theming_bridge::watch_pass";
    /// Outbound notification span.
    pub const NOTIFY: &str = "theming_bridge::notify";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "theming_bridge_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "theming_bridge_core::signal";
    /// Theme state relay target.
    pub const RELAY: &str = "theming_bridge::relay";
    /// Platform watcher target.
    pub const WATCHER: &str = "theming_bridge::watcher";
    /// Module metadata surface target.
    pub const MODULE: &str = "theming_bridge::module";
    /// Remote endpoint target.
    pub const BRIDGE: &str = "theming_bridge::bridge";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time a single watcher pass or outbound notification.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new span named after the operation.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "theming_bridge::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::RELAY, targets::WATCHER, targets::MODULE, targets::BRIDGE] {
            assert!(target.starts_with("theming_bridge::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new(span_names::NOTIFY);
    }
}
