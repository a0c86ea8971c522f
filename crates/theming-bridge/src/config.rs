//! Configuration for the relay and the platform watcher.
//!
//! Both sections have working defaults; a host only needs to supply the
//! values it wants to change.
//!
//! ```
//! use theming_bridge::config::BridgeConfig;
//!
//! let config = BridgeConfig::from_toml_str(r#"
//!     [watcher]
//!     poll_interval_ms = 250
//! "#).unwrap();
//!
//! assert_eq!(config.watcher.poll_interval_ms, 250);
//! assert_eq!(config.relay.emitter_module, "RCTDeviceEventEmitter");
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default remote module that receives change events.
pub const DEFAULT_EMITTER_MODULE: &str = "RCTDeviceEventEmitter";

/// Default remote method that receives change events.
pub const DEFAULT_EMITTER_METHOD: &str = "emit";

/// Default polling interval for the platform watcher.
const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Where the relay sends its change notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    /// Remote module name passed to the endpoint.
    pub emitter_module: String,
    /// Remote method name passed to the endpoint.
    pub emitter_method: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            emitter_module: DEFAULT_EMITTER_MODULE.to_string(),
            emitter_method: DEFAULT_EMITTER_METHOD.to_string(),
        }
    }
}

impl RelayConfig {
    /// Create a configuration targeting a custom emitter entry point.
    pub fn with_emitter(module: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            emitter_module: module.into(),
            emitter_method: method.into(),
        }
    }

    /// Check that both names are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.emitter_module.trim().is_empty() {
            return Err(ConfigError::invalid("emitter_module", "must not be empty"));
        }
        if self.emitter_method.trim().is_empty() {
            return Err(ConfigError::invalid("emitter_method", "must not be empty"));
        }
        Ok(())
    }
}

/// How the platform watcher polls for appearance changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatcherConfig {
    /// Time between two polling passes, in milliseconds.
    pub poll_interval_ms: u64,
    /// Name for the watcher thread.
    pub thread_name: String,
    /// Report the platform state on the first pass when it differs from the
    /// relay defaults (light, no high contrast). When `false`, the first
    /// reading is taken as the baseline and only later changes are reported.
    pub emit_initial: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            thread_name: "theming-watcher".to_string(),
            emit_initial: true,
        }
    }
}

impl WatcherConfig {
    /// The polling interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check that the interval and thread name are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::invalid("poll_interval_ms", "must be greater than zero"));
        }
        if self.thread_name.is_empty() {
            return Err(ConfigError::invalid("thread_name", "must not be empty"));
        }
        Ok(())
    }
}

/// Complete bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Relay section.
    pub relay: RelayConfig,
    /// Watcher section.
    pub watcher: WatcherConfig,
}

impl BridgeConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate both sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.relay.validate()?;
        self.watcher.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = BridgeConfig::from_toml_str("").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.watcher.poll_interval(), Duration::from_millis(500));
        assert!(config.watcher.emit_initial);
    }

    #[test]
    fn test_partial_relay_section() {
        let config = BridgeConfig::from_toml_str(
            r#"
            [relay]
            emitter_module = "AppearanceEvents"
            "#,
        )
        .unwrap();

        assert_eq!(config.relay.emitter_module, "AppearanceEvents");
        assert_eq!(config.relay.emitter_method, DEFAULT_EMITTER_METHOD);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = BridgeConfig::from_toml_str("[watcher]\npoll_interval_ms = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "poll_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_blank_emitter_rejected() {
        let config = RelayConfig::with_emitter("  ", "emit");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = BridgeConfig::from_toml_str("[watcher]\ninterval = 10\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
