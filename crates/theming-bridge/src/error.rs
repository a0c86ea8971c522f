//! Error types for the theming bridge.

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors reported by a [`RemoteEndpoint`](crate::bridge::RemoteEndpoint).
///
/// The relay never surfaces these to its callers: a failed notification is
/// logged and dropped.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The remote runtime is no longer accepting calls.
    #[error("Remote endpoint disconnected")]
    Disconnected,

    /// The remote runtime rejected the call.
    #[error("Remote call {module}.{method} failed: {message}")]
    CallFailed {
        module: String,
        method: String,
        message: String,
    },

    /// A payload could not be converted to its wire form.
    #[error("Failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Create a call failure error.
    pub fn call_failed(
        module: impl Into<String>,
        method: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::CallFailed {
            module: module.into(),
            method: method.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by [`ThemingModule`](crate::module::ThemingModule).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    /// The requested method is not exported by the module.
    #[error("Unknown method '{method}' on module '{module}'")]
    UnknownMethod { module: &'static str, method: String },
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value the bridge cannot use.
    #[error("Invalid value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Errors from system appearance detection and the theme watcher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SystemThemeError {
    /// Failed to set up or run the theme watcher.
    #[error("theme watcher error: {0}")]
    Watcher(String),

    /// Operation not supported on this platform or build.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

impl SystemThemeError {
    pub(crate) fn watcher(message: impl Into<String>) -> Self {
        Self::Watcher(message.into())
    }

    pub(crate) fn unsupported_platform(message: impl Into<String>) -> Self {
        Self::UnsupportedPlatform(message.into())
    }

    /// Returns true if this error indicates the operation is not supported.
    pub fn is_unsupported_platform(&self) -> bool {
        matches!(self, Self::UnsupportedPlatform(_))
    }
}
