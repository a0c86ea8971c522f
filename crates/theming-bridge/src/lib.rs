//! Theming Bridge
//!
//! Keeps the host OS's theme (light or dark) and high contrast state in a
//! thread-safe cache and relays every change to an embedded application
//! runtime as a named event.
//!
//! # Components
//!
//! - [`platform`]: appearance detection, the [`PlatformEvents`] source and
//!   the polling [`ThemeWatcher`]
//! - [`relay`]: [`ThemeStateRelay`], the cache and notifier
//! - [`bridge`]: the [`RemoteEndpoint`] boundary and outbound payloads
//! - [`module`]: [`ThemingModule`], the polling surface for the runtime
//! - [`config`]: TOML-loadable settings
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use theming_bridge::{ChannelEndpoint, EndpointHandle, PlatformEvents, Theme, ThemeStateRelay};
//!
//! let events = PlatformEvents::new();
//! let (endpoint, calls) = ChannelEndpoint::new();
//! let relay = Arc::new(ThemeStateRelay::new(&events, EndpointHandle::new(&endpoint)));
//!
//! events.high_contrast_changed().emit(true);
//! assert!(relay.high_contrast());
//!
//! let call = calls.try_recv().unwrap();
//! assert_eq!(call.module, "RCTDeviceEventEmitter");
//! assert_eq!(call.event_name(), Some("highContrastDidChange"));
//! ```

pub mod bridge;
pub mod config;
mod error;
pub mod module;
pub mod platform;
pub mod relay;

pub use bridge::{ChannelEndpoint, EndpointHandle, RelayEvent, RemoteCall, RemoteEndpoint};
pub use config::{BridgeConfig, RelayConfig, WatcherConfig};
pub use error::{BridgeError, ConfigError, ModuleError, Result, SystemThemeError};
pub use module::ThemingModule;
pub use platform::{ColorScheme, PlatformEvents, Theme, ThemeWatcher};
pub use relay::{ThemeSnapshot, ThemeStateRelay};

pub use theming_bridge_core::{ConnectionGuard, Signal};
