//! The remote call boundary.
//!
//! The application runtime is reached through a [`RemoteEndpoint`], which
//! invokes a named remote function with an ordered list of JSON arguments.
//! Outbound notifications stay typed ([`RelayEvent`]) until
//! [`RelayEvent::into_args`] converts them at this boundary.
//!
//! The relay never owns its endpoint. It holds an [`EndpointHandle`] and
//! upgrades it right before each call, so a runtime that has shut down is
//! simply skipped.

use std::fmt;
use std::sync::{Arc, Weak};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use serde::Serialize;
use serde_json::Value;
use theming_bridge_core::logging::targets;

use crate::error::{BridgeError, Result};
use crate::platform::Theme;

/// Event name sent when the theme changes.
pub const THEME_DID_CHANGE: &str = "themeDidChange";

/// Event name sent when high contrast changes.
pub const HIGH_CONTRAST_DID_CHANGE: &str = "highContrastDidChange";

/// A remote runtime that accepts named function calls.
pub trait RemoteEndpoint: Send + Sync {
    /// Invoke `module.method` with `args`.
    ///
    /// Implementations may fail when the runtime is shutting down or
    /// rejects the call; callers treat any error as a dropped call.
    fn call_function(&self, module: &str, method: &str, args: Vec<Value>) -> Result<()>;
}

// ============================================================================
// Endpoint Handle
// ============================================================================

/// A non-owning, possibly expired reference to a [`RemoteEndpoint`].
#[derive(Clone, Default)]
pub struct EndpointHandle {
    inner: Option<Weak<dyn RemoteEndpoint>>,
}

impl EndpointHandle {
    /// A handle that never resolves.
    pub fn none() -> Self {
        Self::default()
    }

    /// Track `endpoint` without extending its lifetime.
    pub fn new<E: RemoteEndpoint + 'static>(endpoint: &Arc<E>) -> Self {
        let weak: Weak<E> = Arc::downgrade(endpoint);
        let weak: Weak<dyn RemoteEndpoint> = weak;
        Self { inner: Some(weak) }
    }

    /// Track an already type-erased endpoint.
    pub fn from_dyn(endpoint: &Arc<dyn RemoteEndpoint>) -> Self {
        Self {
            inner: Some(Arc::downgrade(endpoint)),
        }
    }

    /// Get the endpoint if it is still alive.
    pub fn try_get(&self) -> Option<Arc<dyn RemoteEndpoint>> {
        self.inner.as_ref()?.upgrade()
    }

    /// Returns true if the endpoint is still alive.
    pub fn is_live(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }
}

impl fmt::Debug for EndpointHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointHandle")
            .field("live", &self.is_live())
            .finish()
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Payload of a `themeDidChange` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeChangedPayload {
    /// The new theme.
    pub theme: Theme,
}

/// Payload of a `highContrastDidChange` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighContrastChangedPayload {
    /// Whether high contrast is now enabled.
    pub high_contrast: bool,
}

/// An outbound notification to the application runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayEvent {
    /// The theme changed.
    ThemeChanged(ThemeChangedPayload),
    /// High contrast changed.
    HighContrastChanged(HighContrastChangedPayload),
}

impl RelayEvent {
    /// Create a theme change event.
    pub fn theme_changed(theme: Theme) -> Self {
        Self::ThemeChanged(ThemeChangedPayload { theme })
    }

    /// Create a high contrast change event.
    pub fn high_contrast_changed(high_contrast: bool) -> Self {
        Self::HighContrastChanged(HighContrastChangedPayload { high_contrast })
    }

    /// The event name seen by the runtime.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ThemeChanged(_) => THEME_DID_CHANGE,
            Self::HighContrastChanged(_) => HIGH_CONTRAST_DID_CHANGE,
        }
    }

    /// The payload in wire form.
    pub fn payload(&self) -> Result<Value> {
        let value = match self {
            Self::ThemeChanged(payload) => serde_json::to_value(payload)?,
            Self::HighContrastChanged(payload) => serde_json::to_value(payload)?,
        };
        Ok(value)
    }

    /// The argument list for the emitter call: `[name, payload]`.
    pub fn into_args(self) -> Result<Vec<Value>> {
        Ok(vec![Value::from(self.name()), self.payload()?])
    }
}

// ============================================================================
// Channel Endpoint
// ============================================================================

/// A call received by a [`ChannelEndpoint`].
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCall {
    /// Remote module name.
    pub module: String,
    /// Remote method name.
    pub method: String,
    /// Ordered arguments.
    pub args: Vec<Value>,
}

impl RemoteCall {
    /// The event name, when this is an emitter call.
    pub fn event_name(&self) -> Option<&str> {
        self.args.first()?.as_str()
    }

    /// The event payload, when this is an emitter call.
    pub fn payload(&self) -> Option<&Value> {
        self.args.get(1)
    }
}

/// An endpoint that forwards every call over a channel.
///
/// The runtime side drains the [`Receiver`] on its own thread. Once the
/// receiver is dropped, calls fail with [`BridgeError::Disconnected`].
#[derive(Debug)]
pub struct ChannelEndpoint {
    sender: Sender<RemoteCall>,
}

impl ChannelEndpoint {
    /// Create an endpoint with an unbounded queue.
    pub fn new() -> (Arc<Self>, Receiver<RemoteCall>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Arc::new(Self { sender }), receiver)
    }

    /// Create an endpoint whose queue holds at most `capacity` calls.
    ///
    /// Calls made while the queue is full fail instead of blocking the
    /// event source.
    pub fn bounded(capacity: usize) -> (Arc<Self>, Receiver<RemoteCall>) {
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        (Arc::new(Self { sender }), receiver)
    }
}

impl RemoteEndpoint for ChannelEndpoint {
    fn call_function(&self, module: &str, method: &str, args: Vec<Value>) -> Result<()> {
        let call = RemoteCall {
            module: module.to_string(),
            method: method.to_string(),
            args,
        };
        match self.sender.try_send(call) {
            Ok(()) => Ok(()),
            Err(TrySendError::Disconnected(_)) => Err(BridgeError::Disconnected),
            Err(TrySendError::Full(_)) => {
                tracing::trace!(target: targets::BRIDGE, module, method, "endpoint queue full");
                Err(BridgeError::call_failed(module, method, "queue full"))
            }
        }
    }
}
