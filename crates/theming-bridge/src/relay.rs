//! The theme state relay.
//!
//! [`ThemeStateRelay`] is the process-wide source of truth for the current
//! theme and high contrast state. It caches what the platform last reported,
//! answers synchronous reads from any thread, and pushes each change to the
//! application runtime when one is reachable.
//!
//! ```
//! use theming_bridge::bridge::{ChannelEndpoint, EndpointHandle};
//! use theming_bridge::platform::{PlatformEvents, Theme};
//! use theming_bridge::relay::ThemeStateRelay;
//!
//! let events = PlatformEvents::new();
//! let (endpoint, calls) = ChannelEndpoint::new();
//! let relay = ThemeStateRelay::new(&events, EndpointHandle::new(&endpoint));
//!
//! events.theme_changed().emit(Theme::Dark);
//!
//! assert_eq!(relay.theme(), Theme::Dark);
//! assert_eq!(calls.try_recv().unwrap().event_name(), Some("themeDidChange"));
//! ```

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use theming_bridge_core::logging::{span_names, targets};
use theming_bridge_core::{ConnectionGuard, PerfSpan, Property};

use crate::bridge::{EndpointHandle, RelayEvent};
use crate::config::RelayConfig;
use crate::platform::{PlatformEvents, Theme};

/// Both cached values, read together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSnapshot {
    /// The cached theme.
    pub theme: Theme,
    /// The cached high contrast state.
    pub high_contrast: bool,
}

/// State shared between the relay handle and its signal slots.
struct RelayState {
    theme: Property<Theme>,
    high_contrast: Property<bool>,
    endpoint: RwLock<EndpointHandle>,
    /// Held for reading by every slot invocation; `detach` takes it for
    /// writing, so no slot is mid-flight once it returns.
    attached: RwLock<bool>,
    config: RelayConfig,
}

impl RelayState {
    fn on_theme_changed(&self, theme: Theme) {
        self.theme.set_silent(theme);
        tracing::trace!(target: targets::RELAY, %theme, "cached theme");
        self.notify(RelayEvent::theme_changed(theme));
    }

    fn on_high_contrast_changed(&self, enabled: bool) {
        self.high_contrast.set_silent(enabled);
        tracing::trace!(target: targets::RELAY, enabled, "cached high contrast");
        self.notify(RelayEvent::high_contrast_changed(enabled));
    }

    fn on_high_contrast_toggled(&self) {
        let enabled = self.high_contrast.update(|value| {
            *value = !*value;
            *value
        });
        tracing::trace!(target: targets::RELAY, enabled, "toggled high contrast");
        self.notify(RelayEvent::high_contrast_changed(enabled));
    }

    /// Send `event` if the endpoint is alive. At most once, never retried.
    fn notify(&self, event: RelayEvent) {
        let name = event.name();
        let Some(endpoint) = self.endpoint.read().try_get() else {
            tracing::debug!(target: targets::RELAY, event = name, "remote endpoint gone, notification dropped");
            return;
        };

        let _span = PerfSpan::new(span_names::NOTIFY);
        let args = match event.into_args() {
            Ok(args) => args,
            Err(err) => {
                tracing::warn!(target: targets::RELAY, event = name, %err, "failed to encode notification");
                return;
            }
        };

        match endpoint.call_function(&self.config.emitter_module, &self.config.emitter_method, args) {
            Ok(()) => tracing::debug!(target: targets::RELAY, event = name, "notification sent"),
            Err(err) => {
                tracing::debug!(target: targets::RELAY, event = name, %err, "remote call failed, notification dropped")
            }
        }
    }
}

/// Subscriptions held on the platform event source.
struct Subscriptions {
    _theme: ConnectionGuard<Theme>,
    _high_contrast: ConnectionGuard<bool>,
    _high_contrast_toggled: ConnectionGuard<()>,
}

impl Subscriptions {
    fn connect(events: &PlatformEvents, state: &Arc<RelayState>) -> Self {
        Self {
            _theme: events
                .theme_changed()
                .connect_scoped(slot::<Theme, _>(state, |state, &theme| {
                    state.on_theme_changed(theme)
                })),
            _high_contrast: events
                .high_contrast_changed()
                .connect_scoped(slot::<bool, _>(state, |state, &enabled| {
                    state.on_high_contrast_changed(enabled)
                })),
            _high_contrast_toggled: events
                .high_contrast_toggled()
                .connect_scoped(slot::<(), _>(state, |state, _| state.on_high_contrast_toggled())),
        }
    }
}

/// Wrap a handler so it only runs while the relay is alive and attached.
fn slot<Args, F>(state: &Arc<RelayState>, handler: F) -> impl Fn(&Args) + Send + Sync + 'static
where
    Args: 'static,
    F: Fn(&RelayState, &Args) + Send + Sync + 'static,
{
    let state: Weak<RelayState> = Arc::downgrade(state);
    move |args| {
        if let Some(state) = state.upgrade() {
            let attached = state.attached.read_recursive();
            if *attached {
                handler(&*state, args);
            }
        }
    }
}

/// Caches theme and high contrast state and relays changes to the runtime.
///
/// The relay starts at [`Theme::Light`] with high contrast off. Every handler
/// call updates the cache and, if the endpoint is alive at that moment, sends
/// exactly one notification. Repeated identical values are sent again.
///
/// Subscriptions made at construction are released by [`detach`](Self::detach)
/// or when the relay is dropped.
pub struct ThemeStateRelay {
    state: Arc<RelayState>,
    subscriptions: Mutex<Option<Subscriptions>>,
}

impl ThemeStateRelay {
    /// Create a relay subscribed to `events`, notifying `endpoint`.
    pub fn new(events: &PlatformEvents, endpoint: EndpointHandle) -> Self {
        Self::with_config(events, endpoint, RelayConfig::default())
    }

    /// Create a subscribed relay with a custom emitter entry point.
    pub fn with_config(events: &PlatformEvents, endpoint: EndpointHandle, config: RelayConfig) -> Self {
        let relay = Self::detached(endpoint, config);
        *relay.state.attached.write() = true;
        *relay.subscriptions.lock() = Some(Subscriptions::connect(events, &relay.state));
        tracing::debug!(target: targets::RELAY, "theme relay attached to platform events");
        relay
    }

    /// Create a relay with no event subscription.
    ///
    /// Handlers can still be called directly.
    pub fn detached(endpoint: EndpointHandle, config: RelayConfig) -> Self {
        Self {
            state: Arc::new(RelayState {
                theme: Property::new(Theme::default()),
                high_contrast: Property::new(false),
                endpoint: RwLock::new(endpoint),
                attached: RwLock::new(false),
                config,
            }),
            subscriptions: Mutex::new(None),
        }
    }

    /// The cached theme.
    pub fn theme(&self) -> Theme {
        self.state.theme.get()
    }

    /// The cached high contrast state.
    pub fn high_contrast(&self) -> bool {
        self.state.high_contrast.get()
    }

    /// Both cached values.
    ///
    /// The two reads are not atomic with respect to each other.
    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            theme: self.theme(),
            high_contrast: self.high_contrast(),
        }
    }

    /// Cache `theme` and notify the runtime.
    pub fn on_theme_changed(&self, theme: Theme) {
        self.state.on_theme_changed(theme);
    }

    /// Cache an explicit high contrast state and notify the runtime.
    pub fn on_high_contrast_changed(&self, enabled: bool) {
        self.state.on_high_contrast_changed(enabled);
    }

    /// Flip the cached high contrast state and notify the runtime.
    ///
    /// For event sources that only report that high contrast was switched.
    /// Prefer [`on_high_contrast_changed`](Self::on_high_contrast_changed)
    /// whenever the new state is known: a missed toggle leaves the cache
    /// inverted until the next one.
    ///
    /// Toggles are expected to arrive one at a time, as platform events do.
    /// The flip itself is atomic, but the notification is sent after the
    /// lock is released, so concurrent toggles may notify out of order.
    pub fn on_high_contrast_toggled(&self) {
        self.state.on_high_contrast_toggled();
    }

    /// Point the relay at a different endpoint.
    pub fn set_endpoint(&self, endpoint: EndpointHandle) {
        *self.state.endpoint.write() = endpoint;
    }

    /// Returns true if the current endpoint is alive.
    pub fn has_live_endpoint(&self) -> bool {
        self.state.endpoint.read().is_live()
    }

    /// Release the platform event subscriptions.
    ///
    /// Blocks until any handler already running on another thread has
    /// finished. Once this returns, events no longer reach the cache or the
    /// endpoint. Must not be called from inside the relay's own endpoint
    /// call, which would wait on itself.
    pub fn detach(&self) {
        *self.state.attached.write() = false;
        if self.subscriptions.lock().take().is_some() {
            tracing::debug!(target: targets::RELAY, "theme relay detached from platform events");
        }
    }

    /// Returns true while subscribed to platform events.
    pub fn is_attached(&self) -> bool {
        *self.state.attached.read()
    }

    /// The emitter configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.state.config
    }
}

impl Drop for ThemeStateRelay {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for ThemeStateRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStateRelay")
            .field("theme", &self.theme())
            .field("high_contrast", &self.high_contrast())
            .field("attached", &self.is_attached())
            .field("endpoint", &*self.state.endpoint.read())
            .finish()
    }
}

static_assertions::assert_impl_all!(ThemeStateRelay: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{ChannelEndpoint, RemoteCall};
    use crossbeam_channel::Receiver;
    use serde_json::json;

    fn drain(calls: &Receiver<RemoteCall>) -> Vec<RemoteCall> {
        calls.try_iter().collect()
    }

    #[test]
    fn test_defaults() {
        let relay = ThemeStateRelay::detached(EndpointHandle::none(), RelayConfig::default());
        assert_eq!(relay.theme(), Theme::Light);
        assert!(!relay.high_contrast());
        assert!(!relay.is_attached());
        assert_eq!(relay.snapshot(), ThemeSnapshot::default());
    }

    #[test]
    fn test_explicit_high_contrast_value() {
        let (endpoint, calls) = ChannelEndpoint::new();
        let relay = ThemeStateRelay::detached(EndpointHandle::new(&endpoint), RelayConfig::default());

        relay.on_high_contrast_changed(true);
        relay.on_high_contrast_changed(true);
        assert!(relay.high_contrast());

        let calls = drain(&calls);
        assert_eq!(calls.len(), 2);
        assert!(calls
            .iter()
            .all(|call| call.payload() == Some(&json!({ "highContrast": true }))));
    }

    #[test]
    fn test_custom_emitter() {
        let (endpoint, calls) = ChannelEndpoint::new();
        let relay = ThemeStateRelay::detached(
            EndpointHandle::new(&endpoint),
            RelayConfig::with_emitter("AppearanceEvents", "dispatch"),
        );

        relay.on_theme_changed(Theme::Dark);

        let call = calls.try_recv().unwrap();
        assert_eq!(call.module, "AppearanceEvents");
        assert_eq!(call.method, "dispatch");
    }

    #[test]
    fn test_failed_call_is_swallowed() {
        let (endpoint, calls) = ChannelEndpoint::new();
        drop(calls);
        let relay = ThemeStateRelay::detached(EndpointHandle::new(&endpoint), RelayConfig::default());

        relay.on_theme_changed(Theme::Dark);
        assert_eq!(relay.theme(), Theme::Dark);
    }

    #[test]
    fn test_endpoint_can_be_replaced() {
        let relay = ThemeStateRelay::detached(EndpointHandle::none(), RelayConfig::default());
        relay.on_theme_changed(Theme::Dark);
        assert!(!relay.has_live_endpoint());

        let (endpoint, calls) = ChannelEndpoint::new();
        relay.set_endpoint(EndpointHandle::new(&endpoint));
        relay.on_high_contrast_toggled();

        let calls = drain(&calls);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].event_name(), Some("highContrastDidChange"));
        assert_eq!(relay.theme(), Theme::Dark);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let snapshot = ThemeSnapshot {
            theme: Theme::Dark,
            high_contrast: true,
        };
        assert_eq!(
            serde_json::to_value(snapshot).unwrap(),
            json!({ "theme": "dark", "highContrast": true })
        );
    }
}
