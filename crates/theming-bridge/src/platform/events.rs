//! The platform event source.

use theming_bridge_core::Signal;

use super::Theme;

/// Signals carrying platform appearance events.
///
/// [`ThemeWatcher`](super::ThemeWatcher) emits on these when it sees a
/// change; hosts with their own OS hooks can emit on them directly. Each
/// signal is delivered on whichever thread emits it.
#[derive(Debug, Default)]
pub struct PlatformEvents {
    theme_changed: Signal<Theme>,
    high_contrast_changed: Signal<bool>,
    high_contrast_toggled: Signal<()>,
}

impl PlatformEvents {
    /// Create an event source with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitted when the system enters light or dark mode.
    pub fn theme_changed(&self) -> &Signal<Theme> {
        &self.theme_changed
    }

    /// Emitted with the new high contrast state.
    pub fn high_contrast_changed(&self) -> &Signal<bool> {
        &self.high_contrast_changed
    }

    /// Emitted by sources that only know high contrast was switched, not
    /// which way.
    pub fn high_contrast_toggled(&self) -> &Signal<()> {
        &self.high_contrast_toggled
    }

    /// Total number of subscribers across all three signals.
    pub fn subscriber_count(&self) -> usize {
        self.theme_changed.connection_count()
            + self.high_contrast_changed.connection_count()
            + self.high_contrast_toggled.connection_count()
    }
}
