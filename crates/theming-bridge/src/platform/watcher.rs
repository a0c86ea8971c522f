//! Theme change watcher.
//!
//! Polls the platform for appearance changes on a background thread and
//! reports them through [`PlatformEvents`].
//!
//! ```ignore
//! use theming_bridge::platform::ThemeWatcher;
//!
//! let watcher = ThemeWatcher::new()?;
//!
//! let _guard = watcher.events().theme_changed().connect_scoped(|theme| {
//!     println!("Theme changed to: {}", theme);
//! });
//!
//! watcher.start()?;
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use theming_bridge_core::logging::{span_names, targets};
use theming_bridge_core::PerfSpan;

use super::{ColorScheme, HighContrast, PlatformEvents, SystemTheme, SystemThemeError, Theme};
use crate::config::WatcherConfig;

/// Source of appearance readings for the watcher.
///
/// The default [`SystemProbe`] asks the OS. Hosts with their own detection,
/// and tests, supply another.
pub trait AppearanceProbe: Send + Sync + 'static {
    /// The current color scheme.
    fn color_scheme(&self) -> ColorScheme;

    /// Whether high contrast is currently enabled.
    fn high_contrast(&self) -> bool;
}

/// Reads appearance from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl AppearanceProbe for SystemProbe {
    fn color_scheme(&self) -> ColorScheme {
        SystemTheme::color_scheme()
    }

    fn high_contrast(&self) -> bool {
        HighContrast::is_enabled()
    }
}

/// Last values reported by the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reading {
    theme: Theme,
    high_contrast: bool,
}

/// Result of a single polling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchPass {
    /// The theme that was reported, if it changed.
    pub theme: Option<Theme>,
    /// The high contrast state that was reported, if it changed.
    pub high_contrast: Option<bool>,
}

impl WatchPass {
    /// Returns true if this pass emitted anything.
    pub fn changed(&self) -> bool {
        self.theme.is_some() || self.high_contrast.is_some()
    }
}

/// Internal state shared between the watcher handle and its thread.
struct ThemeWatcherInner {
    events: PlatformEvents,
    probe: Box<dyn AppearanceProbe>,
    last: Mutex<Reading>,
    running: AtomicBool,
    config: WatcherConfig,
}

impl ThemeWatcherInner {
    fn poll(&self) -> WatchPass {
        let _span = PerfSpan::new(span_names::WATCH_PASS);
        let scheme = self.probe.color_scheme();
        let high_contrast = self.probe.high_contrast();

        let pass = {
            let mut last = self.last.lock();
            let theme = scheme.theme().filter(|theme| *theme != last.theme);
            if let Some(theme) = theme {
                last.theme = theme;
            }
            let high_contrast = (high_contrast != last.high_contrast).then_some(high_contrast);
            if let Some(enabled) = high_contrast {
                last.high_contrast = enabled;
            }
            WatchPass { theme, high_contrast }
        };

        if let Some(theme) = pass.theme {
            tracing::debug!(target: targets::WATCHER, %theme, "system theme changed");
            self.events.theme_changed().emit(theme);
        }
        if let Some(enabled) = pass.high_contrast {
            tracing::debug!(target: targets::WATCHER, enabled, "high contrast changed");
            self.events.high_contrast_changed().emit(enabled);
        }
        pass
    }

    fn run(&self, stop: crossbeam_channel::Receiver<()>) {
        let interval = self.config.poll_interval();
        loop {
            match stop.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    self.poll();
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }
}

/// Watches for system theme changes.
///
/// Each polling pass compares the probe's reading with the last reported
/// state and emits only what changed. `Unknown` color schemes are ignored.
/// Dropping the watcher stops its thread.
pub struct ThemeWatcher {
    inner: Arc<ThemeWatcherInner>,
    stop: Mutex<Option<Sender<()>>>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl ThemeWatcher {
    /// Create a watcher that reads from the operating system.
    ///
    /// Fails with an unsupported-platform error when color scheme detection
    /// is not compiled in.
    pub fn new() -> Result<Self, SystemThemeError> {
        Self::builder().build()
    }

    /// Create a builder for a custom watcher.
    pub fn builder() -> ThemeWatcherBuilder {
        ThemeWatcherBuilder::new()
    }

    /// Create a watcher reading from `probe`.
    pub fn with_probe<P: AppearanceProbe>(probe: P, config: WatcherConfig) -> Self {
        Self::from_boxed(Box::new(probe), config)
    }

    fn from_boxed(probe: Box<dyn AppearanceProbe>, config: WatcherConfig) -> Self {
        let last = if config.emit_initial {
            Reading {
                theme: Theme::default(),
                high_contrast: false,
            }
        } else {
            Reading {
                theme: probe.color_scheme().theme().unwrap_or_default(),
                high_contrast: probe.high_contrast(),
            }
        };

        Self {
            inner: Arc::new(ThemeWatcherInner {
                events: PlatformEvents::new(),
                probe,
                last: Mutex::new(last),
                running: AtomicBool::new(false),
                config,
            }),
            stop: Mutex::new(None),
            thread: Mutex::new(None),
        }
    }

    /// The signals this watcher emits on.
    pub fn events(&self) -> &PlatformEvents {
        &self.inner.events
    }

    /// The configuration this watcher was built with.
    pub fn config(&self) -> &WatcherConfig {
        &self.inner.config
    }

    /// Run one polling pass on the calling thread.
    ///
    /// Signals are emitted synchronously before this returns.
    pub fn check_now(&self) -> WatchPass {
        self.inner.poll()
    }

    /// Start the polling thread.
    ///
    /// Starting an already running watcher does nothing.
    pub fn start(&self) -> Result<(), SystemThemeError> {
        let mut stop = self.stop.lock();
        if stop.is_some() {
            return Ok(());
        }
        // A previous thread may still be finishing after `stop()`.
        self.join();

        let (stop_tx, stop_rx) = bounded(1);
        let inner = Arc::clone(&self.inner);
        self.inner.running.store(true, Ordering::SeqCst);
        let spawned = thread::Builder::new()
            .name(self.inner.config.thread_name.clone())
            .spawn(move || {
                tracing::debug!(target: targets::WATCHER, "theme watcher started");
                inner.run(stop_rx);
                inner.running.store(false, Ordering::SeqCst);
                tracing::debug!(target: targets::WATCHER, "theme watcher stopped");
            });

        match spawned {
            Ok(handle) => {
                *stop = Some(stop_tx);
                *self.thread.lock() = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.inner.running.store(false, Ordering::SeqCst);
                tracing::warn!(target: targets::WATCHER, %err, "failed to spawn theme watcher thread");
                Err(SystemThemeError::watcher(format!("failed to spawn thread: {err}")))
            }
        }
    }

    /// Ask the polling thread to stop.
    ///
    /// Returns immediately; the thread exits before its next pass.
    pub fn stop(&self) {
        if let Some(stop) = self.stop.lock().take() {
            let _ = stop.try_send(());
        }
    }

    /// Check if the polling thread is currently running.
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    fn join(&self) {
        let Some(handle) = self.thread.lock().take() else {
            return;
        };
        if handle.thread().id() == thread::current().id() {
            return;
        }
        if handle.join().is_err() {
            tracing::warn!(target: targets::WATCHER, "theme watcher thread panicked");
        }
    }
}

impl Drop for ThemeWatcher {
    fn drop(&mut self) {
        self.stop();
        self.join();
    }
}

/// Builder for [`ThemeWatcher`], following the worker builder pattern.
pub struct ThemeWatcherBuilder {
    config: WatcherConfig,
    probe: Option<Box<dyn AppearanceProbe>>,
}

impl ThemeWatcherBuilder {
    /// Create a builder with default settings and the system probe.
    pub fn new() -> Self {
        Self {
            config: WatcherConfig::default(),
            probe: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: WatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the polling interval.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval_ms = u64::try_from(interval.as_millis())
            .unwrap_or(u64::MAX)
            .max(1);
        self
    }

    /// Set the thread name.
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.config.thread_name = name.into();
        self
    }

    /// Whether the first pass reports state that differs from the defaults.
    pub fn emit_initial(mut self, emit: bool) -> Self {
        self.config.emit_initial = emit;
        self
    }

    /// Read appearance from a custom probe.
    pub fn probe<P: AppearanceProbe>(mut self, probe: P) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Build the watcher. It is not started.
    pub fn build(self) -> Result<ThemeWatcher, SystemThemeError> {
        self.config
            .validate()
            .map_err(|err| SystemThemeError::watcher(err.to_string()))?;

        match self.probe {
            Some(probe) => Ok(ThemeWatcher::from_boxed(probe, self.config)),
            None if SystemTheme::can_detect_color_scheme() => {
                Ok(ThemeWatcher::with_probe(SystemProbe, self.config))
            }
            None => Err(SystemThemeError::unsupported_platform(
                "color scheme detection requires the `system-theme` feature",
            )),
        }
    }
}

impl Default for ThemeWatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(ThemeWatcher: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    /// Probe whose readings the test controls.
    #[derive(Clone, Default)]
    struct FakeProbe {
        state: Arc<Mutex<(ColorScheme, bool)>>,
    }

    impl FakeProbe {
        fn set(&self, scheme: ColorScheme, high_contrast: bool) {
            *self.state.lock() = (scheme, high_contrast);
        }
    }

    impl AppearanceProbe for FakeProbe {
        fn color_scheme(&self) -> ColorScheme {
            self.state.lock().0
        }

        fn high_contrast(&self) -> bool {
            self.state.lock().1
        }
    }

    fn watcher(probe: &FakeProbe, emit_initial: bool) -> ThemeWatcher {
        ThemeWatcher::builder()
            .probe(probe.clone())
            .emit_initial(emit_initial)
            .build()
            .unwrap()
    }

    #[test]
    fn test_first_pass_reports_non_default_state() {
        let probe = FakeProbe::default();
        probe.set(ColorScheme::Dark, true);
        let watcher = watcher(&probe, true);

        let pass = watcher.check_now();
        assert_eq!(pass.theme, Some(Theme::Dark));
        assert_eq!(pass.high_contrast, Some(true));
    }

    #[test]
    fn test_baseline_suppresses_initial_report() {
        let probe = FakeProbe::default();
        probe.set(ColorScheme::Dark, true);
        let watcher = watcher(&probe, false);

        assert!(!watcher.check_now().changed());
    }

    #[test]
    fn test_emits_only_on_change() {
        let probe = FakeProbe::default();
        probe.set(ColorScheme::Light, false);
        let watcher = watcher(&probe, true);

        let themes = Arc::new(Mutex::new(Vec::new()));
        let themes_clone = themes.clone();
        let _guard = watcher
            .events()
            .theme_changed()
            .connect_scoped(move |&theme| themes_clone.lock().push(theme));

        assert!(!watcher.check_now().changed());
        probe.set(ColorScheme::Dark, false);
        watcher.check_now();
        watcher.check_now();
        probe.set(ColorScheme::Light, false);
        watcher.check_now();

        assert_eq!(*themes.lock(), vec![Theme::Dark, Theme::Light]);
    }

    #[test]
    fn test_unknown_scheme_is_ignored() {
        let probe = FakeProbe::default();
        probe.set(ColorScheme::Dark, false);
        let watcher = watcher(&probe, true);
        watcher.check_now();

        probe.set(ColorScheme::Unknown, false);
        assert_eq!(watcher.check_now(), WatchPass::default());

        probe.set(ColorScheme::Dark, false);
        assert_eq!(watcher.check_now(), WatchPass::default());
    }

    #[test]
    fn test_high_contrast_reports_explicit_value() {
        let probe = FakeProbe::default();
        let watcher = watcher(&probe, true);

        let states = Arc::new(Mutex::new(Vec::new()));
        let states_clone = states.clone();
        let _guard = watcher
            .events()
            .high_contrast_changed()
            .connect_scoped(move |&enabled| states_clone.lock().push(enabled));

        probe.set(ColorScheme::Light, true);
        watcher.check_now();
        probe.set(ColorScheme::Light, false);
        watcher.check_now();

        assert_eq!(*states.lock(), vec![true, false]);
    }

    #[test]
    fn test_poll_interval_saturates() {
        let huge = ThemeWatcher::builder()
            .probe(FakeProbe::default())
            .poll_interval(Duration::from_secs(18_446_744_073_709_552))
            .build()
            .unwrap();
        assert_eq!(huge.config().poll_interval_ms, u64::MAX);

        let tiny = ThemeWatcher::builder()
            .probe(FakeProbe::default())
            .poll_interval(Duration::from_micros(10))
            .build()
            .unwrap();
        assert_eq!(tiny.config().poll_interval_ms, 1);
    }

    #[test]
    fn test_start_stop_lifecycle() {
        let probe = FakeProbe::default();
        let watcher = ThemeWatcher::builder()
            .probe(probe.clone())
            .poll_interval(Duration::from_millis(5))
            .build()
            .unwrap();

        assert!(!watcher.is_running());
        watcher.start().unwrap();
        assert!(watcher.is_running());
        watcher.start().unwrap();

        let (tx, rx) = bounded(1);
        let _guard = watcher.events().theme_changed().connect_scoped(move |&theme| {
            let _ = tx.try_send(theme);
        });
        probe.set(ColorScheme::Dark, false);
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(Theme::Dark));

        watcher.stop();
        watcher.join();
        assert!(!watcher.is_running());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = ThemeWatcher::builder()
            .probe(FakeProbe::default())
            .thread_name("")
            .build();
        assert!(result.is_err());
    }
}
