//! System theme detection.
//!
//! One-shot queries for the current light/dark appearance and the high
//! contrast setting. For change notifications, see
//! [`ThemeWatcher`](super::ThemeWatcher).
//!
//! ```ignore
//! use theming_bridge::platform::{ColorScheme, SystemTheme};
//!
//! match SystemTheme::color_scheme() {
//!     ColorScheme::Dark => println!("Dark mode enabled"),
//!     ColorScheme::Light => println!("Light mode enabled"),
//!     ColorScheme::Unknown => println!("Could not determine theme"),
//! }
//! ```
//!
//! # Platform Notes
//!
//! - **Windows**: `AppsUseLightTheme` registry key via the dark-light crate
//! - **macOS**: `AppleInterfaceStyle` user default via the dark-light crate
//! - **Linux**: XDG Desktop Portal `color-scheme` setting via the dark-light crate

use std::fmt;

use serde::{Deserialize, Serialize};

use super::HighContrast;

// ============================================================================
// Theme
// ============================================================================

/// The theme reported to the application runtime.
///
/// On the wire this is the lowercase string `"light"` or `"dark"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark text on a light background.
    #[default]
    Light,
    /// Light text on a dark background.
    Dark,
}

impl Theme {
    /// The wire name of this theme.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Returns true if this is the dark theme.
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Color Scheme
// ============================================================================

/// The system color scheme preference, as detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorScheme {
    /// Light color scheme (dark text on light background).
    Light,
    /// Dark color scheme (light text on dark background).
    Dark,
    /// Color scheme could not be determined or user has no preference.
    #[default]
    Unknown,
}

impl ColorScheme {
    /// Returns true if this is the dark color scheme.
    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }

    /// Returns true if this is the light color scheme.
    pub fn is_light(&self) -> bool {
        matches!(self, ColorScheme::Light)
    }

    /// The theme to report for this scheme, if it is known.
    pub fn theme(&self) -> Option<Theme> {
        match self {
            ColorScheme::Light => Some(Theme::Light),
            ColorScheme::Dark => Some(Theme::Dark),
            ColorScheme::Unknown => None,
        }
    }
}

impl From<Theme> for ColorScheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => ColorScheme::Light,
            Theme::Dark => ColorScheme::Dark,
        }
    }
}

// ============================================================================
// System Theme
// ============================================================================

/// Static methods for detecting system theme settings.
pub struct SystemTheme;

impl SystemTheme {
    /// Get the current system color scheme (light/dark mode).
    #[cfg(feature = "system-theme")]
    pub fn color_scheme() -> ColorScheme {
        match dark_light::detect() {
            dark_light::Mode::Dark => ColorScheme::Dark,
            dark_light::Mode::Light => ColorScheme::Light,
            dark_light::Mode::Default => ColorScheme::Unknown,
        }
    }

    /// Get the current system color scheme (light/dark mode).
    ///
    /// Always `Unknown` without the `system-theme` feature.
    #[cfg(not(feature = "system-theme"))]
    pub fn color_scheme() -> ColorScheme {
        ColorScheme::Unknown
    }

    /// Whether color scheme detection is compiled in.
    pub const fn can_detect_color_scheme() -> bool {
        cfg!(feature = "system-theme")
    }

    /// Check if high contrast mode is enabled.
    ///
    /// Delegates to [`HighContrast::is_enabled()`].
    pub fn is_high_contrast() -> bool {
        HighContrast::is_enabled()
    }
}
