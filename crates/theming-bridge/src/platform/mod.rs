//! Platform appearance detection and the platform event source.
//!
//! # System Theme
//!
//! ```ignore
//! use theming_bridge::platform::{SystemTheme, HighContrast};
//!
//! let scheme = SystemTheme::color_scheme();
//! if HighContrast::is_enabled() {
//!     // Use high contrast colors
//! }
//! ```
//!
//! # Change Notifications
//!
//! [`ThemeWatcher`] polls the OS and emits on its [`PlatformEvents`]. Hosts
//! that already receive OS notifications can skip the watcher and emit on a
//! `PlatformEvents` of their own.

mod events;
mod high_contrast;
mod system_theme;
mod watcher;

pub use events::PlatformEvents;
pub use high_contrast::HighContrast;
pub use system_theme::{ColorScheme, SystemTheme, Theme};

pub use crate::error::SystemThemeError;
pub use watcher::{AppearanceProbe, SystemProbe, ThemeWatcher, ThemeWatcherBuilder, WatchPass};
