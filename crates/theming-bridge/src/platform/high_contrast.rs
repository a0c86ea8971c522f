//! High contrast mode detection.
//!
//! Detects the high contrast / increased contrast accessibility setting on
//! each platform.
//!
//! # Example
//!
//! ```ignore
//! use theming_bridge::platform::HighContrast;
//!
//! if HighContrast::is_enabled() {
//!     // Use high contrast colors
//! }
//! ```

/// High contrast mode detection.
///
/// Reads the current setting directly from the OS on every call; nothing is
/// cached here. Caching is the relay's job.
pub struct HighContrast;

impl HighContrast {
    /// Check if high contrast mode is currently enabled.
    ///
    /// # Platform Behavior
    ///
    /// - **Windows**: Checks the `SPI_GETHIGHCONTRAST` system parameter
    /// - **macOS**: Checks the `accessibilityDisplayShouldIncreaseContrast` setting
    /// - **Other**: Always returns `false`
    pub fn is_enabled() -> bool {
        Self::is_enabled_platform()
    }

    #[cfg(target_os = "windows")]
    fn is_enabled_platform() -> bool {
        use windows::Win32::UI::Accessibility::{HCF_HIGHCONTRASTON, HIGHCONTRASTW};
        use windows::Win32::UI::WindowsAndMessaging::{
            SystemParametersInfoW, SPI_GETHIGHCONTRAST, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
        };

        let mut hc = HIGHCONTRASTW {
            cbSize: std::mem::size_of::<HIGHCONTRASTW>() as u32,
            ..Default::default()
        };

        // SAFETY: `hc` is a stack-allocated HIGHCONTRASTW with `cbSize` set, and
        // the pointer passed is valid for the duration of the call. The API only
        // writes within the struct's bounds.
        let result = unsafe {
            SystemParametersInfoW(
                SPI_GETHIGHCONTRAST,
                hc.cbSize,
                Some(&mut hc as *mut _ as *mut std::ffi::c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        };

        match result {
            Ok(()) => (hc.dwFlags.0 & HCF_HIGHCONTRASTON.0) != 0,
            Err(err) => {
                tracing::debug!(
                    target: theming_bridge_core::logging::targets::WATCHER,
                    %err,
                    "SPI_GETHIGHCONTRAST failed, assuming high contrast is off"
                );
                false
            }
        }
    }

    #[cfg(target_os = "macos")]
    fn is_enabled_platform() -> bool {
        use objc2_app_kit::NSWorkspace;

        let workspace = NSWorkspace::sharedWorkspace();
        workspace.accessibilityDisplayShouldIncreaseContrast()
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    fn is_enabled_platform() -> bool {
        // TODO: read `org.freedesktop.appearance contrast` from the XDG settings portal
        false
    }
}
