//! Core primitives for theming-bridge.
//!
//! This crate provides the small reactive toolkit the bridge is built from:
//!
//! - **Signal/Slot System**: Type-safe notification from event sources
//! - **Scoped Connections**: RAII guards that unsubscribe on drop
//! - **Property System**: Lock-guarded cached values readable from any thread
//! - **Logging**: Tracing targets shared across the workspace
//!
//! # Example
//!
//! ```
//! use theming_bridge_core::{Property, Signal};
//! use std::sync::Arc;
//!
//! let dark_mode_changed = Signal::<bool>::new();
//! let cached = Arc::new(Property::new(false));
//!
//! let cached_clone = cached.clone();
//! let guard = dark_mode_changed.connect_scoped(move |&dark| {
//!     cached_clone.set_silent(dark);
//! });
//!
//! dark_mode_changed.emit(true);
//! assert!(cached.get());
//!
//! drop(guard);
//! dark_mode_changed.emit(false);
//! assert!(cached.get());
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::{Result, SignalError};
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
