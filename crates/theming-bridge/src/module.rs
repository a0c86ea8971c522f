//! The `Theming` module exported to the application runtime.
//!
//! Besides the push notifications sent by the relay, the runtime can poll
//! the cached state. [`ThemingModule`] describes the module (name, constants
//! and methods) and answers method calls through success callbacks.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Value, json};
use theming_bridge_core::logging::targets;

use crate::error::ModuleError;
use crate::relay::{ThemeSnapshot, ThemeStateRelay};

/// Name of the module as seen by the runtime.
pub const MODULE_NAME: &str = "Theming";

/// Constant holding the state at module load time.
pub const INITIAL_APP_STATE: &str = "initialAppState";

/// Method returning the cached theme.
pub const GET_CURRENT_THEME: &str = "getCurrentTheme";

/// Method returning the cached high contrast state.
pub const GET_HIGH_CONTRAST: &str = "getHighContrast";

/// How the runtime calls a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Returns immediately; results arrive through callbacks.
    Async,
}

/// Description of an exported method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodInfo {
    /// Method name.
    pub name: &'static str,
    /// Call convention.
    pub kind: MethodKind,
}

const METHODS: &[MethodInfo] = &[
    MethodInfo {
        name: GET_CURRENT_THEME,
        kind: MethodKind::Async,
    },
    MethodInfo {
        name: GET_HIGH_CONTRAST,
        kind: MethodKind::Async,
    },
];

/// The polling surface over a [`ThemeStateRelay`].
#[derive(Debug, Clone)]
pub struct ThemingModule {
    relay: Arc<ThemeStateRelay>,
}

impl ThemingModule {
    /// Create a module answering from `relay`.
    pub fn new(relay: Arc<ThemeStateRelay>) -> Self {
        Self { relay }
    }

    /// The module name.
    pub fn name(&self) -> &'static str {
        MODULE_NAME
    }

    /// Constants exported when the module loads.
    ///
    /// `initialAppState` is the cache at the time of the call.
    pub fn constants(&self) -> BTreeMap<&'static str, Value> {
        let mut constants = BTreeMap::new();
        constants.insert(INITIAL_APP_STATE, snapshot_value(self.relay.snapshot()));
        constants
    }

    /// Exported methods.
    pub fn methods(&self) -> &'static [MethodInfo] {
        METHODS
    }

    /// Names of the exported methods.
    pub fn method_names(&self) -> impl Iterator<Item = &'static str> {
        METHODS.iter().map(|info| info.name)
    }

    /// The relay this module reads from.
    pub fn relay(&self) -> &Arc<ThemeStateRelay> {
        &self.relay
    }

    /// Call `method`.
    ///
    /// Known methods report through `on_success` and ignore `args`. Neither
    /// exported method fails, so `on_failure` is only there to match the
    /// runtime's call convention. Unknown methods call neither callback.
    pub fn invoke<S, F>(
        &self,
        method: &str,
        args: &[Value],
        on_success: S,
        on_failure: F,
    ) -> Result<(), ModuleError>
    where
        S: FnOnce(Vec<Value>),
        F: FnOnce(Vec<Value>),
    {
        let result = match method {
            GET_CURRENT_THEME => json!({ "theme": self.relay.theme() }),
            GET_HIGH_CONTRAST => json!({ "highContrast": self.relay.high_contrast() }),
            _ => {
                tracing::warn!(target: targets::MODULE, method, "unknown method");
                return Err(ModuleError::UnknownMethod {
                    module: MODULE_NAME,
                    method: method.to_string(),
                });
            }
        };

        tracing::trace!(target: targets::MODULE, method, ignored_args = args.len(), "answering");
        drop(on_failure);
        on_success(vec![result]);
        Ok(())
    }
}

fn snapshot_value(snapshot: ThemeSnapshot) -> Value {
    json!({
        "theme": snapshot.theme,
        "highContrast": snapshot.high_contrast,
    })
}
