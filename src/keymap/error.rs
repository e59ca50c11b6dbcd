//! Errors raised while building or parsing key bindings.

use thiserror::Error;

/// Errors that can occur when building a keymap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("No bindings defined. Bind at least one key")]
    NoBindings,

    #[error("Key '{key}' bound to both '{first}' and '{second}'")]
    ConflictingBinding {
        key: String,
        first: String,
        second: String,
    },

    #[error("Unknown key name '{0}'")]
    UnknownKey(String),
}
