//! Builder for constructing keymaps.

use crate::core::Action;
use crate::keymap::error::KeymapError;
use crate::keymap::{Key, Keymap};
use std::collections::HashMap;

enum Edit {
    Bind(Key, Action),
    Unbind(Key),
}

/// Builder for keymaps with a fluent API.
///
/// Edits apply in call order on top of the starting table. Binding the
/// same key twice to different actions within one builder is rejected.
///
/// # Example
///
/// ```rust
/// use keypad::core::Action;
/// use keypad::keymap::{Key, KeymapBuilder};
///
/// let keymap = KeymapBuilder::standard()
///     .bind(Key::Char('c'), Action::Clear)
///     .bind(Key::Char('n'), Action::ChangeSign)
///     .build()
///     .unwrap();
///
/// assert_eq!(keymap.resolve(&Key::Char('c')), Some(Action::Clear));
/// ```
pub struct KeymapBuilder {
    base: HashMap<Key, Action>,
    edits: Vec<Edit>,
}

impl KeymapBuilder {
    /// Start from an empty table.
    pub fn new() -> Self {
        Self {
            base: HashMap::new(),
            edits: Vec::new(),
        }
    }

    /// Start from the standard bindings.
    pub fn standard() -> Self {
        Self {
            base: Keymap::standard().bindings().clone(),
            edits: Vec::new(),
        }
    }

    /// Bind `key` to `action`, replacing any binding from the starting table.
    pub fn bind(mut self, key: Key, action: Action) -> Self {
        self.edits.push(Edit::Bind(key, action));
        self
    }

    /// Remove the binding for `key`.
    pub fn unbind(mut self, key: Key) -> Self {
        self.edits.push(Edit::Unbind(key));
        self
    }

    /// Bind several keys at once.
    pub fn bindings(mut self, bindings: impl IntoIterator<Item = (Key, Action)>) -> Self {
        self.edits
            .extend(bindings.into_iter().map(|(key, action)| Edit::Bind(key, action)));
        self
    }

    /// Build the keymap.
    pub fn build(self) -> Result<Keymap, KeymapError> {
        let mut table = self.base;
        let mut bound_here: HashMap<Key, Action> = HashMap::new();

        for edit in self.edits {
            match edit {
                Edit::Bind(key, action) => {
                    if let Some(first) = bound_here.get(&key) {
                        if *first != action {
                            return Err(KeymapError::ConflictingBinding {
                                key: key.to_string(),
                                first: first.to_string(),
                                second: action.to_string(),
                            });
                        }
                    }
                    bound_here.insert(key, action);
                    table.insert(key, action);
                }
                Edit::Unbind(key) => {
                    bound_here.remove(&key);
                    table.remove(&key);
                }
            }
        }

        if table.is_empty() {
            return Err(KeymapError::NoBindings);
        }

        Ok(Keymap::from_bindings(table))
    }
}

impl Default for KeymapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
