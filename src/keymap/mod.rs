//! Keyboard-to-action mapping.
//!
//! A `Keymap` turns a key press into at most one calculator action. Keys
//! without a binding resolve to nothing and leave the calculator untouched.

pub mod builder;
pub mod error;

pub use builder::KeymapBuilder;
pub use error::KeymapError;

use crate::core::{Action, Digit, Operator};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A key press, independent of the terminal library that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Escape,
}

impl Key {
    /// Keys for a typed sequence: each character is one key, a newline is
    /// Enter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keypad::keymap::Key;
    ///
    /// assert_eq!(Key::sequence("1+\n"), vec![Key::Char('1'), Key::Char('+'), Key::Enter]);
    /// ```
    pub fn sequence(input: &str) -> Vec<Key> {
        input
            .chars()
            .map(|c| match c {
                '\n' | '\r' => Key::Enter,
                c => Key::Char(c),
            })
            .collect()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Enter => f.write_str("Enter"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Escape => f.write_str("Escape"),
        }
    }
}

impl FromStr for Key {
    type Err = KeymapError;

    /// Parse a key name as written in configuration: a single character,
    /// or one of `Enter`, `Backspace`, `Delete`, `Escape`, `Space`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(c));
        }

        match s.to_ascii_lowercase().as_str() {
            "enter" | "return" => Ok(Key::Enter),
            "backspace" => Ok(Key::Backspace),
            "delete" | "del" => Ok(Key::Delete),
            "escape" | "esc" => Ok(Key::Escape),
            "space" => Ok(Key::Char(' ')),
            _ => Err(KeymapError::UnknownKey(s.to_string())),
        }
    }
}

/// Table of key bindings.
#[derive(Clone, Debug, PartialEq)]
pub struct Keymap {
    bindings: HashMap<Key, Action>,
}

impl Keymap {
    /// The standard bindings: digits, `+ - * /`, `.`, Enter or `=` to
    /// evaluate, Delete or Backspace to delete.
    pub fn standard() -> Self {
        let mut bindings = HashMap::new();

        for c in '0'..='9' {
            if let Some(digit) = Digit::from_char(c) {
                bindings.insert(Key::Char(c), Action::AddDigit(digit));
            }
        }
        for c in ['+', '-', '*', '/'] {
            if let Some(op) = Operator::from_char(c) {
                bindings.insert(Key::Char(c), Action::AddOperator(op));
            }
        }
        bindings.insert(Key::Char('.'), Action::AddDot);
        bindings.insert(Key::Enter, Action::Evaluate);
        bindings.insert(Key::Char('='), Action::Evaluate);
        bindings.insert(Key::Delete, Action::Delete);
        bindings.insert(Key::Backspace, Action::Delete);

        Self { bindings }
    }

    pub fn builder() -> KeymapBuilder {
        KeymapBuilder::new()
    }

    pub(crate) fn from_bindings(bindings: HashMap<Key, Action>) -> Self {
        Self { bindings }
    }

    /// Action bound to `key`, if any.
    pub fn resolve(&self, key: &Key) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn bindings(&self) -> &HashMap<Key, Action> {
        &self.bindings
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_keymap_binds_digits() {
        let keymap = Keymap::standard();
        for c in '0'..='9' {
            assert_eq!(
                keymap.resolve(&Key::Char(c)),
                Some(Action::AddDigit(Digit::from_char(c).unwrap()))
            );
        }
    }

    #[test]
    fn standard_keymap_binds_operators_and_commands() {
        let keymap = Keymap::standard();
        assert_eq!(
            keymap.resolve(&Key::Char('*')),
            Some(Action::AddOperator(Operator::Multiply))
        );
        assert_eq!(keymap.resolve(&Key::Char('.')), Some(Action::AddDot));
        assert_eq!(keymap.resolve(&Key::Enter), Some(Action::Evaluate));
        assert_eq!(keymap.resolve(&Key::Char('=')), Some(Action::Evaluate));
        assert_eq!(keymap.resolve(&Key::Backspace), Some(Action::Delete));
        assert_eq!(keymap.resolve(&Key::Delete), Some(Action::Delete));
    }

    #[test]
    fn other_keys_are_unbound() {
        let keymap = Keymap::standard();
        assert_eq!(keymap.resolve(&Key::Char('x')), None);
        assert_eq!(keymap.resolve(&Key::Escape), None);
        assert_eq!(keymap.len(), 19);
    }

    #[test]
    fn key_names_parse() {
        assert_eq!("Enter".parse::<Key>(), Ok(Key::Enter));
        assert_eq!("esc".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("c".parse::<Key>(), Ok(Key::Char('c')));
        assert_eq!("Space".parse::<Key>(), Ok(Key::Char(' ')));
        assert_eq!(
            "F13".parse::<Key>(),
            Err(KeymapError::UnknownKey("F13".to_string()))
        );
    }

    #[test]
    fn sequence_maps_newlines_to_enter() {
        assert_eq!(
            Key::sequence("5=\r"),
            vec![Key::Char('5'), Key::Char('='), Key::Enter]
        );
    }
}
