//! Actions dispatched to the calculator reducer.

use super::operator::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a value outside `0..=9` is used as a digit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0} is not a decimal digit")]
pub struct DigitError(pub u8);

/// Raised when configuration names an action the calculator does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown action '{0}'")]
pub struct ActionParseError(pub String);

/// A single decimal digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Every digit, indexed by its value.
    pub const ALL: [Digit; 10] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    pub fn new(value: u8) -> Result<Self, DigitError> {
        if value <= 9 {
            Ok(Digit(value))
        } else {
            Err(DigitError(value))
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Digit(d as u8))
    }

    pub fn as_char(&self) -> char {
        char::from(b'0' + self.0)
    }

    pub fn label(&self) -> &'static str {
        const LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        LABELS[usize::from(self.0)]
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Digit {
    type Error = DigitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

/// A discrete user intent.
///
/// The set is closed: input that maps to none of these never reaches the
/// reducer, so unknown intents leave the state untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    AddDigit(Digit),
    AddDot,
    AddOperator(Operator),
    Clear,
    Delete,
    Evaluate,
    ChangeSign,
}

impl Action {
    /// Stable kind name, used for logs and per-kind counters.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddDigit(_) => "add_digit",
            Self::AddDot => "add_dot",
            Self::AddOperator(_) => "add_operator",
            Self::Clear => "clear",
            Self::Delete => "delete",
            Self::Evaluate => "evaluate",
            Self::ChangeSign => "change_sign",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddDigit(digit) => write!(f, "{}", digit.as_char()),
            Self::AddDot => f.write_str("."),
            Self::AddOperator(op) => write!(f, "{op}"),
            Self::Clear => f.write_str("AC"),
            Self::Delete => f.write_str("DEL"),
            Self::Evaluate => f.write_str("="),
            Self::ChangeSign => f.write_str("±"),
        }
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    /// Parse an action token such as `"7"`, `"+"`, `"."`, `"clear"` or `"sign"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(digit) = Digit::from_char(c) {
                return Ok(Self::AddDigit(digit));
            }
            if let Some(op) = Operator::from_char(c) {
                return Ok(Self::AddOperator(op));
            }
            match c {
                '.' => return Ok(Self::AddDot),
                '=' => return Ok(Self::Evaluate),
                '±' => return Ok(Self::ChangeSign),
                _ => {}
            }
        }

        match token.to_ascii_lowercase().as_str() {
            "clear" | "ac" => Ok(Self::Clear),
            "delete" | "del" => Ok(Self::Delete),
            "evaluate" | "equals" => Ok(Self::Evaluate),
            "sign" | "negate" | "change_sign" => Ok(Self::ChangeSign),
            "dot" => Ok(Self::AddDot),
            _ => Err(ActionParseError(s.to_string())),
        }
    }
}
