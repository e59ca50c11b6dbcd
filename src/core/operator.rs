//! Binary operators applied by the calculator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four arithmetic operators a keypad offers.
///
/// Operators are applied strictly left to right; there is no precedence
/// between them.
///
/// # Example
///
/// ```rust
/// use keypad::core::Operator;
///
/// assert_eq!(Operator::from_char('*'), Some(Operator::Multiply));
/// assert_eq!(Operator::Multiply.symbol(), '×');
/// assert_eq!(Operator::Divide.apply(1.0, 4.0), 0.25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators in keypad order.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Parse an operator from either its ASCII key or its display symbol.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Symbol shown on the display and on the keypad.
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '−',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Apply the operator with IEEE-754 semantics.
    ///
    /// Division by zero is not an error: it yields an infinity or NaN,
    /// which the operand layer later classifies as non-finite.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
