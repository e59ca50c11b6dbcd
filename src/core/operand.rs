//! Operand values held by the calculator.
//!
//! An operand is either nothing, text being keyed in (or a finite result
//! available for further editing), or a non-finite result. Keeping
//! non-finite results in their own variant lets validity be decided by
//! matching instead of comparing strings against "Infinity" or "NaN".

use serde::{Deserialize, Serialize};
use std::fmt;

/// A result that is not a finite number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonFinite {
    Infinity,
    NegInfinity,
    NaN,
}

impl NonFinite {
    /// Classify a float, returning `None` for finite values.
    pub fn classify(value: f64) -> Option<Self> {
        if value.is_nan() {
            Some(Self::NaN)
        } else if value == f64::INFINITY {
            Some(Self::Infinity)
        } else if value == f64::NEG_INFINITY {
            Some(Self::NegInfinity)
        } else {
            None
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Self::Infinity => f64::INFINITY,
            Self::NegInfinity => f64::NEG_INFINITY,
            Self::NaN => f64::NAN,
        }
    }
}

impl fmt::Display for NonFinite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Infinity => "Infinity",
            Self::NegInfinity => "-Infinity",
            Self::NaN => "NaN",
        };
        f.write_str(text)
    }
}

/// A value in one of the calculator's operand slots.
///
/// # Example
///
/// ```rust
/// use keypad::core::Operand;
///
/// let entry = Operand::from_value(0.1 + 0.2);
/// assert_eq!(entry.to_string(), "0.30000000000000004");
/// assert!(entry.is_valid());
///
/// let overflow = Operand::from_value(1.0 / 0.0);
/// assert_eq!(overflow.to_string(), "Infinity");
/// assert!(!overflow.is_valid());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Nothing entered.
    #[default]
    Empty,
    /// Digits, an optional decimal point and an optional leading minus.
    /// Never empty.
    Entry(String),
    /// Result of an evaluation that overflowed or was undefined.
    NonFinite(NonFinite),
}

impl Operand {
    /// Operand holding a single digit.
    pub fn digit(c: char) -> Self {
        Self::Entry(c.to_string())
    }

    /// Wrap entry text, mapping empty text to `Empty`.
    pub fn entry(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Entry(text)
        }
    }

    /// Stringify a computed value.
    ///
    /// Finite values use the shortest text that round-trips; zero of
    /// either sign is written as `0`.
    pub fn from_value(value: f64) -> Self {
        match NonFinite::classify(value) {
            Some(non_finite) => Self::NonFinite(non_finite),
            None if value == 0.0 => Self::Entry("0".to_string()),
            None => Self::Entry(format!("{value}")),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// True only for entry text; empty and non-finite operands are invalid.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Entry(_))
    }

    /// True when the entry is exactly the single digit `0`.
    pub fn is_zero_literal(&self) -> bool {
        self.text() == Some("0")
    }

    /// Entry text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Entry(text) => Some(text),
            _ => None,
        }
    }

    pub fn has_decimal_point(&self) -> bool {
        self.text().is_some_and(|text| text.contains('.'))
    }

    /// A minus sign followed by exactly one character.
    pub fn is_negative_single_digit(&self) -> bool {
        self.text()
            .is_some_and(|text| text.starts_with('-') && text.chars().count() == 2)
    }

    /// Numeric value, or `None` when empty or when the text does not parse.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Entry(text) => text.parse::<f64>().ok(),
            Self::NonFinite(non_finite) => Some(non_finite.to_f64()),
        }
    }

    /// New operand with `c` appended to the entry text.
    pub fn appended(&self, c: char) -> Self {
        match self {
            Self::Entry(text) => {
                let mut text = text.clone();
                text.push(c);
                Self::Entry(text)
            }
            _ => Self::digit(c),
        }
    }

    /// New operand with the last character removed.
    pub fn popped(&self) -> Self {
        match self {
            Self::Entry(text) => {
                let mut text = text.clone();
                text.pop();
                Self::entry(text)
            }
            _ => Self::Empty,
        }
    }

    /// Check the shape of entry text: an optional leading minus, then
    /// digits with at most one decimal point.
    pub fn is_well_formed(&self) -> bool {
        let Some(text) = self.text() else {
            return true;
        };
        let body = text.strip_prefix('-').unwrap_or(text);
        !body.is_empty()
            && body.chars().all(|c| c.is_ascii_digit() || c == '.')
            && body.matches('.').count() <= 1
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Entry(text) => f.write_str(text),
            Self::NonFinite(non_finite) => write!(f, "{non_finite}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value_formats_finite_numbers() {
        assert_eq!(Operand::from_value(8.0), Operand::Entry("8".into()));
        assert_eq!(Operand::from_value(-2.5), Operand::Entry("-2.5".into()));
        assert_eq!(Operand::from_value(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn from_value_writes_negative_zero_as_zero() {
        assert_eq!(Operand::from_value(-0.0), Operand::Entry("0".into()));
    }

    #[test]
    fn from_value_classifies_non_finite() {
        assert_eq!(
            Operand::from_value(f64::INFINITY),
            Operand::NonFinite(NonFinite::Infinity)
        );
        assert_eq!(Operand::from_value(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Operand::from_value(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn validity_follows_variant() {
        assert!(!Operand::Empty.is_valid());
        assert!(Operand::entry("12").is_valid());
        assert!(!Operand::NonFinite(NonFinite::NaN).is_valid());
    }

    #[test]
    fn entry_maps_empty_text_to_empty() {
        assert_eq!(Operand::entry(""), Operand::Empty);
    }

    #[test]
    fn popped_removes_last_character() {
        assert_eq!(Operand::entry("12.").popped(), Operand::entry("12"));
        assert_eq!(Operand::entry("7").popped(), Operand::Empty);
    }

    #[test]
    fn value_parses_trailing_dot() {
        assert_eq!(Operand::entry("5.").value(), Some(5.0));
        assert_eq!(Operand::entry(".").value(), None);
        assert_eq!(Operand::Empty.value(), None);
    }

    #[test]
    fn negative_single_digit_detection() {
        assert!(Operand::entry("-7").is_negative_single_digit());
        assert!(!Operand::entry("-75").is_negative_single_digit());
        assert!(!Operand::entry("75").is_negative_single_digit());
    }

    #[test]
    fn well_formed_rejects_garbage() {
        assert!(Operand::entry("-12.5").is_well_formed());
        assert!(Operand::Empty.is_well_formed());
        assert!(!Operand::entry("1.2.3").is_well_formed());
        assert!(!Operand::entry("-").is_well_formed());
        assert!(!Operand::entry("1e5").is_well_formed());
    }

    #[test]
    fn operand_serializes_correctly() {
        let operand = Operand::NonFinite(NonFinite::NaN);
        let json = serde_json::to_string(&operand).unwrap();
        let deserialized: Operand = serde_json::from_str(&json).unwrap();
        assert_eq!(operand, deserialized);
    }
}
