//! Guard predicates consulted by the reducer.
//!
//! Guards are pure boolean functions over operands and states. Each
//! transition rule is expressed in terms of them, so the conditions under
//! which an action has an effect can be tested on their own.

use super::operand::Operand;
use super::state::CalculatorState;

/// An operand can be extended or used as an operand only if it holds entry
/// text. Empty and non-finite operands are not valid numbers.
///
/// # Example
///
/// ```rust
/// use keypad::core::{is_valid_number, Operand};
///
/// assert!(is_valid_number(&Operand::entry("3.5")));
/// assert!(!is_valid_number(&Operand::Empty));
/// assert!(!is_valid_number(&Operand::from_value(f64::NAN)));
/// ```
pub fn is_valid_number(operand: &Operand) -> bool {
    operand.is_valid()
}

pub fn has_pending_operator(state: &CalculatorState) -> bool {
    state.operator().is_some()
}

/// An operator is pending and no right operand has been started.
pub fn awaiting_right_operand(state: &CalculatorState) -> bool {
    has_pending_operator(state) && state.current().is_empty()
}

/// Both operands are present with an operator between them, and both
/// parse to numbers other than NaN.
pub fn can_evaluate(state: &CalculatorState) -> bool {
    operands(state).is_some()
}

/// Numeric operands of a complete expression.
pub(crate) fn operands(state: &CalculatorState) -> Option<(f64, f64)> {
    let pending = state.pending()?;
    let left = pending.left.value()?;
    let right = state.current().value()?;
    if left.is_nan() || right.is_nan() {
        return None;
    }
    Some((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::operand::NonFinite;
    use crate::core::operator::Operator;

    #[test]
    fn valid_number_requires_entry() {
        assert!(is_valid_number(&Operand::entry("0")));
        assert!(!is_valid_number(&Operand::Empty));
        assert!(!is_valid_number(&Operand::NonFinite(NonFinite::Infinity)));
        assert!(!is_valid_number(&Operand::NonFinite(NonFinite::NegInfinity)));
    }

    #[test]
    fn awaiting_right_operand_after_operator() {
        let state = CalculatorState::pending_on(Operand::entry("5"), Operator::Add);
        assert!(has_pending_operator(&state));
        assert!(awaiting_right_operand(&state));

        let state = state.with_current(Operand::entry("3"));
        assert!(!awaiting_right_operand(&state));
    }

    #[test]
    fn can_evaluate_needs_all_three_parts() {
        assert!(!can_evaluate(&CalculatorState::showing(Operand::entry("5"))));

        let state = CalculatorState::pending_on(Operand::entry("5"), Operator::Add);
        assert!(!can_evaluate(&state));
        assert!(can_evaluate(&state.with_current(Operand::entry("3"))));
    }

    #[test]
    fn can_evaluate_accepts_infinite_left_operand() {
        let state = CalculatorState::pending_on(
            Operand::NonFinite(NonFinite::Infinity),
            Operator::Subtract,
        )
        .with_current(Operand::entry("1"));
        assert!(can_evaluate(&state));
    }

    #[test]
    fn can_evaluate_rejects_nan_and_unparseable_operands() {
        let nan_left =
            CalculatorState::pending_on(Operand::NonFinite(NonFinite::NaN), Operator::Add)
                .with_current(Operand::entry("1"));
        assert!(!can_evaluate(&nan_left));

        let dot_left = CalculatorState::pending_on(Operand::entry("."), Operator::Add)
            .with_current(Operand::entry("1"));
        assert!(!can_evaluate(&dot_left));
    }

    #[test]
    fn guard_is_deterministic() {
        let state = CalculatorState::pending_on(Operand::entry("2"), Operator::Multiply)
            .with_current(Operand::entry("4"));
        assert_eq!(can_evaluate(&state), can_evaluate(&state));
    }
}
