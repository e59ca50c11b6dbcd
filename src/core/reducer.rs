//! The calculator reducer.
//!
//! `transition` is the only place a calculator state changes. It is total
//! and pure: every action yields a state, and invalid input is absorbed as
//! a no-op or a reset rather than reported as an error.

use super::action::{Action, Digit};
use super::guard::{awaiting_right_operand, has_pending_operator, is_valid_number, operands};
use super::operand::Operand;
use super::operator::Operator;
use super::state::CalculatorState;

/// Compute the state that follows `state` when `action` is applied.
///
/// # Example
///
/// ```rust
/// use keypad::core::{transition, Action, CalculatorState, Digit, Operator};
///
/// let actions = [
///     Action::AddDigit(Digit::new(5).unwrap()),
///     Action::AddOperator(Operator::Add),
///     Action::AddDigit(Digit::new(3).unwrap()),
///     Action::Evaluate,
/// ];
///
/// let state = actions
///     .into_iter()
///     .fold(CalculatorState::new(), |state, action| transition(&state, action));
///
/// assert_eq!(state.current().to_string(), "8");
/// assert_eq!(state.operator(), None);
/// ```
pub fn transition(state: &CalculatorState, action: Action) -> CalculatorState {
    match action {
        Action::AddDigit(digit) => add_digit(state, digit),
        Action::AddDot => add_dot(state),
        Action::AddOperator(operator) => add_operator(state, operator),
        Action::Clear => CalculatorState::new(),
        Action::Delete => delete(state),
        Action::Evaluate => evaluate(state),
        Action::ChangeSign => change_sign(state),
    }
}

fn add_digit(state: &CalculatorState, digit: Digit) -> CalculatorState {
    let current = state.current();

    if digit.is_zero() && current.is_zero_literal() {
        return state.clone();
    }

    if !is_valid_number(current) || current.is_zero_literal() {
        return state.with_current(Operand::digit(digit.as_char()));
    }

    state.with_current(current.appended(digit.as_char()))
}

fn add_dot(state: &CalculatorState) -> CalculatorState {
    let current = state.current();

    if !is_valid_number(current) {
        return state.with_current(Operand::Empty);
    }

    if current.has_decimal_point() {
        return state.clone();
    }

    state.with_current(current.appended('.'))
}

fn change_sign(state: &CalculatorState) -> CalculatorState {
    let current = state.current();

    if !is_valid_number(current) || current.is_zero_literal() {
        return state.clone();
    }

    match current.value() {
        Some(value) => state.with_current(Operand::from_value(-value)),
        None => state.clone(),
    }
}

fn add_operator(state: &CalculatorState, operator: Operator) -> CalculatorState {
    // Left-to-right chaining: apply the pending operator first.
    if has_pending_operator(state) && !state.current().is_empty() {
        return match apply_pending(state) {
            Some(result) => CalculatorState::pending_on(result, operator),
            None => state.clone(),
        };
    }

    if awaiting_right_operand(state) {
        return state.with_operator(operator);
    }

    if !is_valid_number(state.current()) {
        return state.clone();
    }

    CalculatorState::pending_on(state.current().clone(), operator)
}

fn evaluate(state: &CalculatorState) -> CalculatorState {
    match apply_pending(state) {
        Some(result) => CalculatorState::showing(result),
        None => state.clone(),
    }
}

fn delete(state: &CalculatorState) -> CalculatorState {
    let current = state.current();

    if !is_valid_number(current) || current.is_negative_single_digit() {
        return state.with_current(Operand::Empty);
    }

    state.with_current(current.popped())
}

/// Result of `previous <operator> current`, if the expression is complete.
fn apply_pending(state: &CalculatorState) -> Option<Operand> {
    let (left, right) = operands(state)?;
    let operator = state.operator()?;
    Some(Operand::from_value(operator.apply(left, right)))
}
