//! Property-based tests for the calculator reducer.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use keypad::core::{transition, Action, CalculatorState, Digit, Operand, Operator};
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_digit()(value in 0..10u8) -> Digit {
        Digit::new(value).unwrap()
    }
}

prop_compose! {
    fn arbitrary_operator()(variant in 0..4usize) -> Operator {
        Operator::ALL[variant]
    }
}

fn arbitrary_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => arbitrary_digit().prop_map(Action::AddDigit),
        1 => Just(Action::AddDot),
        2 => arbitrary_operator().prop_map(Action::AddOperator),
        1 => Just(Action::Clear),
        1 => Just(Action::Delete),
        1 => Just(Action::Evaluate),
        1 => Just(Action::ChangeSign),
    ]
}

fn run(start: CalculatorState, actions: &[Action]) -> CalculatorState {
    actions
        .iter()
        .fold(start, |state, action| transition(&state, *action))
}

fn reachable_state() -> impl Strategy<Value = CalculatorState> {
    prop::collection::vec(arbitrary_action(), 0..30)
        .prop_map(|actions| run(CalculatorState::new(), &actions))
}

proptest! {
    #[test]
    fn digit_entry_parses_to_typed_number(
        first in 1..10u8,
        rest in prop::collection::vec(arbitrary_digit(), 0..12)
    ) {
        let mut typed = first.to_string();
        let mut actions = vec![Action::AddDigit(Digit::new(first).unwrap())];
        for digit in &rest {
            typed.push(digit.as_char());
            actions.push(Action::AddDigit(*digit));
        }

        let state = run(CalculatorState::new(), &actions);

        prop_assert_eq!(state.current().to_string(), typed.clone());
        prop_assert_eq!(state.current().value(), typed.parse::<f64>().ok());
    }

    #[test]
    fn add_dot_is_idempotent(state in reachable_state()) {
        let once = transition(&state, Action::AddDot);
        let twice = transition(&once, Action::AddDot);
        prop_assert_eq!(once.current(), twice.current());
    }

    #[test]
    fn change_sign_twice_restores_value(
        digits in prop::collection::vec(arbitrary_digit(), 1..10),
        fraction in prop::collection::vec(arbitrary_digit(), 0..4)
    ) {
        let mut actions: Vec<Action> = digits.iter().copied().map(Action::AddDigit).collect();
        if !fraction.is_empty() {
            actions.push(Action::AddDot);
            actions.extend(fraction.iter().copied().map(Action::AddDigit));
        }
        let state = run(CalculatorState::new(), &actions);
        let original = state.current().value().unwrap();
        prop_assume!(original != 0.0);

        let flipped = run(state, &[Action::ChangeSign, Action::ChangeSign]);

        prop_assert_eq!(flipped.current().value(), Some(original));
    }

    #[test]
    fn clear_always_returns_initial_state(state in reachable_state()) {
        prop_assert_eq!(transition(&state, Action::Clear), CalculatorState::new());
    }

    #[test]
    fn reachable_states_are_well_formed(state in reachable_state()) {
        prop_assert!(state.is_well_formed());
        if let Some(pending) = state.pending() {
            prop_assert!(!pending.left.is_empty());
        }
    }

    #[test]
    fn current_entry_has_at_most_one_dot(state in reachable_state()) {
        let dots = state.current().text().map_or(0, |t| t.matches('.').count());
        prop_assert!(dots <= 1);
    }

    #[test]
    fn unsigned_entry_has_no_leading_zero(state in reachable_state()) {
        if let Some(text) = state.current().text() {
            let mut chars = text.chars();
            if let (Some('0'), Some(next)) = (chars.next(), chars.next()) {
                prop_assert_eq!(next, '.');
            }
        }
    }

    #[test]
    fn transition_is_deterministic(state in reachable_state(), action in arbitrary_action()) {
        prop_assert_eq!(transition(&state, action), transition(&state, action));
    }

    #[test]
    fn evaluate_clears_pending_operator_when_it_applies(
        left in 1..1000u32,
        right in 1..1000u32,
        operator in arbitrary_operator()
    ) {
        let state = CalculatorState::pending_on(Operand::entry(left.to_string()), operator)
            .with_current(Operand::entry(right.to_string()));

        let evaluated = transition(&state, Action::Evaluate);

        prop_assert_eq!(evaluated.operator(), None);
        prop_assert!(evaluated.previous().is_empty());
        prop_assert_eq!(
            evaluated.current().value(),
            Some(operator.apply(f64::from(left), f64::from(right)))
        );
    }

    #[test]
    fn state_roundtrip_serialization(state in reachable_state()) {
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: CalculatorState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(state, deserialized);
    }
}
