//! Transition history tracking.
//!
//! Provides immutable tracking of calculator transitions over time, and the
//! calculation tape derived from it.

use super::action::Action;
use super::operand::Operand;
use super::operator::Operator;
use super::state::CalculatorState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state-changing transition.
///
/// # Example
///
/// ```rust
/// use keypad::core::{Action, CalculatorState, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: CalculatorState::new(),
///     to: CalculatorState::new(),
///     action: Action::Clear,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.action, Action::Clear);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: CalculatorState,
    /// The state being transitioned to
    pub to: CalculatorState,
    /// The action that caused the transition
    pub action: Action,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl StateTransition {
    /// The calculation this transition performed, if it applied an operator.
    ///
    /// Both `=` and a chained operator press apply the pending operator.
    pub fn calculation(&self) -> Option<Calculation> {
        let pending = self.from.pending()?;
        if self.from.current().is_empty() {
            return None;
        }

        let result = match self.action {
            Action::Evaluate if self.to.pending().is_none() => self.to.current(),
            Action::AddOperator(_) if self.to.current().is_empty() => self.to.previous(),
            _ => return None,
        };

        Some(Calculation {
            left: pending.left.clone(),
            operator: pending.operator,
            right: self.from.current().clone(),
            result: result.clone(),
        })
    }
}

/// One line of the calculation tape: `left operator right = result`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub left: Operand,
    pub operator: Operator,
    pub right: Operand,
    pub result: Operand,
}

impl std::fmt::Display for Calculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.left, self.operator, self.right, self.result
        )
    }
}

/// Ordered history of transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added. With a limit set, the oldest transitions are dropped
/// once the limit is reached.
///
/// # Example
///
/// ```rust
/// use keypad::core::{transition, Action, CalculatorState, Digit, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new();
/// let start = CalculatorState::new();
/// let action = Action::AddDigit(Digit::new(4).unwrap());
/// let next = transition(&start, action);
///
/// let history = history.record(StateTransition {
///     from: start,
///     to: next,
///     action,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
    #[serde(default)]
    limit: Option<usize>,
}

impl StateHistory {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty history that keeps at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is not modified.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        if let Some(limit) = self.limit {
            keep_latest(&mut transitions, limit);
        }
        Self {
            transitions,
            limit: self.limit,
        }
    }

    /// The same history under a new limit, keeping only the most recent
    /// `limit` transitions.
    pub fn capped(&self, limit: usize) -> Self {
        let mut transitions = self.transitions.clone();
        keep_latest(&mut transitions, limit);
        Self {
            transitions,
            limit: Some(limit),
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the `from` state of the first
    /// retained transition, then the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&CalculatorState> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration from the first to the last transition, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Every calculation performed, oldest first.
    pub fn tape(&self) -> Vec<Calculation> {
        self.transitions
            .iter()
            .filter_map(StateTransition::calculation)
            .collect()
    }
}

fn keep_latest(transitions: &mut Vec<StateTransition>, limit: usize) {
    let excess = transitions.len().saturating_sub(limit);
    transitions.drain(..excess);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Digit;
    use crate::core::reducer::transition;

    fn step(
        history: StateHistory,
        from: &CalculatorState,
        action: Action,
    ) -> (StateHistory, CalculatorState) {
        let to = transition(from, action);
        let history = history.record(StateTransition {
            from: from.clone(),
            to: to.clone(),
            action,
            timestamp: Utc::now(),
        });
        (history, to)
    }

    fn digit(n: u8) -> Action {
        Action::AddDigit(Digit::new(n).unwrap())
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.tape().is_empty());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let (new_history, _) = step(history.clone(), &CalculatorState::new(), digit(1));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let start = CalculatorState::new();
        let (history, one) = step(StateHistory::new(), &start, digit(1));
        let (history, twelve) = step(history, &one, digit(2));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &start);
        assert_eq!(path[1], &one);
        assert_eq!(path[2], &twelve);
    }

    #[test]
    fn limit_drops_oldest_transitions() {
        let mut history = StateHistory::with_limit(2);
        let mut state = CalculatorState::new();
        for n in 1..=4 {
            let (next_history, next_state) = step(history, &state, digit(n));
            history = next_history;
            state = next_state;
        }

        assert_eq!(history.transitions().len(), 2);
        assert_eq!(history.transitions()[0].from.current().to_string(), "12");
        assert_eq!(history.limit(), Some(2));
    }

    #[test]
    fn capped_keeps_latest_transitions() {
        let mut history = StateHistory::new();
        let mut state = CalculatorState::new();
        for n in 1..=5 {
            let (next_history, next_state) = step(history, &state, digit(n));
            history = next_history;
            state = next_state;
        }

        let capped = history.capped(2);
        assert_eq!(capped.limit(), Some(2));
        assert_eq!(capped.transitions().len(), 2);
        assert_eq!(capped.transitions()[1].to.current().to_string(), "12345");
        assert_eq!(history.transitions().len(), 5);

        let (recorded, _) = step(capped, &state, digit(6));
        assert_eq!(recorded.transitions().len(), 2);
    }

    #[test]
    fn tape_lists_evaluations_and_chains() {
        let actions = [
            digit(5),
            Action::AddOperator(Operator::Add),
            digit(3),
            Action::AddOperator(Operator::Multiply),
            digit(2),
            Action::Evaluate,
        ];

        let mut history = StateHistory::new();
        let mut state = CalculatorState::new();
        for action in actions {
            let (next_history, next_state) = step(history, &state, action);
            history = next_history;
            state = next_state;
        }

        let tape = history.tape();
        assert_eq!(tape.len(), 2);
        assert_eq!(tape[0].to_string(), "5 + 3 = 8");
        assert_eq!(tape[1].to_string(), "8 × 2 = 16");
    }

    #[test]
    fn operator_swap_is_not_a_calculation() {
        let start = CalculatorState::pending_on(Operand::entry("5"), Operator::Add);
        let (history, _) = step(StateHistory::new(), &start, Action::AddOperator(Operator::Divide));
        assert!(history.tape().is_empty());
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let (history, _) = step(StateHistory::new(), &CalculatorState::new(), digit(3));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let (history, _) = step(StateHistory::with_limit(8), &CalculatorState::new(), digit(3));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
