//! Calculator that owns the live state and dispatches actions.

use crate::checkpoint::{Checkpoint, SessionMetadata};
use crate::core::{transition, Action, CalculatorState, StateHistory, StateTransition};
use crate::keymap::{Key, Keymap};
use chrono::Utc;

/// Result of dispatching a single action
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    /// The action produced a new state
    Transitioned(CalculatorState),

    /// The action left the state as it was
    Unchanged,
}

impl StepResult {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned(_))
    }
}

/// Calculator session: the current state, its history and metadata.
///
/// Actions are applied one at a time, each to completion, through the pure
/// `transition` reducer.
///
/// # Example
///
/// ```rust
/// use keypad::keymap::{Key, Keymap};
/// use keypad::shell::Calculator;
///
/// let mut calculator = Calculator::new();
/// calculator.replay(Key::sequence("5+3="), &Keymap::standard());
///
/// assert_eq!(calculator.state().current().to_string(), "8");
/// assert_eq!(calculator.history().tape().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    current: CalculatorState,
    history: StateHistory,
    metadata: SessionMetadata,
}

impl Calculator {
    /// Create a calculator in the initial state with unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator whose history keeps at most `limit` transitions
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history: StateHistory::with_limit(limit),
            ..Self::default()
        }
    }

    /// Resume a session from a checkpoint
    pub fn restore(checkpoint: Checkpoint) -> Self {
        tracing::info!(
            id = %checkpoint.id,
            transitions = checkpoint.history.transitions().len(),
            "resuming calculator session"
        );
        Self {
            current: checkpoint.state,
            history: checkpoint.history,
            metadata: checkpoint.metadata,
        }
    }

    /// Apply a new history limit, dropping the oldest transitions that no
    /// longer fit. A resumed session takes the limit configured now, not the
    /// one it was saved with.
    pub fn limit_history(mut self, limit: usize) -> Self {
        self.history = self.history.capped(limit);
        self
    }

    /// Get current state (pure)
    pub fn state(&self) -> &CalculatorState {
        &self.current
    }

    /// Get transition history (pure)
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn metadata(&self) -> &SessionMetadata {
        &self.metadata
    }

    /// Apply one action.
    ///
    /// Only transitions that change the state are recorded in the history;
    /// every dispatch is counted in the metadata.
    pub fn dispatch(&mut self, action: Action) -> StepResult {
        self.metadata.count(action.kind());

        let next = transition(&self.current, action);
        if next == self.current {
            tracing::trace!(
                action = %action,
                phase = self.current.phase().name(),
                "action had no effect"
            );
            return StepResult::Unchanged;
        }

        tracing::debug!(
            action = %action,
            from = self.current.phase().name(),
            to = next.phase().name(),
            current = %next.current(),
            "transition"
        );
        if next.phase().is_error() {
            tracing::debug!(result = %next.current(), "evaluation produced a non-finite value");
        }

        let from = std::mem::replace(&mut self.current, next.clone());
        self.history = self.history.record(StateTransition {
            from,
            to: next.clone(),
            action,
            timestamp: Utc::now(),
        });

        StepResult::Transitioned(next)
    }

    /// Resolve a key press and dispatch its action.
    /// Unbound keys return `None` and change nothing.
    pub fn press(&mut self, key: &Key, keymap: &Keymap) -> Option<StepResult> {
        match keymap.resolve(key) {
            Some(action) => Some(self.dispatch(action)),
            None => {
                tracing::trace!(key = %key, "ignoring unbound key");
                None
            }
        }
    }

    /// Press every key in order; returns the number of state changes.
    pub fn replay(&mut self, keys: impl IntoIterator<Item = Key>, keymap: &Keymap) -> usize {
        keys.into_iter()
            .filter_map(|key| self.press(&key, keymap))
            .filter(StepResult::is_transition)
            .count()
    }

    /// Snapshot the session.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(
            self.current.clone(),
            self.history.clone(),
            self.metadata.clone(),
        )
    }
}
