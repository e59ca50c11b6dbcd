//! Calculator state value.
//!
//! A state is an immutable value: the reducer never edits one in place,
//! it builds the next state from the previous one.

use super::operand::Operand;
use super::operator::Operator;
use serde::{Deserialize, Serialize};

static EMPTY: Operand = Operand::Empty;

/// Left operand captured together with the operator chosen after it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pending {
    pub left: Operand,
    pub operator: Operator,
}

/// The complete calculator state.
///
/// The previous value and the operator only exist together, so an
/// operator can never be pending without a left operand.
///
/// # Example
///
/// ```rust
/// use keypad::core::{CalculatorState, Operand, Operator, Phase};
///
/// let state = CalculatorState::new();
/// assert_eq!(state.phase(), Phase::Idle);
///
/// let state = CalculatorState::pending_on(Operand::entry("5"), Operator::Add);
/// assert_eq!(state.previous().to_string(), "5");
/// assert_eq!(state.operator(), Some(Operator::Add));
/// assert!(state.current().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    current: Operand,
    pending: Option<Pending>,
}

impl CalculatorState {
    /// The initial state: nothing entered, nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// State with `left` promoted and `operator` pending.
    pub fn pending_on(left: Operand, operator: Operator) -> Self {
        Self {
            current: Operand::Empty,
            pending: Some(Pending { left, operator }),
        }
    }

    /// State showing only `current`.
    pub fn showing(current: Operand) -> Self {
        Self {
            current,
            pending: None,
        }
    }

    pub fn current(&self) -> &Operand {
        &self.current
    }

    /// Left operand of the pending operation, or `Empty`.
    pub fn previous(&self) -> &Operand {
        self.pending.as_ref().map_or(&EMPTY, |p| &p.left)
    }

    pub fn operator(&self) -> Option<Operator> {
        self.pending.as_ref().map(|p| p.operator)
    }

    pub fn pending(&self) -> Option<&Pending> {
        self.pending.as_ref()
    }

    /// Copy of this state with a different current value.
    pub fn with_current(&self, current: Operand) -> Self {
        Self {
            current,
            pending: self.pending.clone(),
        }
    }

    /// Copy of this state with the pending operator replaced.
    /// Without a pending operation the state is returned unchanged.
    pub fn with_operator(&self, operator: Operator) -> Self {
        Self {
            current: self.current.clone(),
            pending: self.pending.as_ref().map(|p| Pending {
                left: p.left.clone(),
                operator,
            }),
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.current, &self.pending) {
            (Operand::NonFinite(_), _) => Phase::Undefined,
            (Operand::Empty, None) => Phase::Idle,
            (Operand::Entry(_), None) => Phase::Entering,
            (Operand::Empty, Some(_)) => Phase::AwaitingOperand,
            (Operand::Entry(_), Some(_)) => Phase::Operating,
        }
    }

    /// Check the invariants every reachable state satisfies.
    pub fn is_well_formed(&self) -> bool {
        self.current.is_well_formed()
            && self
                .pending
                .as_ref()
                .is_none_or(|p| !p.left.is_empty() && p.left.is_well_formed())
    }
}

/// Coarse classification of a state, used for logs and the status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing entered.
    Idle,
    /// Left operand being typed.
    Entering,
    /// Operator chosen, right operand not started.
    AwaitingOperand,
    /// Operator chosen, right operand being typed.
    Operating,
    /// Current value is infinite or NaN.
    Undefined,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Entering => "Entering",
            Self::AwaitingOperand => "AwaitingOperand",
            Self::Operating => "Operating",
            Self::Undefined => "Undefined",
        }
    }

    /// Only an undefined result counts as an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}
