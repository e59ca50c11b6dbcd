//! Core calculator types and logic.
//!
//! This module contains the pure functional core of the calculator:
//! - Operand and operator values
//! - The calculator state and its phases
//! - Guard predicates and the `transition` reducer
//! - Immutable history tracking
//!
//! All logic in this module is pure (no side effects), following
//! the "pure core, imperative shell" philosophy.

mod action;
mod guard;
mod history;
mod operand;
mod operator;
mod reducer;
mod state;

pub use action::{Action, ActionParseError, Digit, DigitError};
pub use guard::{awaiting_right_operand, can_evaluate, has_pending_operator, is_valid_number};
pub use history::{Calculation, StateHistory, StateTransition};
pub use operand::{NonFinite, Operand};
pub use operator::Operator;
pub use reducer::transition;
pub use state::{CalculatorState, Pending, Phase};
