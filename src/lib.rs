//! Keypad: a four-function calculator driven by a pure reducer
//!
//! Keypad follows the "pure core, imperative shell" philosophy. Every state
//! change goes through one pure function, [`core::transition`], which maps a
//! calculator state and an action to the next state. Around it, the shell
//! owns the live state and its history, and the terminal front end turns key
//! presses and clicks into actions.
//!
//! # Core Concepts
//!
//! - **State**: current entry, plus an optional pending operator with its
//!   left operand
//! - **Actions**: digit, dot, operator, clear, delete, evaluate, sign change
//! - **Guards**: pure predicates deciding when an action has an effect
//! - **History**: immutable record of transitions and the calculation tape
//!
//! # Example
//!
//! ```rust
//! use keypad::core::{transition, Action, CalculatorState, Digit, Operator};
//!
//! let state = CalculatorState::new();
//! let state = transition(&state, Action::AddDigit(Digit::new(1).unwrap()));
//! let state = transition(&state, Action::AddOperator(Operator::Divide));
//! let state = transition(&state, Action::AddDigit(Digit::new(0).unwrap()));
//! let state = transition(&state, Action::Evaluate);
//!
//! assert_eq!(state.current().to_string(), "Infinity");
//!
//! // A non-finite result is replaced by the next digit.
//! let state = transition(&state, Action::AddDigit(Digit::new(5).unwrap()));
//! assert_eq!(state.current().to_string(), "5");
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod display;
pub mod keymap;
pub mod shell;
pub mod terminal;

// Re-export commonly used types
pub use crate::core::{transition, Action, CalculatorState, Operand, Operator};
pub use keymap::{Key, Keymap};
pub use shell::{Calculator, StepResult};
