//! Imperative shell around the pure core.
//!
//! The `Calculator` owns the single live state. It feeds each action through
//! the reducer, records the transitions that change something, counts what
//! was dispatched, and logs every step with `tracing`.

mod calculator;

pub use calculator::{Calculator, StepResult};
