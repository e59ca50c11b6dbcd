//! Presentation: the two-line display, the keypad and the full frame.
//!
//! Everything here renders to plain strings so it can be tested without a
//! terminal. The terminal front end only positions these lines on screen.

mod keypad;

pub use keypad::{Button, Keypad, CELL_WIDTH};

use crate::core::CalculatorState;
use crate::shell::Calculator;

/// Row of the frame at which the keypad starts.
pub const KEYPAD_TOP: u16 = 3;

/// Number of tape entries shown under the keypad.
pub const TAPE_LINES: usize = 3;

/// The two display lines: previous value with the pending operator, and
/// the current value, both right-aligned to `width`.
///
/// # Example
///
/// ```rust
/// use keypad::core::{CalculatorState, Operand, Operator};
/// use keypad::display::render_display;
///
/// let state = CalculatorState::pending_on(Operand::entry("12"), Operator::Add)
///     .with_current(Operand::entry("3"));
/// let [previous, current] = render_display(&state, 8);
///
/// assert_eq!(previous, "    12 +");
/// assert_eq!(current, "       3");
/// ```
pub fn render_display(state: &CalculatorState, width: usize) -> [String; 2] {
    let previous = match state.operator() {
        Some(op) => format!("{} {}", state.previous(), op),
        None => String::new(),
    };
    let current = state.current().to_string();

    [right_align(&previous, width), right_align(&current, width)]
}

/// Right-align `text`, keeping its rightmost characters behind a `…` when
/// it does not fit.
fn right_align(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{text:>width$}");
    }
    if width == 0 {
        return String::new();
    }

    let tail: String = text.chars().skip(len - (width - 1)).collect();
    format!("…{tail}")
}

/// The complete screen for a calculator: display, status line, optional
/// keypad, and the most recent calculations.
pub fn render_frame(calculator: &Calculator, keypad: Option<&Keypad>, width: usize) -> Vec<String> {
    let state = calculator.state();
    let [previous, current] = render_display(state, width);

    let mut lines = vec![previous, current, status_line(state, width)];

    if let Some(keypad) = keypad {
        lines.extend(keypad.render());
    }

    let tape = calculator.history().tape();
    if !tape.is_empty() {
        lines.push(String::new());
        let skip = tape.len().saturating_sub(TAPE_LINES);
        lines.extend(
            tape.iter()
                .skip(skip)
                .map(|calculation| right_align(&calculation.to_string(), width)),
        );
    }

    lines
}

fn status_line(state: &CalculatorState, width: usize) -> String {
    let phase = state.phase();
    let label = if phase.is_error() {
        format!(" {} (press a digit or AC) ", phase.name())
    } else {
        format!(" {} ", phase.name())
    };
    let label: String = label.chars().take(width).collect();
    let fill = width.saturating_sub(label.chars().count());
    format!("{label}{}", "─".repeat(fill))
}
