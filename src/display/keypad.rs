//! Keypad button surface.

use crate::core::{Action, Digit, Operator};

/// Width of one keypad cell in terminal columns.
pub const CELL_WIDTH: u16 = 5;

/// A labelled button and the action it dispatches.
#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub action: Action,
    /// Number of cells the button spans.
    pub span: u16,
}

impl Button {
    fn new(label: &'static str, action: Action) -> Self {
        Self {
            label,
            action,
            span: 1,
        }
    }

    fn wide(label: &'static str, action: Action, span: u16) -> Self {
        Self {
            label,
            action,
            span,
        }
    }

    fn digit(digit: Digit) -> Self {
        Self::new(digit.label(), Action::AddDigit(digit))
    }

    fn operator(op: Operator) -> Self {
        let label = match op {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        };
        Self::new(label, Action::AddOperator(op))
    }

    pub fn width(&self) -> u16 {
        self.span * CELL_WIDTH
    }

    /// The label centred in the button's width, between brackets.
    pub fn render(&self) -> String {
        let inner = usize::from(self.width()) - 2;
        format!("[{:^inner$}]", self.label)
    }
}

/// Grid of buttons, one text row per keypad row.
///
/// # Example
///
/// ```rust
/// use keypad::core::Action;
/// use keypad::display::Keypad;
///
/// let keypad = Keypad::standard();
/// let ac = keypad.button_at(0, 0).unwrap();
/// assert_eq!(ac.label, "AC");
/// assert_eq!(ac.action, Action::Clear);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Keypad {
    rows: Vec<Vec<Button>>,
}

impl Keypad {
    /// The calculator layout:
    ///
    /// ```text
    /// AC      DEL  ÷
    /// 7    8    9  ×
    /// 4    5    6  −
    /// 1    2    3  +
    /// 0    .    ±  =
    /// ```
    pub fn standard() -> Self {
        let mut top = vec![
            Button::wide("AC", Action::Clear, 2),
            Button::new("DEL", Action::Delete),
        ];
        top.push(Button::operator(Operator::Divide));

        let mut seven = digit_row(&[7, 8, 9]);
        seven.push(Button::operator(Operator::Multiply));

        let mut four = digit_row(&[4, 5, 6]);
        four.push(Button::operator(Operator::Subtract));

        let mut one = digit_row(&[1, 2, 3]);
        one.push(Button::operator(Operator::Add));

        let mut bottom = digit_row(&[0]);
        bottom.extend([
            Button::new(".", Action::AddDot),
            Button::new("±", Action::ChangeSign),
            Button::new("=", Action::Evaluate),
        ]);

        Self {
            rows: vec![top, seven, four, one, bottom],
        }
    }

    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    /// Width in columns of the widest row.
    pub fn width(&self) -> u16 {
        self.rows
            .iter()
            .map(|row| row.iter().map(Button::width).sum::<u16>())
            .max()
            .unwrap_or(0)
    }

    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }

    /// Button under a position relative to the keypad's top-left corner.
    pub fn button_at(&self, column: u16, row: u16) -> Option<&Button> {
        let buttons = self.rows.get(usize::from(row))?;
        let mut left = 0;
        for button in buttons {
            let right = left + button.width();
            if column >= left && column < right {
                return Some(button);
            }
            left = right;
        }
        None
    }

    /// One line of text per row.
    pub fn render(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(Button::render).collect())
            .collect()
    }
}

fn digit_row(values: &[usize]) -> Vec<Button> {
    values
        .iter()
        .map(|&value| Button::digit(Digit::ALL[value]))
        .collect()
}

impl Default for Keypad {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(keypad: &Keypad) -> Vec<Vec<&'static str>> {
        keypad
            .rows()
            .iter()
            .map(|row| row.iter().map(|b| b.label).collect())
            .collect()
    }

    #[test]
    fn standard_layout_matches_button_surface() {
        assert_eq!(
            labels(&Keypad::standard()),
            vec![
                vec!["AC", "DEL", "÷"],
                vec!["7", "8", "9", "×"],
                vec!["4", "5", "6", "−"],
                vec!["1", "2", "3", "+"],
                vec!["0", ".", "±", "="],
            ]
        );
    }

    #[test]
    fn digit_buttons_dispatch_their_digit() {
        let keypad = Keypad::standard();
        let digits: Vec<_> = keypad
            .rows()
            .iter()
            .flatten()
            .filter_map(|button| match button.action {
                Action::AddDigit(digit) => Some((button.label, digit.as_char())),
                _ => None,
            })
            .collect();

        assert_eq!(digits.len(), 10);
        for (label, c) in digits {
            assert_eq!(label, c.to_string());
        }
    }

    #[test]
    fn rows_have_equal_width() {
        let keypad = Keypad::standard();
        for row in keypad.rows() {
            assert_eq!(row.iter().map(Button::width).sum::<u16>(), keypad.width());
        }
        assert_eq!(keypad.width(), 4 * CELL_WIDTH);
        assert_eq!(keypad.height(), 5);
    }

    #[test]
    fn button_at_hits_wide_buttons() {
        let keypad = Keypad::standard();
        assert_eq!(keypad.button_at(CELL_WIDTH + 1, 0).unwrap().label, "AC");
        assert_eq!(keypad.button_at(2 * CELL_WIDTH, 0).unwrap().label, "DEL");
        assert_eq!(keypad.button_at(3 * CELL_WIDTH, 0).unwrap().label, "÷");
    }

    #[test]
    fn button_at_maps_actions() {
        let keypad = Keypad::standard();
        assert_eq!(keypad.button_at(0, 4).unwrap().action.kind(), "add_digit");
        assert_eq!(keypad.button_at(2 * CELL_WIDTH, 4).unwrap().action, Action::ChangeSign);
        assert_eq!(keypad.button_at(3 * CELL_WIDTH + 4, 4).unwrap().action, Action::Evaluate);
    }

    #[test]
    fn button_at_outside_is_none() {
        let keypad = Keypad::standard();
        assert!(keypad.button_at(4 * CELL_WIDTH, 1).is_none());
        assert!(keypad.button_at(0, 5).is_none());
    }

    #[test]
    fn render_centres_labels() {
        let lines = Keypad::standard().render();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("[   AC   ]"));
        assert_eq!(lines[1], "[ 7 ][ 8 ][ 9 ][ × ]");
    }
}
