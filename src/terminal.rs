//! Terminal front end.
//!
//! Bridges crossterm's event system with the calculator: key presses go
//! through the keymap, left clicks on the keypad dispatch the clicked
//! button's action, and the frame is redrawn after every event.
//!
//! Esc (unless bound) and Ctrl+C quit. The terminal is restored when the
//! session guard is dropped, so an error inside the loop still leaves the
//! user's shell usable.

use crate::display::{render_frame, Keypad, KEYPAD_TOP};
use crate::keymap::{Key, Keymap};
use crate::shell::Calculator;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};

/// What the event loop should do after handling an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive calculator bound to a terminal.
pub struct TerminalApp {
    calculator: Calculator,
    keymap: Keymap,
    keypad: Keypad,
    show_keypad: bool,
}

impl TerminalApp {
    pub fn new(calculator: Calculator, keymap: Keymap, show_keypad: bool) -> Self {
        Self {
            calculator,
            keymap,
            keypad: Keypad::standard(),
            show_keypad,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn into_calculator(self) -> Calculator {
        self.calculator
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> io::Result<()> {
        let mut session = TerminalSession::enter()?;
        tracing::info!("terminal session started");

        loop {
            self.draw(&mut session.stdout)?;
            let flow = match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => Flow::Continue,
            };
            if flow == Flow::Quit {
                break;
            }
        }

        tracing::info!(
            actions = self.calculator.metadata().actions_dispatched,
            "terminal session ended"
        );
        Ok(())
    }

    /// Handle a key event. Release events, which only some platforms
    /// report, are ignored.
    pub fn handle_key(&mut self, event: KeyEvent) -> Flow {
        if event.kind == KeyEventKind::Release {
            return Flow::Continue;
        }
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }

        let Some(key) = convert_key_event(&event) else {
            return Flow::Continue;
        };
        if key == Key::Escape && self.keymap.resolve(&key).is_none() {
            return Flow::Quit;
        }

        self.calculator.press(&key, &self.keymap);
        Flow::Continue
    }

    /// Handle a mouse event: a left click on a keypad button presses it.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Flow {
        if !self.show_keypad || event.kind != MouseEventKind::Down(MouseButton::Left) {
            return Flow::Continue;
        }
        let Some(row) = event.row.checked_sub(KEYPAD_TOP) else {
            return Flow::Continue;
        };

        if let Some(button) = self.keypad.button_at(event.column, row) {
            tracing::trace!(label = button.label, "keypad click");
            let action = button.action;
            self.calculator.dispatch(action);
        }
        Flow::Continue
    }

    fn draw(&self, out: &mut Stdout) -> io::Result<()> {
        let keypad = self.show_keypad.then_some(&self.keypad);
        let width = usize::from(self.keypad.width());

        queue!(out, Clear(ClearType::All))?;
        for (y, line) in render_frame(&self.calculator, keypad, width)
            .iter()
            .enumerate()
        {
            queue!(out, MoveTo(0, y as u16), Print(line))?;
        }
        out.flush()
    }
}

/// Convert a crossterm key event into a keymap key.
pub fn convert_key_event(event: &KeyEvent) -> Option<Key> {
    match event.code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// Raw mode, alternate screen and mouse capture for the guard's lifetime.
struct TerminalSession {
    stdout: Stdout,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.stdout, Show, DisableMouseCapture, LeaveAlternateScreen) {
            tracing::warn!(error = %e, "failed to restore terminal screen");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "failed to leave raw mode");
        }
    }
}
