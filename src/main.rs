use anyhow::{Context, Result};
use clap::Parser;
use keypad::checkpoint::Checkpoint;
use keypad::config::{Overrides, Settings};
use keypad::display::{render_display, Keypad};
use keypad::keymap::{Key, Keymap};
use keypad::shell::Calculator;
use keypad::terminal::TerminalApp;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Four-function calculator with a terminal keypad.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Config file (defaults to ./keypad.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Press these keys headlessly and print the display instead of
    /// opening the terminal UI
    #[arg(long)]
    keys: Option<String>,

    /// Session checkpoint to resume from and save to
    #[arg(long)]
    session: Option<PathBuf>,

    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,

    #[arg(long)]
    history_limit: Option<usize>,

    /// Hide the keypad in the terminal UI
    #[arg(long)]
    no_keypad: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = settings_from(&args)?;
    init_tracing(&settings, args.keys.is_some())?;

    let keymap = settings.keymap()?;
    let calculator = open_session(&settings);

    let calculator = match &args.keys {
        Some(keys) => {
            let mut calculator = calculator;
            for line in replay_display(&mut calculator, keys, &keymap) {
                println!("{line}");
            }
            calculator
        }
        None => {
            let mut app = TerminalApp::new(calculator, keymap, settings.show_keypad);
            app.run().context("terminal session failed")?;
            app.into_calculator()
        }
    };

    if let Some(path) = &settings.session {
        calculator
            .checkpoint()
            .save(path)
            .with_context(|| format!("failed to save session to {}", path.display()))?;
    }

    Ok(())
}

fn settings_from(args: &Args) -> Result<Settings> {
    let overrides = Overrides {
        log_file: args.log_file.clone(),
        log_level: args.log_level.clone(),
        history_limit: args.history_limit,
        session: args.session.clone(),
        hide_keypad: args.no_keypad,
    };
    Ok(Settings::resolve(args.config.as_deref(), &overrides)?)
}

/// Press `keys` and return the two display lines, sized to the keypad.
fn replay_display(calculator: &mut Calculator, keys: &str, keymap: &Keymap) -> [String; 2] {
    let changes = calculator.replay(Key::sequence(keys), keymap);
    tracing::debug!(changes, "replayed key sequence");

    let width = usize::from(Keypad::standard().width());
    render_display(calculator.state(), width)
}

/// Log to the configured file. Without one, replay mode logs to stderr and
/// the terminal UI, which owns the screen, does not log at all.
fn init_tracing(settings: &Settings, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    match &settings.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

/// Resume the configured session, or start fresh when there is none or it
/// cannot be read.
fn open_session(settings: &Settings) -> Calculator {
    let fresh = || Calculator::with_history_limit(settings.history_limit);

    let Some(path) = &settings.session else {
        return fresh();
    };
    if !path.exists() {
        tracing::info!(path = %path.display(), "no saved session, starting fresh");
        return fresh();
    }

    match Checkpoint::load(path) {
        Ok(checkpoint) => {
            let calculator = Calculator::restore(checkpoint);
            calculator.limit_history(settings.history_limit)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable session");
            fresh()
        }
    }
}
