//! Settings validation using Validation.
//!
//! Every rule runs and every violation is reported, so a broken config file
//! can be fixed in one pass instead of one error at a time.

use crate::config::error::ConfigViolation;
use crate::config::Settings;
use crate::core::Action;
use crate::keymap::Key;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Largest accepted history limit.
pub const MAX_HISTORY_LIMIT: usize = 100_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Run all rules, accumulating ALL violations.
pub fn validate(settings: &Settings) -> Result<(), Vec<ConfigViolation>> {
    let mut checks: Vec<Check> = vec![
        check_log_level(&settings.log_level),
        check_history_limit(settings.history_limit),
    ];
    checks.extend(
        settings
            .bindings
            .iter()
            .map(|(key, action)| check_binding(key, action)),
    );

    match Validation::all_vec(checks).map(|_| ()) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
    }
}

fn check_log_level(level: &str) -> Check {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::UnknownLogLevel(level.to_string()))
    }
}

fn check_history_limit(limit: usize) -> Check {
    if (1..=MAX_HISTORY_LIMIT).contains(&limit) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::HistoryLimitOutOfRange {
            value: limit,
            max: MAX_HISTORY_LIMIT,
        })
    }
}

fn check_binding(key: &str, action: &str) -> Check {
    let problem = match (key.parse::<Key>(), action.parse::<Action>()) {
        (Ok(_), Ok(_)) => return Validation::success(()),
        (Err(e), _) => e.to_string(),
        (_, Err(e)) => e.to_string(),
    };
    Validation::fail(ConfigViolation::InvalidBinding {
        key: key.to_string(),
        message: problem,
    })
}
