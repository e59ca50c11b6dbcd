//! Runtime configuration.
//!
//! Settings come from three layers, each overriding the previous one:
//! built-in defaults, an optional TOML file, and `KEYPAD_*` environment
//! variables. Command-line flags arrive as [`Overrides`] and win over all
//! three; [`Settings::resolve`] applies every layer and validates the result.
//!
//! ```toml
//! log_file = "keypad.log"
//! log_level = "debug"
//! history_limit = 500
//! show_keypad = true
//! session = "session.json"
//!
//! [bindings]
//! c = "clear"
//! n = "sign"
//! x = "*"
//! ```

pub mod error;
pub mod rules;

pub use error::{ConfigError, ConfigViolation};

use crate::core::Action;
use crate::keymap::{Key, Keymap, KeymapBuilder};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file read when no path is given and the file exists.
pub const DEFAULT_CONFIG_FILE: &str = "keypad.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Where log output goes; `None` disables logging in terminal mode.
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    pub history_limit: usize,
    pub show_keypad: bool,
    /// Session checkpoint resumed on start and written on exit.
    pub session: Option<PathBuf>,
    /// Extra key bindings: key name to action token.
    pub bindings: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: "info".into(),
            history_limit: 1_000,
            show_keypad: true,
            session: None,
            bindings: BTreeMap::new(),
        }
    }
}

/// Values given on the command line. `None` leaves a setting as it is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub history_limit: Option<usize>,
    pub session: Option<PathBuf>,
    pub hide_keypad: bool,
}

impl Settings {
    /// File, environment and command line, in that order, then validation.
    pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut settings = Self::load(path)?;
        settings.apply_overrides(overrides);
        settings.validate()?;
        Ok(settings)
    }

    /// Load defaults, then the config file, then the process environment.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        settings.apply_env(|name| std::env::var(name).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&raw).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(settings)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    /// Apply `KEYPAD_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("KEYPAD_LOG_FILE") {
            self.log_file = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("KEYPAD_LOG_LEVEL") {
            self.log_level = v;
        }
        if let Some(v) = lookup("KEYPAD_SESSION") {
            self.session = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("KEYPAD_HISTORY_LIMIT") {
            self.history_limit = v.parse().map_err(|_| {
                ConfigError::Invalid(vec![ConfigViolation::InvalidEnvironment {
                    name: "KEYPAD_HISTORY_LIMIT".to_string(),
                    value: v.clone(),
                }])
            })?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(v) = &overrides.log_file {
            self.log_file = Some(v.clone());
        }
        if let Some(v) = &overrides.log_level {
            self.log_level = v.clone();
        }
        if let Some(v) = overrides.history_limit {
            self.history_limit = v;
        }
        if let Some(v) = &overrides.session {
            self.session = Some(v.clone());
        }
        if overrides.hide_keypad {
            self.show_keypad = false;
        }
    }

    /// Check every rule and report all violations together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        rules::validate(self).map_err(ConfigError::Invalid)
    }

    /// The standard keymap with the configured bindings applied.
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        let mut builder = KeymapBuilder::standard();
        let mut violations = Vec::new();

        for (key_name, token) in &self.bindings {
            match (key_name.parse::<Key>(), token.parse::<Action>()) {
                (Ok(key), Ok(action)) => builder = builder.bind(key, action),
                (Err(e), _) => violations.push(ConfigViolation::InvalidBinding {
                    key: key_name.clone(),
                    message: e.to_string(),
                }),
                (_, Err(e)) => violations.push(ConfigViolation::InvalidBinding {
                    key: key_name.clone(),
                    message: e.to_string(),
                }),
            }
        }

        if !violations.is_empty() {
            return Err(ConfigError::Invalid(violations));
        }

        builder.build().map_err(|e| {
            ConfigError::Invalid(vec![ConfigViolation::InvalidBinding {
                key: String::new(),
                message: e.to_string(),
            }])
        })
    }
}
