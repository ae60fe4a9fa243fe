//! Rendering configuration and token substitution.
//!
//! A [`Config`] holds the template, the time layout and the default
//! severity. Rendering replaces every recognized token in the template
//! with the matching field of a [`ZError`]; anything else in the template,
//! including unknown `{tokens}`, is copied through untouched.
//!
//! The process-wide configuration lives behind a lock and is read at render
//! time, so changing it also changes how existing errors render.

use std::sync::LazyLock;

use chrono::format::{Item, StrftimeItems};
use parking_lot::RwLock;

use crate::{Severity, ZError};

pub const TOKEN_TIME: &str = "{time}";
pub const TOKEN_SEVERITY: &str = "{severity}";
pub const TOKEN_MESSAGE: &str = "{message}";
pub const TOKEN_FUNC: &str = "{func}";
pub const TOKEN_LINE: &str = "{line}";
pub const TOKEN_FILE: &str = "{file}";

/// RFC 3339 in strftime syntax, e.g. `2024-05-01T13:45:10+02:00`.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

pub const DEFAULT_MESSAGE_FORMAT: &str = "{time} {severity}: {message}({func}:{line})";

/// Minimum width of the `{severity}` field so severities line up in logs.
pub const SEVERITY_WIDTH: usize = 5;

static GLOBAL: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::default()));

/// Rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    default_severity: Severity,
    time_format: String,
    message_format: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            default_severity: Severity::Info,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            message_format: DEFAULT_MESSAGE_FORMAT.to_string(),
        }
    }

    pub fn default_severity(&self) -> Severity {
        self.default_severity
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    pub fn message_format(&self) -> &str {
        &self.message_format
    }

    pub fn with_default_severity(mut self, severity: Severity) -> Self {
        self.default_severity = severity;
        self
    }

    /// Set the strftime layout used for `{time}`.
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Set the template; see the `TOKEN_*` constants for recognized tokens.
    pub fn with_message_format(mut self, format: impl Into<String>) -> Self {
        self.message_format = format.into();
        self
    }

    /// Render `err` using this configuration.
    ///
    /// The message is inserted after every other token, so text in a
    /// message that looks like a token (`{line}`, `{time}`) is kept verbatim.
    pub fn render(&self, err: &ZError) -> String {
        let template = self.message_format.as_str();
        let mut out = template.to_string();

        if template.contains(TOKEN_TIME) {
            out = out.replace(TOKEN_TIME, &self.format_time(err));
        }
        if template.contains(TOKEN_SEVERITY) {
            let severity = format!("{:<width$}", err.severity().as_str(), width = SEVERITY_WIDTH);
            out = out.replace(TOKEN_SEVERITY, &severity);
        }
        if template.contains(TOKEN_FILE) {
            out = out.replace(TOKEN_FILE, err.frame().file());
        }
        if template.contains(TOKEN_FUNC) {
            out = out.replace(TOKEN_FUNC, err.frame().function());
        }
        if template.contains(TOKEN_LINE) {
            out = out.replace(TOKEN_LINE, &err.frame().line().to_string());
        }
        // Last, so a message that happens to contain a token stays verbatim.
        if template.contains(TOKEN_MESSAGE) {
            out = out.replace(TOKEN_MESSAGE, err.message());
        }

        out
    }

    fn format_time(&self, err: &ZError) -> String {
        let items: Vec<Item<'_>> = StrftimeItems::new(&self.time_format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            tracing::warn!(
                time_format = %self.time_format,
                "invalid time format, falling back to {}",
                DEFAULT_TIME_FORMAT
            );
            return err.created().format(DEFAULT_TIME_FORMAT).to_string();
        }
        err.created().format_with_items(items.iter()).to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the process-wide configuration.
pub fn config() -> Config {
    GLOBAL.read().clone()
}

/// Replace the whole process-wide configuration.
pub fn set_config(config: Config) {
    tracing::debug!(?config, "zerror config replaced");
    *GLOBAL.write() = config;
}

/// Restore the process-wide configuration to its defaults.
pub fn reset_config() {
    set_config(Config::default());
}

/// Severity stamped by [`ZError::new`].
pub fn default_severity() -> Severity {
    GLOBAL.read().default_severity
}

pub fn set_default_severity(severity: Severity) {
    tracing::debug!(%severity, "default severity set");
    GLOBAL.write().default_severity = severity;
}

/// Layout used to render `{time}`, in strftime syntax.
pub fn time_format() -> String {
    GLOBAL.read().time_format.clone()
}

pub fn set_time_format(format: impl Into<String>) {
    let format = format.into();
    tracing::debug!(%format, "time format set");
    GLOBAL.write().time_format = format;
}

/// Template used by [`ZError::render`].
pub fn message_format() -> String {
    GLOBAL.read().message_format.clone()
}

pub fn set_message_format(format: impl Into<String>) {
    let format = format.into();
    tracing::debug!(%format, "message format set");
    GLOBAL.write().message_format = format;
}
