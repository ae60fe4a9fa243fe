//! The error value: a message decorated with severity, call site and time.

use std::fmt;
use std::panic::Location;

use chrono::{DateTime, Local};
use tracing::Level;

use crate::Severity;
use crate::format::{self, Config};
use crate::frame::{self, Frame};

type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error enriched with severity, caller location and creation time.
///
/// Two textual views exist. [`Display`](fmt::Display) (and therefore
/// `to_string()`) yields exactly the raw message, so code that treats this
/// as a plain error sees nothing extra. [`ZError::render`] yields the
/// decorated string built from the configured template.
pub struct ZError {
    severity: Severity,
    message: String,
    cause: Cause,
    explicit_cause: bool,
    frame: Frame,
    created: DateTime<Local>,
}

impl ZError {
    /// Create an error stamped with the process-wide default severity.
    ///
    /// The frame records the call site of this function (or of the macro
    /// that expanded to it).
    ///
    /// The message is used verbatim; use [`zerror!`](crate::zerror) for
    /// format arguments.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let frame = frame::locate(Location::caller());
        Self::build(format::default_severity(), message.into(), frame)
    }

    /// Create a [`Severity::Fatal`] error.
    #[track_caller]
    pub fn fatal(message: impl Into<String>) -> Self {
        let frame = frame::locate(Location::caller());
        Self::build(Severity::Fatal, message.into(), frame)
    }

    /// Create a [`Severity::Warn`] error.
    #[track_caller]
    pub fn warn(message: impl Into<String>) -> Self {
        let frame = frame::locate(Location::caller());
        Self::build(Severity::Warn, message.into(), frame)
    }

    /// Create a [`Severity::Info`] error.
    #[track_caller]
    pub fn info(message: impl Into<String>) -> Self {
        let frame = frame::locate(Location::caller());
        Self::build(Severity::Info, message.into(), frame)
    }

    fn build(severity: Severity, message: String, frame: Frame) -> Self {
        Self {
            severity,
            cause: Cause::from(message.clone()),
            explicit_cause: false,
            message,
            frame,
            created: Local::now(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(severity: Severity, message: &str, frame: Frame) -> Self {
        Self::build(severity, message.to_string(), frame)
    }
}

impl ZError {
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn set_severity(&mut self, severity: Severity) {
        self.severity = severity;
    }

    /// The raw message, identical to what `Display` prints.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replace the message. The cause is left as it is.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// The underlying error. Unless replaced, a plain error carrying the
    /// message the value was created with.
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    /// Wrap an existing error, keeping it reachable through `source()`.
    pub fn set_cause<E>(&mut self, cause: E)
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.cause = Box::new(cause);
        self.explicit_cause = true;
    }

    /// Builder form of [`ZError::set_cause`].
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.set_cause(cause);
        self
    }

    /// Where the error was constructed.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn created(&self) -> DateTime<Local> {
        self.created
    }

    /// Render with the process-wide configuration.
    pub fn render(&self) -> String {
        format::config().render(self)
    }

    /// Render with an explicit configuration.
    pub fn render_with(&self, config: &Config) -> String {
        config.render(self)
    }

    /// Emit the rendered error as a `tracing` event at the level matching
    /// its severity.
    pub fn log(&self) {
        let rendered = self.render();
        match self.severity.tracing_level() {
            Level::ERROR => tracing::event!(Level::ERROR, severity = %self.severity, "{rendered}"),
            Level::WARN => tracing::event!(Level::WARN, severity = %self.severity, "{rendered}"),
            _ => tracing::event!(Level::INFO, severity = %self.severity, "{rendered}"),
        }
    }
}

impl fmt::Display for ZError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for ZError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZError")
            .field("severity", &self.severity)
            .field("message", &self.message)
            .field("cause", &self.cause)
            .field("frame", &self.frame)
            .field("created", &self.created)
            .finish()
    }
}

impl std::error::Error for ZError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if self.explicit_cause {
            Some(self.cause.as_ref() as &(dyn std::error::Error + 'static))
        } else {
            None
        }
    }
}
