//! Severity levels attached to every [`ZError`](crate::ZError).

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Classification label used by callers to triage an error.
///
/// Declaration order is `Fatal`, `Warn`, `Info`. `Fatal` is only a label;
/// constructing a fatal error never terminates the process.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    IntoStaticStr,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Severity {
    /// Unrecoverable for the current operation
    Fatal,

    /// Something went wrong but work can continue
    Warn,

    /// Informational
    #[default]
    Info,
}

impl Severity {
    /// Returns the display name as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// The `tracing` level used when an error of this severity is logged.
    pub fn tracing_level(&self) -> tracing::Level {
        match self {
            Severity::Fatal => tracing::Level::ERROR,
            Severity::Warn => tracing::Level::WARN,
            Severity::Info => tracing::Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Fatal.to_string(), "Fatal");
        assert_eq!(Severity::Warn.to_string(), "Warn");
        assert_eq!(Severity::Info.as_str(), "Info");
    }

    #[test]
    fn test_declaration_order() {
        let all: Vec<Severity> = Severity::iter().collect();
        assert_eq!(all, vec![Severity::Fatal, Severity::Warn, Severity::Info]);
        assert_eq!(Severity::Fatal as u8, 0);
        assert_eq!(Severity::Info as u8, 2);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("FATAL".parse::<Severity>().unwrap(), Severity::Fatal);
        assert!("error".parse::<Severity>().is_err());
    }

    #[test]
    fn test_tracing_level() {
        assert_eq!(Severity::Fatal.tracing_level(), tracing::Level::ERROR);
        assert_eq!(Severity::Warn.tracing_level(), tracing::Level::WARN);
        assert_eq!(Severity::default(), Severity::Info);
    }
}
