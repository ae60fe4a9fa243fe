//! # zerror
//!
//! Errors that carry a severity, the time they were created and the call
//! site that created them, with a configurable human-readable rendering.
//!
//! ## Two views of one error
//!
//! - **Raw message**: `Display` / `to_string()`, for code that handles the
//!   value as any other `std::error::Error`.
//! - **Decorated string**: [`ZError::render`], built from a template such as
//!   `"{time} {severity}: {message}({func}:{line})"`, for humans and logs.
//!
//! ## Usage
//!
//! ```rust
//! use zerror::{Severity, ZError, zwarn};
//!
//! fn load(path: &str) -> zerror::Result<()> {
//!     Err(zwarn!("cannot read {}", path))
//! }
//!
//! let err = load("app.toml").unwrap_err();
//! assert_eq!(err.severity(), Severity::Warn);
//! assert_eq!(err.to_string(), "cannot read app.toml");
//! assert!(err.render().contains("Warn"));
//! ```
//!
//! ## Configuration
//!
//! The default severity, the time layout and the template are process-wide
//! (see [`set_default_severity`], [`set_time_format`],
//! [`set_message_format`]) and are read at render time. A [`Config`] can
//! also be passed explicitly with [`ZError::render_with`].

mod error;
pub mod format;
pub mod frame;
#[macro_use]
mod macros;
mod severity;

pub use error::ZError;
pub use format::{
    Config, config, default_severity, message_format, reset_config, set_config,
    set_default_severity, set_message_format, set_time_format, time_format,
};
pub use frame::Frame;
pub use severity::Severity;

/// Result type alias using [`ZError`]
pub type Result<T> = std::result::Result<T, ZError>;
