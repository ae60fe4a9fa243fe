/// Construct a [`ZError`](crate::ZError) with the process-wide default
/// severity.
///
/// # Forms
///
/// ```
/// use zerror::zerror;
///
/// // The frame records the line of the macro invocation.
/// # let line = line!() + 1;
/// let err = zerror!("x");
/// assert_eq!(err.frame().line(), line);
///
/// // Single argument: used verbatim, braces and `%` are not interpreted.
/// let err = zerror!("100% {done}");
/// assert_eq!(err.message(), "100% {done}");
///
/// // Format string plus arguments: substituted with `format!`.
/// let port = 8080;
/// let err = zerror!("port {} already in use", port);
/// assert_eq!(err.message(), "port 8080 already in use");
/// ```
#[macro_export]
#[collapse_debuginfo(yes)]
macro_rules! zerror {
    ($msg:expr $(,)?) => {
        $crate::ZError::new($msg)
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::ZError::new(::std::format!($fmt, $($arg)+))
    };
}

/// Construct a [`Severity::Fatal`](crate::Severity::Fatal) error. Same forms as [`zerror!`].
#[macro_export]
#[collapse_debuginfo(yes)]
macro_rules! zfatal {
    ($msg:expr $(,)?) => {
        $crate::ZError::fatal($msg)
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::ZError::fatal(::std::format!($fmt, $($arg)+))
    };
}

/// Construct a [`Severity::Warn`](crate::Severity::Warn) error. Same forms as [`zerror!`].
#[macro_export]
#[collapse_debuginfo(yes)]
macro_rules! zwarn {
    ($msg:expr $(,)?) => {
        $crate::ZError::warn($msg)
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::ZError::warn(::std::format!($fmt, $($arg)+))
    };
}

/// Construct a [`Severity::Info`](crate::Severity::Info) error. Same forms as [`zerror!`].
#[macro_export]
#[collapse_debuginfo(yes)]
macro_rules! zinfo {
    ($msg:expr $(,)?) => {
        $crate::ZError::info($msg)
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::ZError::info(::std::format!($fmt, $($arg)+))
    };
}
