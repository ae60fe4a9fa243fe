//! Call-site capture.
//!
//! Constructors are `#[track_caller]`, so the file and line of the call
//! site come from [`Location::caller`] and stay exact under any
//! optimization level. The function name is looked up by walking the stack
//! with [`backtrace::trace`] and picking the frame whose debug info resolves
//! to that same file and line. Inlined functions are expanded so each one
//! counts as a frame of its own.
//!
//! [`capture`] is the plain skip-count walk, for callers that know how many
//! physical frames sit between them and the frame they want.

use std::fmt;
use std::panic::Location;
use std::path::Path;

/// Function name of the sentinel frame returned when no caller is found.
pub const UNKNOWN_FUNCTION: &str = "unknown";

const CAPTURE_FN: &str = concat!(module_path!(), "::capture");

/// Snapshot of one stack frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    function: String,
    file: String,
    line: u32,
}

impl Frame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }

    /// The sentinel: function `"unknown"`, empty file, line 0.
    ///
    /// [`locate`] keeps the file and line and only blanks the function
    /// when no stack frame matches them.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_FUNCTION, "", 0)
    }

    /// Fully qualified function name, without the symbol hash
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Source file path, empty when debug info is unavailable
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Line number, 0 when debug info is unavailable
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn is_unknown(&self) -> bool {
        self.function == UNKNOWN_FUNCTION
    }

    fn from_symbol(function: String, symbol: &backtrace::Symbol) -> Self {
        let file = symbol
            .filename()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        Self {
            function,
            file,
            line: symbol.lineno().unwrap_or(0),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.function, self.file, self.line)
    }
}

/// Frame for a call site obtained from [`Location::caller`].
///
/// File and line are taken from `location`. The function name is the one
/// of the first stack frame resolving to that file and line; if none does,
/// for example because the binary has no line tables, it is `"unknown"`.
/// A frame that merely sits at the expected stack depth is never used.
#[inline(never)]
pub fn locate(location: &Location<'_>) -> Frame {
    let mut function: Option<String> = None;

    backtrace::trace(|raw| {
        backtrace::resolve_frame(raw, |symbol| {
            if function.is_some() || symbol.lineno() != Some(location.line()) {
                return;
            }
            if symbol
                .filename()
                .is_some_and(|file| same_file(file, location.file()))
            {
                function = symbol.name().map(|name| format!("{name:#}"));
            }
        });
        function.is_none()
    });

    let function = function.unwrap_or_else(|| {
        tracing::trace!(
            file = location.file(),
            line = location.line(),
            "no stack frame matches call site"
        );
        UNKNOWN_FUNCTION.to_string()
    });
    Frame::new(function, location.file(), location.line())
}

// Debug info usually holds absolute paths while `Location` holds the path
// as given to rustc, so either may be a suffix of the other.
fn same_file(symbol_file: &Path, location_file: &str) -> bool {
    let location_file = Path::new(location_file);
    symbol_file.ends_with(location_file) || location_file.ends_with(symbol_file)
}

/// Return the frame `skip` levels above the function that called `capture`.
///
/// Frames are counted as they exist at run time: a wrapper that the
/// optimizer inlined without line tables, or turned into a tail call, does
/// not occupy a slot. Use [`locate`] when the call site is known.
///
/// `capture(0)` yields the direct caller, `capture(1)` the caller's caller
/// and so on. If the stack is not deep enough, or symbols cannot be
/// resolved, [`Frame::unknown`] is returned. This never panics.
#[inline(never)]
pub fn capture(skip: usize) -> Frame {
    // Logical frame index of `capture` itself, once the walk reaches it.
    let mut anchor: Option<usize> = None;
    let mut index = 0usize;
    let mut found: Option<Frame> = None;

    backtrace::trace(|raw| {
        let mut resolved = false;
        backtrace::resolve_frame(raw, |symbol| {
            resolved = true;
            if found.is_some() {
                return;
            }
            let name = symbol
                .name()
                .map(|name| format!("{name:#}"))
                .unwrap_or_default();
            let current = anchor;
            match current {
                None if name == CAPTURE_FN => anchor = Some(index),
                Some(at) if is_target(at, skip, index) => {
                    found = Some(if name.is_empty() {
                        Frame::unknown()
                    } else {
                        Frame::from_symbol(name, symbol)
                    });
                }
                _ => {}
            }
            index += 1;
        });

        // A frame without symbols still occupies a slot on the stack.
        if !resolved {
            if found.is_none() && anchor.is_some_and(|at| is_target(at, skip, index)) {
                found = Some(Frame::unknown());
            }
            index += 1;
        }

        found.is_none()
    });

    found.unwrap_or_else(|| {
        tracing::trace!(
            skip,
            anchored = anchor.is_some(),
            depth = index,
            "caller frame not available"
        );
        Frame::unknown()
    })
}

fn is_target(anchor: usize, skip: usize, index: usize) -> bool {
    anchor
        .checked_add(1)
        .and_then(|first| first.checked_add(skip))
        .is_some_and(|target| target == index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ZError;
    use pretty_assertions::assert_eq;
    use std::hint::black_box;

    // `black_box` on the result keeps each wrapper out of tail position, so
    // its frame survives optimization.
    #[inline(never)]
    fn direct() -> (Frame, u32) {
        (black_box(capture(0)), line!())
    }

    #[inline(never)]
    fn outer() -> Frame {
        black_box(middle())
    }

    #[inline(never)]
    fn middle() -> Frame {
        black_box(inner())
    }

    #[inline(never)]
    fn inner() -> Frame {
        black_box(capture(2))
    }

    #[inline(never)]
    fn deep_one(skip: usize) -> Frame {
        black_box(deep_two(skip))
    }

    #[inline(never)]
    fn deep_two(skip: usize) -> Frame {
        black_box(deep_three(skip))
    }

    #[inline(never)]
    fn deep_three(skip: usize) -> Frame {
        black_box(capture(skip))
    }

    // No attributes: the optimizer is free to inline these or turn them
    // into tail calls.
    fn lvl1() -> (ZError, u32) {
        (ZError::fatal("deep"), line!())
    }

    fn lvl2() -> (ZError, u32) {
        lvl1()
    }

    fn lvl3() -> (ZError, u32) {
        lvl2()
    }

    #[test]
    fn test_capture_direct_caller() {
        let (frame, line) = direct();
        assert!(frame.function().ends_with("tests::direct"), "{frame}");
        assert!(frame.file().ends_with("frame.rs"), "{frame}");
        if cfg!(debug_assertions) {
            assert_eq!(frame.line(), line);
        }
    }

    #[test]
    fn test_capture_skips_wrappers() {
        let frame = outer();
        assert!(frame.function().ends_with("tests::outer"), "{frame}");
    }

    #[test]
    fn test_capture_one_level_up() {
        let frame = deep_one(1);
        assert!(frame.function().ends_with("tests::deep_two"), "{frame}");
    }

    #[test]
    fn test_capture_underflow_returns_sentinel() {
        let frame = deep_one(10_000);
        assert!(frame.is_unknown());
        assert_eq!(frame, Frame::unknown());
        assert_eq!(frame.function(), "unknown");
        assert_eq!(frame.file(), "");
        assert_eq!(frame.line(), 0);
    }

    #[test]
    fn test_capture_huge_skip_does_not_overflow() {
        assert!(deep_one(usize::MAX).is_unknown());
    }

    #[test]
    fn test_locate_call_site() {
        let (frame, line) = (locate(Location::caller()), line!());
        assert_eq!(frame.line(), line);
        assert!(frame.file().ends_with("frame.rs"), "{frame}");
        assert!(
            frame.function().ends_with("test_locate_call_site") || frame.is_unknown(),
            "{frame}"
        );
        if cfg!(debug_assertions) {
            assert!(frame.function().ends_with("test_locate_call_site"), "{frame}");
        }
    }

    #[test]
    fn test_locate_without_matching_frame() {
        let here = Location::caller();
        let frame = black_box(locate(here));
        assert!(frame.is_unknown(), "{frame}");
        assert_eq!(frame.line(), here.line());
        assert_eq!(frame.file(), here.file());
    }

    #[test]
    fn test_wrapped_constructor_reports_external_caller() {
        let (err, line) = lvl3();
        let frame = err.frame();
        assert_eq!(frame.line(), line);
        assert!(frame.file().ends_with("frame.rs"), "{frame}");
        assert!(
            frame.function().ends_with("tests::lvl1") || frame.is_unknown(),
            "{frame}"
        );
        assert!(!frame.function().contains("ZError"), "{frame}");
        assert!(!frame.function().contains("call_once"), "{frame}");
    }

    #[test]
    fn test_same_file_suffix_either_way() {
        assert!(same_file(Path::new("/src/app/src/lib.rs"), "src/lib.rs"));
        assert!(same_file(Path::new("src/lib.rs"), "/src/app/src/lib.rs"));
        assert!(!same_file(Path::new("/src/app/src/lib.rs"), "src/main.rs"));
    }

    #[test]
    fn test_frame_display() {
        let frame = Frame::new("app::run", "src/app.rs", 7);
        assert_eq!(frame.to_string(), "app::run (src/app.rs:7)");
        assert_eq!(Frame::default(), Frame::unknown());
    }
}
