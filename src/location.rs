//! Source code location of a reporting call.

use core::fmt;

/// Source code location information.
///
/// Represents the file, line, and column of the call that reported an
/// error. This information is captured using
/// [`core::panic::Location::caller()`], so it names the caller of the
/// reporting operation rather than anything inside this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// The source file path, as seen by the compiler.
    pub file: &'static str,
    /// The line number of the reporting call.
    pub line: u32,
    /// The column number of the reporting call.
    pub column: u32,
}

impl Location {
    /// Captures the location of the caller.
    ///
    /// Every frame between the public entry point and this call must carry
    /// `#[track_caller]` for the result to point at user code.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        core::panic::Location::caller().into()
    }

    /// The final path component of [`file`](Self::file).
    ///
    /// # Examples
    ///
    /// ```
    /// use errpick::Location;
    ///
    /// let location = Location {
    ///     file: "src/bin/server.rs",
    ///     line: 7,
    ///     column: 5,
    /// };
    /// assert_eq!(location.short_file(), "server.rs");
    /// ```
    #[must_use]
    pub fn short_file(&self) -> &'static str {
        match self.file.rfind(['/', '\\']) {
            Some(index) => &self.file[index + 1..],
            None => self.file,
        }
    }
}

impl From<&core::panic::Location<'static>> for Location {
    fn from(location: &core::panic::Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
