//! Errors produced by the reporter itself, as opposed to the errors it
//! reports.

use core::fmt;
use std::io;

/// A destination failed to accept a report line.
///
/// The line that could not be written is kept so callers can fall back to
/// another channel. The destination's own error is available through
/// [`source`](core::error::Error::source).
#[derive(Debug)]
pub struct SinkError {
    line: String,
    source: io::Error,
}

impl SinkError {
    pub(crate) fn new(line: String, source: io::Error) -> Self {
        Self { line, source }
    }

    /// The fully rendered line, header included, that was not written.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// The destination's error.
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        &self.source
    }

    /// Consumes the error, returning the destination's error.
    #[must_use]
    pub fn into_io_error(self) -> io::Error {
        self.source
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to write report line: {}", self.source)
    }
}

impl core::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// The panic payload raised by [`Reporter::report_panicf`].
///
/// Its message is the caller's formatted text followed by the original error
/// message in parentheses: `format custom error info (error info)`.
///
/// [`Reporter::report_panicf`]: crate::Reporter::report_panicf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedError {
    message: String,
}

impl ComposedError {
    pub(crate) fn new(message: String) -> Self {
        Self { message }
    }

    /// The composed message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ComposedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl core::error::Error for ComposedError {}

/// Appends the original error message, in parentheses, to formatted text.
pub(crate) fn compose(args: fmt::Arguments<'_>, error: &dyn fmt::Display) -> String {
    format!("{args} ({error})")
}

#[cfg(test)]
mod tests {
    use core::error::Error as _;

    use super::*;

    #[test]
    fn test_errors_send_sync() {
        static_assertions::assert_impl_all!(SinkError: Send, Sync, core::error::Error);
        static_assertions::assert_impl_all!(ComposedError: Send, Sync, Clone, core::error::Error);
    }

    #[test]
    fn test_compose_order() {
        let message = compose(format_args!("format {}", "custom error info"), &"error info");
        assert_eq!(message, "format custom error info (error info)");
    }

    #[test]
    fn test_sink_error_keeps_line_and_source() {
        let error = SinkError::new(
            "lost line\n".to_owned(),
            io::Error::new(io::ErrorKind::WriteZero, "device full"),
        );
        assert_eq!(error.line(), "lost line\n");
        assert_eq!(error.io_error().kind(), io::ErrorKind::WriteZero);
        assert_eq!(
            error.to_string(),
            "failed to write report line: device full"
        );
        assert_eq!(error.source().unwrap().to_string(), "device full");
        assert_eq!(error.into_io_error().kind(), io::ErrorKind::WriteZero);
    }

    #[test]
    fn test_composed_error_displays_message() {
        let error = ComposedError::new("format x (error info)".to_owned());
        assert_eq!(error.to_string(), "format x (error info)");
        assert_eq!(error.message(), "format x (error info)");
    }
}
