//! The [`Reporter`]: conditional dispatch from an error slot to a sink.
//!
//! Each operation has the same shape. The error is picked out of its input
//! with [`Pick`]; if there is none, nothing happens. Otherwise the operation
//! reacts with its severity:
//!
//! | Operation | Error present |
//! |---|---|
//! | [`report`](Reporter::report) | writes the message |
//! | [`reportf`](Reporter::reportf) | writes `formatted (message)` |
//! | [`report_fatal`](Reporter::report_fatal) | writes the message, exits with [`FATAL_EXIT_CODE`] |
//! | [`report_fatalf`](Reporter::report_fatalf) | writes `formatted (message)`, exits with [`FATAL_EXIT_CODE`] |
//! | [`report_panic`](Reporter::report_panic) | panics with the error itself as payload |
//! | [`report_panicf`](Reporter::report_panicf) | panics with a [`ComposedError`] |
//!
//! # Call sites
//!
//! All operations are `#[track_caller]`. When the sink's flags ask for a file
//! name, the line names the code that called the reporter, not this module.
//!
//! # Unwinding
//!
//! The panic variants behave like any other panic: the process aborts or the
//! thread unwinds depending on the panic strategy. Code that wants to recover
//! must install a [`catch_unwind`](std::panic::catch_unwind) boundary and
//! downcast the payload.
//!
//! The payloads are error values, not strings, so the default panic hook
//! prints `Box<dyn Any>` instead of the message. The documentation of
//! [`Reporter::report_panic`] shows a hook that downcasts them.

use alloc::borrow::Cow;
use core::{any::Any, fmt};
use std::{
    io::{self, Write as _},
    sync::LazyLock,
};

use triomphe::Arc;

use crate::{
    destination::Destination,
    error::{ComposedError, SinkError, compose},
    flags::Flags,
    location::Location,
    pick::Pick,
    sink::Sink,
    sink_lock::SinkLock,
};

/// Exit status of the process after a fatal report.
pub const FATAL_EXIT_CODE: i32 = 1;

static GLOBAL: LazyLock<Reporter> = LazyLock::new(Reporter::new);

/// Reports errors to a replaceable [`Sink`].
///
/// Most programs use the process-wide instance through the crate's free
/// functions and macros ([`report`](crate::report()),
/// [`reportf!`](crate::reportf!), ...). Libraries and tests that want their
/// own configuration can construct a `Reporter` and pass it around instead.
///
/// # Examples
///
/// ```
/// use errpick::{Buffer, Flags, Reporter, Sink};
///
/// let buffer = Buffer::new();
/// let reporter = Reporter::with_sink(Sink::new(buffer.clone(), "", Flags::NONE));
///
/// let parsed: Result<u16, _> = "70000".parse::<u16>();
/// reporter
///     .reportf(&parsed, format_args!("invalid port {:?}", "70000"))
///     .unwrap();
///
/// assert_eq!(
///     buffer.contents(),
///     "invalid port \"70000\" (number too large to fit in target type)\n"
/// );
/// ```
pub struct Reporter {
    sink: SinkLock,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("sink", &*self.sink.load())
            .finish()
    }
}

impl Reporter {
    /// Creates a reporter with the default sink: standard error, no prefix,
    /// [`Flags::DEFAULT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Sink::default())
    }

    /// Creates a reporter writing to `sink`.
    #[must_use]
    pub fn with_sink(sink: Sink) -> Self {
        Self {
            sink: SinkLock::new(sink),
        }
    }

    /// The process-wide reporter used by the free functions and macros.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// A snapshot of the active sink.
    #[must_use]
    pub fn sink(&self) -> Arc<Sink> {
        self.sink.load()
    }

    /// Replaces the active sink with one built from the given parts.
    ///
    /// Takes effect for every subsequent report, from every thread. Reports
    /// already in flight finish with the sink they started with.
    ///
    /// ```
    /// use errpick::{Buffer, Flags, Reporter};
    ///
    /// let reporter = Reporter::new();
    /// let buffer = Buffer::new();
    /// reporter.configure(buffer.clone(), "db: ", Flags::NONE);
    ///
    /// reporter.report(Some("connection refused")).unwrap();
    /// assert_eq!(buffer.contents(), "db: connection refused\n");
    /// ```
    pub fn configure<D>(&self, destination: D, prefix: impl Into<Cow<'static, str>>, flags: Flags)
    where
        D: Destination,
    {
        self.sink.swap(Sink::new(destination, prefix, flags));
    }

    /// Installs a prebuilt sink, returning the previous one.
    pub fn replace(&self, sink: Sink) -> Arc<Sink> {
        self.sink.swap(sink)
    }

    /// Writes the error message as one line, if there is an error.
    ///
    /// # Errors
    ///
    /// Returns the destination's failure, if writing the line failed.
    #[track_caller]
    pub fn report<P>(&self, err: P) -> Result<(), SinkError>
    where
        P: Pick,
        P::Error: fmt::Display,
    {
        match err.pick() {
            Some(error) => self.dump(Location::caller(), &error.to_string()),
            None => Ok(()),
        }
    }

    /// Writes `args` followed by the error message in parentheses, if there
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns the destination's failure, if writing the line failed.
    #[track_caller]
    pub fn reportf<P>(&self, err: P, args: fmt::Arguments<'_>) -> Result<(), SinkError>
    where
        P: Pick,
        P::Error: fmt::Display,
    {
        match err.pick() {
            Some(error) => self.dump(Location::caller(), &compose(args, &error)),
            None => Ok(()),
        }
    }

    /// Writes the error message and exits the process with
    /// [`FATAL_EXIT_CODE`], if there is an error.
    ///
    /// Destructors of the current stack do not run.
    #[track_caller]
    pub fn report_fatal<P>(&self, err: P)
    where
        P: Pick,
        P::Error: fmt::Display,
    {
        if let Some(error) = err.pick() {
            self.die(Location::caller(), &error.to_string());
        }
    }

    /// Writes `args` followed by the error message in parentheses and exits
    /// the process with [`FATAL_EXIT_CODE`], if there is an error.
    #[track_caller]
    pub fn report_fatalf<P>(&self, err: P, args: fmt::Arguments<'_>)
    where
        P: Pick,
        P::Error: fmt::Display,
    {
        if let Some(error) = err.pick() {
            self.die(Location::caller(), &compose(args, &error));
        }
    }

    /// Panics with the error itself as payload, if there is an error.
    ///
    /// Nothing is written to the sink. The payload can be recovered with
    /// [`catch_unwind`](std::panic::catch_unwind) and a downcast to
    /// `P::Error`. An uncaught panic shows `Box<dyn Any>` under the default
    /// hook. A hook that knows the payload types prints the error instead:
    ///
    /// ```
    /// use std::{io, panic};
    ///
    /// use errpick::ComposedError;
    ///
    /// let default_hook = panic::take_hook();
    /// panic::set_hook(Box::new(move |info| {
    ///     let payload = info.payload();
    ///     if let Some(error) = payload.downcast_ref::<ComposedError>() {
    ///         eprintln!("panicked at {}: {error}", info.location().unwrap());
    ///     } else if let Some(error) = payload.downcast_ref::<io::Error>() {
    ///         eprintln!("panicked at {}: {error}", info.location().unwrap());
    ///     } else {
    ///         default_hook(info);
    ///     }
    /// }));
    /// ```
    ///
    /// Unlike the other operations, this needs an owned `'static` error to
    /// move into the payload, so `&Result` and `&Option` inputs only work
    /// when they borrow `'static` data.
    ///
    /// ```
    /// use std::{io, panic};
    ///
    /// use errpick::Reporter;
    ///
    /// let payload = panic::catch_unwind(|| {
    ///     Reporter::global().report_panic(Some(io::Error::other("error info")));
    /// })
    /// .unwrap_err();
    ///
    /// let error = payload.downcast::<io::Error>().unwrap();
    /// assert_eq!(error.to_string(), "error info");
    /// ```
    #[track_caller]
    pub fn report_panic<P>(&self, err: P)
    where
        P: Pick,
        P::Error: Any + Send,
    {
        if let Some(error) = err.pick() {
            std::panic::panic_any(error);
        }
    }

    /// Panics with a [`ComposedError`] holding `args` followed by the error
    /// message in parentheses, if there is an error.
    ///
    /// The message is built before unwinding, so borrowed inputs work here.
    /// Downcast the payload to [`ComposedError`] to read it; the default hook
    /// shows `Box<dyn Any>` (see [`report_panic`](Self::report_panic)).
    #[track_caller]
    pub fn report_panicf<P>(&self, err: P, args: fmt::Arguments<'_>)
    where
        P: Pick,
        P::Error: fmt::Display,
    {
        if let Some(error) = err.pick() {
            std::panic::panic_any(ComposedError::new(compose(args, &error)));
        }
    }

    fn dump(&self, location: Location, message: &str) -> Result<(), SinkError> {
        self.sink.load().emit(&location, message)
    }

    pub(crate) fn die(&self, location: Location, message: &str) -> ! {
        if let Err(error) = self.dump(location, message) {
            // Last resort: the configured destination is gone.
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "{error}");
            let _ = stderr.write_all(error.line().as_bytes());
        }
        std::process::exit(FATAL_EXIT_CODE)
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;
    use crate::destination::Buffer;

    #[derive(Debug, thiserror::Error)]
    #[error("error info")]
    struct InfoError;

    fn buffered() -> (Reporter, Buffer) {
        let buffer = Buffer::new();
        let reporter = Reporter::with_sink(Sink::new(buffer.clone(), "", Flags::NONE));
        (reporter, buffer)
    }

    #[test]
    fn test_reporter_send_sync() {
        static_assertions::assert_impl_all!(Reporter: Send, Sync, Default);
    }

    #[test]
    fn test_report_present() {
        let (reporter, buffer) = buffered();
        reporter.report(Some(InfoError)).unwrap();
        assert_eq!(buffer.contents().trim_end(), "error info");
    }

    #[test]
    fn test_report_absent() {
        let (reporter, buffer) = buffered();
        reporter.report(None::<InfoError>).unwrap();
        reporter.report(Ok::<_, InfoError>(())).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_reportf_composes() {
        let (reporter, buffer) = buffered();
        let result: Result<(), InfoError> = Err(InfoError);
        reporter
            .reportf(&result, format_args!("format {}", "custom error info"))
            .unwrap();
        assert_eq!(
            buffer.contents().trim_end(),
            "format custom error info (error info)"
        );
    }

    #[test]
    fn test_reportf_absent() {
        let (reporter, buffer) = buffered();
        reporter
            .reportf(None::<InfoError>, format_args!("format {}", "custom error info"))
            .unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_fatal_absent_returns() {
        let (reporter, buffer) = buffered();
        reporter.report_fatal(None::<InfoError>);
        reporter.report_fatalf(Ok::<_, InfoError>(1), format_args!("format"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_report_panic_carries_error() {
        let (reporter, buffer) = buffered();
        let payload = panic::catch_unwind(AssertUnwindSafe(|| {
            reporter.report_panic(Some(InfoError));
        }))
        .unwrap_err();

        let error = payload.downcast::<InfoError>().unwrap();
        assert_eq!(error.to_string(), "error info");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_report_panicf_carries_composed_error() {
        let (reporter, _buffer) = buffered();
        let payload = panic::catch_unwind(AssertUnwindSafe(|| {
            reporter.report_panicf(Some(InfoError), format_args!("format {}", "custom error info"));
        }))
        .unwrap_err();

        let error = payload.downcast::<ComposedError>().unwrap();
        assert_eq!(error.to_string(), "format custom error info (error info)");
    }

    #[test]
    fn test_panic_absent_returns() {
        let (reporter, _buffer) = buffered();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            reporter.report_panic(None::<InfoError>);
            reporter.report_panicf(Ok::<_, InfoError>(()), format_args!("format"));
        }));
        assert!(result.is_ok());
    }

    #[test]
    fn test_replace_and_configure() {
        let (reporter, first) = buffered();
        let second = Buffer::new();

        let previous = reporter.replace(Sink::new(second.clone(), "2: ", Flags::NONE));
        assert_eq!(previous.prefix(), "");
        reporter.report(Some("a")).unwrap();

        let third = Buffer::new();
        reporter.configure(third.clone(), "3: ", Flags::NONE);
        reporter.report(Some("b")).unwrap();

        assert!(first.is_empty());
        assert_eq!(second.contents(), "2: a\n");
        assert_eq!(third.contents(), "3: b\n");
        assert_eq!(reporter.sink().prefix(), "3: ");
    }

    #[test]
    fn test_location_names_caller() {
        let buffer = Buffer::new();
        let reporter = Reporter::with_sink(Sink::new(buffer.clone(), "", Flags::SHORT_FILE));

        let line = line!() + 1;
        reporter.report(Some(InfoError)).unwrap();

        assert_eq!(buffer.contents(), format!("reporter.rs:{line}: error info\n"));
    }
}
