#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Forward errpick reports into `tracing`.
//!
//! [`TracingDestination`] turns every reported line into one `tracing` event
//! with target [`TARGET`], so reports end up wherever the application's
//! subscriber sends its logs.
//!
//! # Quick Start
//!
//! ```
//! use tracing::Level;
//!
//! // Install your subscriber as usual.
//! let subscriber = tracing_subscriber::fmt().with_writer(std::io::stderr).finish();
//! tracing::subscriber::set_global_default(subscriber).expect("failed to set subscriber");
//!
//! // Route the global reporter into tracing.
//! errpick_tracing::install(Level::ERROR);
//!
//! let result: Result<(), std::io::Error> = Err(std::io::Error::other("disk full"));
//! errpick::report(&result).unwrap();
//! // ERROR errpick: main.rs:14: disk full
//! ```
//!
//! The subscriber already stamps events with a time, so [`install`] keeps
//! only the caller's file and line in the report header.

use std::io;

use errpick::{Destination, Flags, Reporter};
use tracing::Level;

/// The target of every event emitted by [`TracingDestination`].
pub const TARGET: &str = "errpick";

/// A [`Destination`] that emits each line as a `tracing` event.
///
/// The trailing newline is stripped; the event message is the rest of the
/// line, header included.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TracingDestination {
    level: Level,
}

impl TracingDestination {
    /// Emits events at `level`.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self { level }
    }

    /// The level events are emitted at.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }
}

impl Default for TracingDestination {
    fn default() -> Self {
        Self::new(Level::ERROR)
    }
}

impl Destination for TracingDestination {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let message = line.strip_suffix('\n').unwrap_or(line);

        // `event!` needs a constant level.
        if self.level == Level::ERROR {
            tracing::error!(target: TARGET, "{message}");
        } else if self.level == Level::WARN {
            tracing::warn!(target: TARGET, "{message}");
        } else if self.level == Level::INFO {
            tracing::info!(target: TARGET, "{message}");
        } else if self.level == Level::DEBUG {
            tracing::debug!(target: TARGET, "{message}");
        } else {
            tracing::trace!(target: TARGET, "{message}");
        }

        Ok(())
    }
}

/// Routes the global reporter into `tracing` at `level`.
///
/// The report header keeps [`Flags::SHORT_FILE`] only.
pub fn install(level: Level) {
    install_on(Reporter::global(), level);
}

/// Routes `reporter` into `tracing` at `level`.
pub fn install_on(reporter: &Reporter, level: Level) {
    reporter.configure(TracingDestination::new(level), "", Flags::SHORT_FILE);
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex, PoisonError};

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("error info")]
    struct InfoError;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn with_capture(max_level: Level, f: impl FnOnce()) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(max_level)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        capture.contents()
    }

    #[test]
    fn test_destination_send_sync() {
        static_assertions::assert_impl_all!(TracingDestination: Destination, Send, Sync, Copy);
    }

    #[test]
    fn test_report_becomes_event() {
        let reporter = Reporter::new();
        install_on(&reporter, Level::WARN);

        let mut line = 0;
        let output = with_capture(Level::TRACE, || {
            line = line!() + 1;
            reporter.report(Some(InfoError)).unwrap();
        });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1, "{output}");
        assert!(lines[0].contains("WARN"), "{output}");
        assert!(lines[0].contains(TARGET), "{output}");
        assert!(
            lines[0].ends_with(&format!("lib.rs:{line}: error info")),
            "{output}"
        );
    }

    #[test]
    fn test_levels_are_filtered_by_subscriber() {
        let reporter = Reporter::new();
        install_on(&reporter, Level::DEBUG);

        let output = with_capture(Level::INFO, || {
            reporter
                .reportf(Some(InfoError), format_args!("format {}", "custom error info"))
                .unwrap();
        });
        assert!(output.is_empty(), "{output}");

        let output = with_capture(Level::DEBUG, || {
            reporter
                .reportf(Some(InfoError), format_args!("format {}", "custom error info"))
                .unwrap();
        });
        assert!(
            output.trim_end().ends_with("format custom error info (error info)"),
            "{output}"
        );
    }

    #[test]
    fn test_absent_error_emits_nothing() {
        let reporter = Reporter::new();
        install_on(&reporter, Level::ERROR);

        let output = with_capture(Level::TRACE, || {
            reporter.report(None::<InfoError>).unwrap();
        });
        assert!(output.is_empty(), "{output}");
    }

    #[test]
    fn test_default_level() {
        assert_eq!(TracingDestination::default().level(), Level::ERROR);
    }
}
