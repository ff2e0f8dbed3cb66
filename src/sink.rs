//! The immutable reporting configuration: where lines go and what header
//! they carry.

use alloc::borrow::Cow;
use core::fmt::{self, Write as _};

use chrono::{Local, NaiveDateTime, Utc};

use crate::{
    destination::{Destination, Stderr},
    error::SinkError,
    flags::Flags,
    location::Location,
};

/// A destination together with a fixed prefix and header [`Flags`].
///
/// A `Sink` is never modified after construction. Reconfiguring a
/// [`Reporter`](crate::Reporter) swaps in a whole new `Sink`, so a report is
/// always rendered and written with one consistent configuration.
///
/// # Examples
///
/// ```
/// use errpick::{Buffer, Flags, Reporter, Sink};
///
/// let buffer = Buffer::new();
/// let sink = Sink::new(buffer.clone(), "[worker] ", Flags::NONE);
/// let reporter = Reporter::with_sink(sink);
///
/// reporter.report(Some("queue closed")).unwrap();
/// assert_eq!(buffer.contents(), "[worker] queue closed\n");
/// ```
pub struct Sink {
    destination: Box<dyn Destination>,
    prefix: Cow<'static, str>,
    flags: Flags,
}

impl Default for Sink {
    /// Standard error, no prefix, [`Flags::DEFAULT`].
    fn default() -> Self {
        Self::new(Stderr, "", Flags::DEFAULT)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl Sink {
    /// Creates a sink writing to `destination`.
    pub fn new<D>(destination: D, prefix: impl Into<Cow<'static, str>>, flags: Flags) -> Self
    where
        D: Destination,
    {
        Self {
            destination: Box::new(destination),
            prefix: prefix.into(),
            flags,
        }
    }

    /// Returns a copy of this configuration with a different prefix.
    ///
    /// The destination is moved, not copied.
    #[must_use]
    pub fn with_prefix(self, prefix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            prefix: prefix.into(),
            ..self
        }
    }

    /// Returns a copy of this configuration with different flags.
    #[must_use]
    pub fn with_flags(self, flags: Flags) -> Self {
        Self { flags, ..self }
    }

    /// The fixed prefix of every line.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The header flags.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// The destination lines are written to.
    #[must_use]
    pub fn destination(&self) -> &dyn Destination {
        &*self.destination
    }

    /// Renders `message` as it would be written when reported from
    /// `location` right now.
    #[must_use]
    pub fn render(&self, location: &Location, message: &str) -> String {
        let timestamp = self.flags.wants_timestamp().then(|| {
            if self.flags.contains(Flags::UTC) {
                Utc::now().naive_utc()
            } else {
                Local::now().naive_local()
            }
        });
        self.render_at(timestamp, location, message)
    }

    /// Renders and writes one line.
    pub(crate) fn emit(&self, location: &Location, message: &str) -> Result<(), SinkError> {
        let line = self.render(location, message);
        self.destination
            .write_line(&line)
            .map_err(|source| SinkError::new(line, source))
    }

    fn render_at(
        &self,
        timestamp: Option<NaiveDateTime>,
        location: &Location,
        message: &str,
    ) -> String {
        let mut line = String::with_capacity(self.prefix.len() + message.len() + 48);
        // Writing into a String cannot fail.
        let _ = self.write_header(&mut line, timestamp, location);
        line.push_str(message);
        if !message.ends_with('\n') {
            line.push('\n');
        }
        line
    }

    fn write_header(
        &self,
        out: &mut String,
        timestamp: Option<NaiveDateTime>,
        location: &Location,
    ) -> fmt::Result {
        let flags = self.flags;

        if !flags.contains(Flags::MSG_PREFIX) {
            out.push_str(&self.prefix);
        }

        if let Some(timestamp) = timestamp {
            if flags.contains(Flags::DATE) {
                write!(out, "{} ", timestamp.format("%Y/%m/%d"))?;
            }
            if flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
                write!(out, "{}", timestamp.format("%H:%M:%S"))?;
                if flags.contains(Flags::MICROSECONDS) {
                    write!(out, "{}", timestamp.format("%.6f"))?;
                }
                out.push(' ');
            }
        }

        if flags.wants_location() {
            let file = if flags.contains(Flags::SHORT_FILE) {
                location.short_file()
            } else {
                location.file
            };
            write!(out, "{file}:{}: ", location.line)?;
        }

        if flags.contains(Flags::MSG_PREFIX) {
            out.push_str(&self.prefix);
        }

        Ok(())
    }
}
