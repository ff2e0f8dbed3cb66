//! Destinations that receive rendered report lines.
//!
//! A [`Destination`] is the narrow contract between a [`Sink`] and whatever
//! actually stores or displays the output: it is handed one complete line,
//! header and trailing newline included, per report.
//!
//! Destinations must make a single `write_line` call atomic with respect to
//! other callers. Lines from different threads may interleave, but a line
//! never gets torn.
//!
//! [`Sink`]: crate::Sink

use std::{
    io::{self, Write},
    sync::{Arc, Mutex, PoisonError},
};

/// Receives rendered report lines.
///
/// Errors returned from [`write_line`](Self::write_line) are passed back to
/// the caller of the reporting operation unchanged.
///
/// # Examples
///
/// ```
/// use std::io;
///
/// use errpick::Destination;
///
/// struct Discard;
///
/// impl Destination for Discard {
///     fn write_line(&self, _line: &str) -> io::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Destination: Send + Sync + 'static {
    /// Writes one line, including its trailing newline.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

impl<D: Destination + ?Sized> Destination for Box<D> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

impl<D: Destination + ?Sized> Destination for Arc<D> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// The standard error stream. This is the default destination.
#[derive(Debug, Copy, Clone, Default)]
pub struct Stderr;

impl Destination for Stderr {
    fn write_line(&self, line: &str) -> io::Result<()> {
        io::stderr().lock().write_all(line.as_bytes())
    }
}

/// The standard output stream, flushed after every line.
#[derive(Debug, Copy, Clone, Default)]
pub struct Stdout;

impl Destination for Stdout {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        stdout.flush()
    }
}

/// Any [`io::Write`] implementation behind a mutex.
///
/// ```
/// use errpick::{Flags, Reporter, Sink, destination::Writer};
///
/// let reporter = Reporter::with_sink(Sink::new(Writer::new(Vec::new()), "", Flags::NONE));
/// reporter.report(Some("disk full")).unwrap();
/// ```
#[derive(Debug)]
pub struct Writer<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send + 'static> Writer<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send + 'static> Destination for Writer<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

/// An in-memory destination that can be read back.
///
/// Clones share the same storage, so one clone can be installed in a
/// [`Sink`](crate::Sink) while another is kept around for inspection.
///
/// ```
/// use errpick::{Buffer, Flags, Reporter, Sink};
///
/// let buffer = Buffer::new();
/// let reporter = Reporter::with_sink(Sink::new(buffer.clone(), "", Flags::NONE));
///
/// reporter.report(Some("connection reset")).unwrap();
/// assert_eq!(buffer.contents(), "connection reset\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Buffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// The written lines, without their trailing newlines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns everything written so far and empties the buffer.
    #[must_use]
    pub fn take(&self) -> String {
        let bytes = core::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Destination for Buffer {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lock().extend_from_slice(line.as_bytes());
        Ok(())
    }
}
