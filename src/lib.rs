#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Conditional error reporting.
//!
//! `errpick` looks at a value that may or may not hold an error and decides
//! how to react. If there is no error, nothing happens. If there is one, it
//! is written to a configurable sink, written and followed by process exit,
//! or raised as a panic, depending on the operation called.
//!
//! # Quick Start
//!
//! ```
//! use errpick::{Buffer, Flags, reportf};
//!
//! // Send reports to an in-memory buffer without any header.
//! let buffer = Buffer::new();
//! errpick::configure(buffer.clone(), "", Flags::NONE);
//!
//! let absent: Result<(), std::io::Error> = Ok(());
//! errpick::report(&absent).unwrap(); // nothing happens
//!
//! let present: Result<(), std::io::Error> = Err(std::io::Error::other("error info"));
//! errpick::report(&present).unwrap();
//! reportf!(&present, "format {}", "custom error info").unwrap();
//!
//! assert_eq!(
//!     buffer.contents(),
//!     "error info\nformat custom error info (error info)\n"
//! );
//! ```
//!
//! # Operations
//!
//! | Error present | Plain | Formatted |
//! |---|---|---|
//! | write a line | [`report`] | [`reportf!`] |
//! | write a line, then exit with status 1 | [`report_fatal`] | [`report_fatalf!`] |
//! | panic | [`report_panic`] | [`report_panicf!`] |
//!
//! Formatted variants write the formatted text followed by the error message
//! in parentheses: `format custom error info (error info)`.
//!
//! The free functions and macros use the process-wide [`Reporter::global`].
//! Any [`Reporter`] can be constructed and passed around explicitly instead;
//! its methods take [`format_args!`] in place of the macros' variadic
//! arguments.
//!
//! # Configuration
//!
//! Reports go to a [`Sink`]: a [`Destination`], a fixed prefix and header
//! [`Flags`]. The default is standard error, no prefix, and the time plus the
//! caller's file and line:
//!
//! ```text
//! 14:03:27 main.rs:42: connection refused
//! ```
//!
//! [`configure`] and [`Reporter::replace`] swap the sink as a whole, so
//! concurrent reports see either the old or the new configuration and never
//! a mix of both.
//!
//! # Error absence
//!
//! Anything implementing [`Pick`] can be reported: `Option<E>` and
//! `Result<T, E>`, owned or borrowed. `None` and `Ok` are the absent case.

extern crate alloc;

#[macro_use]
mod macros;

pub mod destination;
mod error;
mod flags;
mod location;
mod pick;
mod reporter;
mod result_ext;
mod sink;
mod sink_lock;

use alloc::borrow::Cow;
use core::{any::Any, fmt};

pub use self::{
    destination::{Buffer, Destination},
    error::{ComposedError, SinkError},
    flags::{Flags, ParseFlagsError},
    location::Location,
    pick::Pick,
    reporter::{FATAL_EXIT_CODE, Reporter},
    result_ext::ResultExt,
    sink::Sink,
};

/// Writes the error message as one line through the global reporter, if
/// there is an error.
///
/// # Errors
///
/// Returns the destination's failure, if writing the line failed.
#[track_caller]
pub fn report<P>(err: P) -> Result<(), SinkError>
where
    P: Pick,
    P::Error: fmt::Display,
{
    Reporter::global().report(err)
}

/// Writes the error message and exits with [`FATAL_EXIT_CODE`] through the
/// global reporter, if there is an error.
#[track_caller]
pub fn report_fatal<P>(err: P)
where
    P: Pick,
    P::Error: fmt::Display,
{
    Reporter::global().report_fatal(err);
}

/// Panics with the error itself as payload, if there is an error.
#[track_caller]
pub fn report_panic<P>(err: P)
where
    P: Pick,
    P::Error: Any + Send,
{
    Reporter::global().report_panic(err);
}

/// Replaces the global reporter's sink.
///
/// Affects every later report from every thread.
pub fn configure<D>(destination: D, prefix: impl Into<Cow<'static, str>>, flags: Flags)
where
    D: Destination,
{
    Reporter::global().configure(destination, prefix, flags);
}

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub use core::format_args;
}
