//! Extension methods that unwrap a [`Result`] or end the process.
//!
//! ```no_run
//! use errpick::ResultExt;
//!
//! let config = std::fs::read_to_string("app.toml")
//!     .unwrap_or_fatalf(format_args!("cannot read {}", "app.toml"));
//! # drop(config);
//! ```

use core::fmt;

use crate::{Reporter, error::compose, location::Location};

/// Unwrapping through the global [`Reporter`]'s fatal path.
pub trait ResultExt<T, E> {
    /// Returns the `Ok` value, or reports the error and exits with
    /// [`FATAL_EXIT_CODE`](crate::FATAL_EXIT_CODE).
    fn unwrap_or_fatal(self) -> T;

    /// Returns the `Ok` value, or reports `args` followed by the error in
    /// parentheses and exits with [`FATAL_EXIT_CODE`](crate::FATAL_EXIT_CODE).
    fn unwrap_or_fatalf(self, args: fmt::Arguments<'_>) -> T;
}

impl<T, E: fmt::Display> ResultExt<T, E> for Result<T, E> {
    #[track_caller]
    fn unwrap_or_fatal(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => Reporter::global().die(Location::caller(), &error.to_string()),
        }
    }

    #[track_caller]
    fn unwrap_or_fatalf(self, args: fmt::Arguments<'_>) -> T {
        match self {
            Ok(value) => value,
            Err(error) => Reporter::global().die(Location::caller(), &compose(args, &error)),
        }
    }
}
