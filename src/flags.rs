//! Metadata flags controlling the header of every reported line.
//!
//! The header is built in a fixed order: prefix, date, time, call site,
//! message. Each flag switches one piece on:
//!
//! | Flag | Output |
//! |---|---|
//! | [`DATE`](Flags::DATE) | `2009/01/23 ` |
//! | [`TIME`](Flags::TIME) | `01:23:23 ` |
//! | [`MICROSECONDS`](Flags::MICROSECONDS) | `01:23:23.123123 ` (implies `TIME`) |
//! | [`LONG_FILE`](Flags::LONG_FILE) | `src/server/handler.rs:23: ` |
//! | [`SHORT_FILE`](Flags::SHORT_FILE) | `handler.rs:23: ` (overrides `LONG_FILE`) |
//! | [`UTC`](Flags::UTC) | use UTC instead of the local time zone |
//! | [`MSG_PREFIX`](Flags::MSG_PREFIX) | move the prefix right before the message |
//!
//! Flags can also be parsed from configuration strings:
//!
//! ```
//! use errpick::Flags;
//!
//! let flags: Flags = "date, time, shortfile".parse().unwrap();
//! assert_eq!(flags, Flags::DATE | Flags::TIME | Flags::SHORT_FILE);
//! assert_eq!(flags.to_string(), "date|time|shortfile");
//! ```

use core::{fmt, str::FromStr};

bitflags::bitflags! {
    /// A set of header flags for a [`Sink`](crate::Sink).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// The date in the local time zone: `2009/01/23`.
        const DATE = 1 << 0;
        /// The time in the local time zone: `01:23:23`.
        const TIME = 1 << 1;
        /// Microsecond resolution: `01:23:23.123123`. Implies `TIME`.
        const MICROSECONDS = 1 << 2;
        /// Full file name and line number: `/a/b/c/d.rs:23`.
        const LONG_FILE = 1 << 3;
        /// Final file name element and line number: `d.rs:23`.
        const SHORT_FILE = 1 << 4;
        /// Use UTC rather than the local time zone.
        const UTC = 1 << 5;
        /// Move the prefix from the beginning of the line to before the message.
        const MSG_PREFIX = 1 << 6;
    }
}

impl Flags {
    /// No header at all: lines contain the prefix and message only.
    pub const NONE: Self = Self::empty();
    /// Date and time, the usual logger header.
    pub const STD: Self = Self::DATE.union(Self::TIME);
    /// Time and short file name, the header used when nothing is configured.
    pub const DEFAULT: Self = Self::TIME.union(Self::SHORT_FILE);

    #[must_use]
    pub(crate) const fn wants_timestamp(self) -> bool {
        self.intersects(Self::DATE.union(Self::TIME).union(Self::MICROSECONDS))
    }

    #[must_use]
    pub(crate) const fn wants_location(self) -> bool {
        self.intersects(Self::LONG_FILE.union(Self::SHORT_FILE))
    }

    /// Looks up a single flag by its configuration name (`shortfile` for
    /// `SHORT_FILE`), ignoring case.
    fn from_config_name(name: &str) -> Option<Self> {
        Self::all()
            .iter_names()
            .find(|(constant, _)| config_name_eq(constant, name))
            .map(|(_, flag)| flag)
    }
}

/// Compares a constant name (`SHORT_FILE`) with a configuration name
/// (`shortfile`).
fn config_name_eq(constant: &str, name: &str) -> bool {
    let mut constant = constant.bytes().filter(|byte| *byte != b'_');
    let mut name = name.bytes();
    loop {
        match (constant.next(), name.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => {}
            _ => return false,
        }
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }

        for (index, (constant, _)) in self.iter_names().enumerate() {
            if index > 0 {
                f.write_str("|")?;
            }
            for ch in constant.chars().filter(|ch| *ch != '_') {
                write!(f, "{}", ch.to_ascii_lowercase())?;
            }
        }
        Ok(())
    }
}

/// Error returned when a flag name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFlagsError {
    name: String,
}

impl ParseFlagsError {
    /// The flag name that failed to parse.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ParseFlagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown report flag `{}`", self.name)
    }
}

impl core::error::Error for ParseFlagsError {}

impl FromStr for Flags {
    type Err = ParseFlagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::NONE;

        for name in s.split([',', '|']).map(str::trim).filter(|n| !n.is_empty()) {
            flags |= if name.eq_ignore_ascii_case("none") {
                Self::NONE
            } else if name.eq_ignore_ascii_case("std") {
                Self::STD
            } else if name.eq_ignore_ascii_case("default") {
                Self::DEFAULT
            } else {
                Self::from_config_name(name).ok_or_else(|| ParseFlagsError {
                    name: name.to_owned(),
                })?
            };
        }

        Ok(flags)
    }
}
