/// Writes a formatted message followed by the error in parentheses, if there
/// is an error, through the global reporter.
///
/// Expands to [`Reporter::reportf`] on [`Reporter::global`] and evaluates to
/// its `Result`.
///
/// [`Reporter::reportf`]: crate::Reporter::reportf
/// [`Reporter::global`]: crate::Reporter::global
///
/// # Examples
///
/// ```
/// use errpick::{Buffer, Flags, reportf};
///
/// let buffer = Buffer::new();
/// errpick::configure(buffer.clone(), "", Flags::NONE);
///
/// let opened = std::fs::File::open("/definitely/not/here");
/// reportf!(&opened, "opening {}", "/definitely/not/here").unwrap();
///
/// assert!(buffer.contents().starts_with("opening /definitely/not/here ("));
/// ```
#[macro_export]
macro_rules! reportf {
    ($err:expr, $($arg:tt)+) => {
        $crate::Reporter::global().reportf($err, $crate::__private::format_args!($($arg)+))
    };
}

/// Writes a formatted message followed by the error in parentheses and exits
/// with [`FATAL_EXIT_CODE`], if there is an error, through the global
/// reporter.
///
/// [`FATAL_EXIT_CODE`]: crate::FATAL_EXIT_CODE
///
/// # Examples
///
/// ```no_run
/// use errpick::report_fatalf;
///
/// let listener = std::net::TcpListener::bind("127.0.0.1:80");
/// report_fatalf!(&listener, "cannot bind port {}", 80);
/// ```
#[macro_export]
macro_rules! report_fatalf {
    ($err:expr, $($arg:tt)+) => {
        $crate::Reporter::global().report_fatalf($err, $crate::__private::format_args!($($arg)+))
    };
}

/// Panics with a [`ComposedError`] holding a formatted message followed by
/// the error in parentheses, if there is an error.
///
/// [`ComposedError`]: crate::ComposedError
///
/// # Examples
///
/// ```should_panic
/// use errpick::report_panicf;
///
/// let parsed = "x".parse::<i32>();
/// report_panicf!(&parsed, "bad value {:?}", "x");
/// ```
#[macro_export]
macro_rules! report_panicf {
    ($err:expr, $($arg:tt)+) => {
        $crate::Reporter::global().report_panicf($err, $crate::__private::format_args!($($arg)+))
    };
}
