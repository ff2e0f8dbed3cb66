//! The "is there an error?" decision shared by every reporting operation.

/// A value that either holds an error or holds none.
///
/// Every reporting operation starts by picking the error out of its input.
/// If there is none, the operation does nothing at all: no output, no exit,
/// no unwind.
///
/// Implemented for `Option<E>` and `Result<T, E>`, both owned and borrowed.
/// Borrowed inputs report through a reference and leave the value with the
/// caller.
///
/// [`report_panic`](crate::Reporter::report_panic) is the exception: its
/// panic payload is the picked error itself, which must be `Send + 'static`.
/// Picking from `&Result<T, E>` yields `&E`, so pass the owned value there
/// (or use [`report_panicf`](crate::Reporter::report_panicf), which only
/// needs `Display`).
///
/// ```compile_fail
/// let result: Result<(), std::io::Error> = Err(std::io::Error::other("error info"));
/// errpick::report_panic(&result);
/// ```
///
/// # Examples
///
/// ```
/// use errpick::Pick;
///
/// let failed: Result<u32, &str> = Err("timed out");
/// assert_eq!((&failed).pick(), Some(&"timed out"));
///
/// let fine: Option<std::io::Error> = None;
/// assert!(fine.pick().is_none());
/// ```
pub trait Pick {
    /// The error type held by the input.
    type Error;

    /// Returns the error, if there is one.
    fn pick(self) -> Option<Self::Error>;
}

impl<E> Pick for Option<E> {
    type Error = E;

    #[inline]
    fn pick(self) -> Option<E> {
        self
    }
}

impl<'a, E> Pick for &'a Option<E> {
    type Error = &'a E;

    #[inline]
    fn pick(self) -> Option<&'a E> {
        self.as_ref()
    }
}

impl<T, E> Pick for Result<T, E> {
    type Error = E;

    #[inline]
    fn pick(self) -> Option<E> {
        self.err()
    }
}

impl<'a, T, E> Pick for &'a Result<T, E> {
    type Error = &'a E;

    #[inline]
    fn pick(self) -> Option<&'a E> {
        self.as_ref().err()
    }
}
