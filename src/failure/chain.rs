//! Identity-preserving failure values.
//!
//! A [`Failure`] holds one root cause and an ordered list of annotations.
//! Annotations only ever get appended, so the root cause seen by the top-level
//! caller is the one the leaf operation produced.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;

use crate::failure::frame::Frame;
use crate::failure::sentinel::Sentinel;

/// Alias for a type-erased error.
pub type BoxError = Box<dyn StdError + Send + Sync>;

enum Origin {
    Sentinel(&'static Sentinel),
    Error(BoxError),
}

/// A context message and the place it was attached.
#[derive(Debug)]
pub struct Annotation {
    message: String,
    frame: Frame,
}

impl Annotation {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}

/// A root cause plus the context every layer added on the way up.
///
/// `{}` prints a single line, outermost context first.
/// `{:#}` and `{:?}` print the full report: root message, then each
/// annotation with its owner and source position, then the backtrace if
/// one was captured.
pub struct Failure {
    origin: Origin,
    annotations: Vec<Annotation>,
    backtrace: Backtrace,
}

impl Failure {
    /// Root a failure at a sentinel.
    pub fn wrap(sentinel: &'static Sentinel, message: impl Into<String>, frame: Frame) -> Self {
        Self::rooted(Origin::Sentinel(sentinel), message.into(), frame)
    }

    /// Root a failure at an arbitrary error. Whatever that error's own source
    /// chain ends in stays visible through [`Failure::cause`].
    pub fn from_error(err: impl Into<BoxError>, message: impl Into<String>, frame: Frame) -> Self {
        Self::rooted(Origin::Error(err.into()), message.into(), frame)
    }

    fn rooted(origin: Origin, message: String, frame: Frame) -> Self {
        Self {
            origin,
            annotations: vec![Annotation { message, frame }],
            backtrace: Backtrace::capture(),
        }
    }

    /// Append context without touching the root cause.
    pub fn with_message(mut self, message: impl Into<String>, frame: Frame) -> Self {
        self.annotations.push(Annotation {
            message: message.into(),
            frame,
        });
        self
    }

    /// Annotations, innermost first.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The error this failure was rooted at.
    pub fn root(&self) -> &(dyn StdError + 'static) {
        match &self.origin {
            Origin::Sentinel(sentinel) => *sentinel,
            Origin::Error(err) => &**err,
        }
    }

    /// The deepest error in the source chain. Nested failures and wrapper
    /// errors are looked through.
    pub fn cause(&self) -> &(dyn StdError + 'static) {
        let mut cause = self.root();
        while let Some(next) = cause.source() {
            cause = next;
        }
        cause
    }

    /// Direct identity comparison of the root cause.
    pub fn cause_is(&self, target: &'static Sentinel) -> bool {
        self.cause()
            .downcast_ref::<Sentinel>()
            .is_some_and(|sentinel| sentinel.same(target))
    }

    /// Walk the source chain looking for `target`.
    pub fn is(&self, target: &'static Sentinel) -> bool {
        is(self, target)
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    fn report(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Origin::Sentinel(sentinel) => write!(f, "{sentinel}")?,
            Origin::Error(err) => write!(f, "{err:#}")?,
        }
        for annotation in &self.annotations {
            let location = annotation.frame.location();
            write!(
                f,
                "\n{}\n    {}\n        {}:{}:{}",
                annotation.message,
                annotation.frame.owner(),
                location.file(),
                location.line(),
                location.column()
            )?;
        }
        if self.backtrace.status() == BacktraceStatus::Captured {
            write!(f, "\n\nstack backtrace:\n{}", self.backtrace)?;
        }
        Ok(())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return self.report(f);
        }
        for annotation in self.annotations.iter().rev() {
            write!(f, "{}: ", annotation.message)?;
        }
        match &self.origin {
            Origin::Sentinel(sentinel) => write!(f, "{sentinel}"),
            Origin::Error(err) => write!(f, "{err}"),
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report(f)
    }
}

impl StdError for Failure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.root())
    }
}

/// Walk `err` and its sources, comparing each against `target` by identity.
pub fn is(err: &(dyn StdError + 'static), target: &'static Sentinel) -> bool {
    std::iter::successors(Some(err), |&err| err.source()).any(|err| {
        err.downcast_ref::<Sentinel>()
            .is_some_and(|sentinel| sentinel.same(target))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::NO_ROWS;
    use crate::{with_message, wrap, wrap_err};

    static CONFLICT: Sentinel = Sentinel::new("conflict");

    fn annotated(depth: usize) -> Failure {
        let mut failure = wrap!(&NO_ROWS, "dao failed");
        for layer in 0..depth {
            failure = with_message!(failure, "layer {layer}");
        }
        failure
    }

    #[test]
    fn test_identity_survives_any_depth() {
        for depth in 0..16 {
            let failure = annotated(depth);
            assert!(failure.cause_is(&NO_ROWS), "cause lost at depth {depth}");
            assert!(failure.is(&NO_ROWS), "chain walk lost at depth {depth}");
            assert_eq!(failure.annotations().len(), depth + 1);
        }
    }

    #[test]
    fn test_unrelated_root_does_not_match() {
        let failure = with_message!(wrap!(&CONFLICT, "dao failed"), "logic failed");
        assert!(!failure.cause_is(&NO_ROWS));
        assert!(!failure.is(&NO_ROWS));
        assert!(failure.cause_is(&CONFLICT));
    }

    #[test]
    fn test_nested_failure_keeps_root_cause() {
        let inner = wrap!(&NO_ROWS, "dao failed");
        let outer = with_message!(wrap_err!(inner, "load configuration"), "serve");
        assert!(outer.cause_is(&NO_ROWS));
        assert!(outer.is(&NO_ROWS));
        assert!(outer.root().downcast_ref::<Failure>().is_some());
    }

    #[test]
    fn test_plain_error_root() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let failure = wrap_err!(io, "listen");
        assert!(!failure.cause_is(&NO_ROWS));
        assert!(!failure.is(&NO_ROWS));
        assert!(failure.cause().downcast_ref::<std::io::Error>().is_some());
        assert_eq!(failure.to_string(), "listen: address in use");
    }

    #[test]
    fn test_display_is_outermost_first() {
        let failure = with_message!(wrap!(&NO_ROWS, "dao failed"), "logic failed");
        assert_eq!(
            failure.to_string(),
            "logic failed: dao failed: sql: no rows in result set"
        );
    }

    #[test]
    fn test_report_lists_messages_in_order_with_frames() {
        let failure = with_message!(wrap!(&NO_ROWS, "dao failed"), "logic failed");
        let report = format!("{failure:#}");
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "sql: no rows in result set");
        assert_eq!(lines[1], "dao failed");
        assert!(lines[2].trim().ends_with("test_report_lists_messages_in_order_with_frames"));
        assert!(lines[3].trim().starts_with("src/failure/chain.rs:"));
        assert_eq!(lines[4], "logic failed");
        assert!(lines[6].trim().starts_with("src/failure/chain.rs:"));
        assert_eq!(format!("{failure:?}"), report);
    }
}
