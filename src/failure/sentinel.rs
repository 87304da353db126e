//! Sentinel root causes.

use std::fmt;

/// A comparison-significant root cause.
///
/// Sentinels are meant to live in `static` items. Identity is the address of
/// that static: two sentinels carrying the same text are still different
/// causes.
pub struct Sentinel {
    message: &'static str,
}

impl Sentinel {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Identity comparison.
    pub fn same(&self, other: &Sentinel) -> bool {
        std::ptr::eq(self, other)
    }
}

impl fmt::Debug for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sentinel")
            .field(&self.message)
            .field(&(self as *const Self))
            .finish()
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for Sentinel {}

/// A lookup found nothing.
pub static NO_ROWS: Sentinel = Sentinel::new("sql: no rows in result set");
