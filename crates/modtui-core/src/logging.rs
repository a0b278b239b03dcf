#![forbid(unsafe_code)]

//! Structured logging shim.
//!
//! With the `tracing` feature these are the real `tracing` macros. Without it
//! they expand to nothing, and call sites compile unchanged either way.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Expands to nothing.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

/// Stand-in for `tracing::Span`.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    pub fn entered(self) -> NoopGuard {
        NoopGuard
    }
}

/// Returned by [`NoopSpan::entered`]; dropping it does nothing.
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
