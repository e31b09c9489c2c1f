#![forbid(unsafe_code)]

//! Optional structured logging.
//!
//! With the `tracing` cargo feature on, the `tracing` macros used by the
//! engine are re-exported here (and at the crate root). With it off, the
//! same names expand to nothing, so call sites log unconditionally and
//! the feature decides whether anything is emitted.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Expands to nothing unless the `tracing` feature is enabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing unless the `tracing` feature is enabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing unless the `tracing` feature is enabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}
