#![forbid(unsafe_code)]

//! Core: document surface, canonical events, and scheduling primitives.

pub mod coalesce;
pub mod dom;
pub mod effect;
pub mod event;
pub mod logging;
pub mod timer;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, warn};
