#![forbid(unsafe_code)]

//! Scroll-event coalescing for per-frame throttling.
//!
//! A page can emit dozens of scroll events between two animation frames.
//! Without coalescing, each event would trigger a full effects pass,
//! causing visible lag. [`ScrollCoalescer`] collapses a burst of scroll
//! events into a single pending offset.
//!
//! # Design
//!
//! The coalescer uses a "latest wins" strategy: pushing a new offset
//! supersedes any pending one, so the frame handler always observes the
//! most recent scroll position at the time the frame fires. That is the
//! only cancellation primitive in the engine.
//!
//! # Usage
//!
//! ```
//! use luxe_core::coalesce::ScrollCoalescer;
//!
//! let mut coalescer = ScrollCoalescer::new();
//! coalescer.push(40.0);
//! coalescer.push(95.0); // supersedes 40.0
//!
//! assert_eq!(coalescer.take(), Some(95.0));
//! assert_eq!(coalescer.take(), None);
//! ```

/// Coalesces bursts of scroll events into at most one pending update.
///
/// Not thread-safe; the engine is single-threaded and event-driven.
/// All operations are O(1) and the coalescer holds at most one pending
/// offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollCoalescer {
    /// Pending scroll offset (latest wins).
    pending: Option<f64>,

    /// How many pushes were superseded since the last take.
    superseded: u32,
}

impl ScrollCoalescer {
    /// Create a new empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scroll offset, replacing any pending one.
    pub fn push(&mut self, offset: f64) {
        if self.pending.is_some() {
            self.superseded = self.superseded.saturating_add(1);
        }
        self.pending = Some(offset);
    }

    /// Consume the pending offset, if any.
    ///
    /// Called once per animation frame. Resets the superseded counter.
    #[must_use]
    pub fn take(&mut self) -> Option<f64> {
        self.superseded = 0;
        self.pending.take()
    }

    /// Whether an offset is waiting for the next frame.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// How many pushes were replaced since the last take.
    #[must_use]
    pub fn superseded_count(&self) -> u32 {
        self.superseded
    }

    /// Discard any pending offset without processing it.
    pub fn clear(&mut self) {
        self.pending = None;
        self.superseded = 0;
    }
}
