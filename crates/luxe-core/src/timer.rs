#![forbid(unsafe_code)]

//! Deterministic one-shot timers.
//!
//! The engine defers work through fixed-delay timers: the form reset
//! (3000 ms), the theme-transition restore (100 ms), the enquiry focus
//! (500 ms), reveal stagger (`index * 100 ms`), and the button loading
//! reset (2000 ms). [`TimerQueue`] models those timers against a virtual
//! clock so tests can advance time explicitly.
//!
//! # Design Notes
//!
//! - Timers are one-shot and never cancelled once scheduled.
//! - [`TimerQueue::advance`] fires everything due at or before the new
//!   clock value, ordered by due time; ties fire in schedule order.
//! - The clock only moves forward; durations accumulate with saturation.

use std::time::Duration;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TimerId,
    due: Duration,
    seq: u64,
    payload: T,
}

/// A queue of pending one-shot timers with a payload per timer.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue<T> {
    now: Duration,
    next: u64,
    pending: Vec<Entry<T>>,
}

impl<T> TimerQueue<T> {
    /// Create an empty queue with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next: 0,
            pending: Vec::new(),
        }
    }

    /// Schedule `payload` to fire `delay` from now.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next);
        let entry = Entry {
            id,
            due: self.now.saturating_add(delay),
            seq: self.next,
            payload,
        };
        self.next += 1;
        self.pending.push(entry);
        id
    }

    /// Advance the clock by `dt` and fire every timer now due.
    ///
    /// Returns fired timers ordered by due time, then schedule order.
    pub fn advance(&mut self, dt: Duration) -> Vec<(TimerId, T)> {
        self.now = self.now.saturating_add(dt);
        let now = self.now;

        let mut due = Vec::new();
        let mut rest = Vec::with_capacity(self.pending.len());
        for entry in self.pending.drain(..) {
            if entry.due <= now {
                due.push(entry);
            } else {
                rest.push(entry);
            }
        }
        self.pending = rest;

        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| (e.id, e.payload)).collect()
    }

    /// Current virtual clock value.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
