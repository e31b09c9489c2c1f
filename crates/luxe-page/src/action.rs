#![forbid(unsafe_code)]

//! Deferred work carried by the timer queue.

use luxe_core::dom::NodeId;
use luxe_core::effect::Effect;

/// Payload of a scheduled timer.
///
/// Timers are one-shot and never cancelled; each variant names the
/// controller that owns the deferred work.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerAction {
    /// Run a staggered reveal's effects.
    Reveal(Vec<Effect>),
    /// Focus the first enquiry form input after the settle delay.
    FocusEnquiryInput,
    /// Reset the enquiry form after the thank-you interval.
    ResetForm { form: NodeId },
    /// Restore page transitions after the theme-load flash window.
    RestoreThemeTransition,
    /// Restore a button from its loading state.
    RestoreButton { node: NodeId, label: String },
}
