#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the standard event types the page engine consumes.
//! All events derive `Clone` and `PartialEq` for use in tests and pattern
//! matching.
//!
//! # Design Notes
//!
//! - Scroll offsets are absolute page offsets in CSS pixels.
//! - Pointer coordinates are relative to the target element; the host
//!   resolves the bounding box before dispatching.
//! - `Modifiers` use bitflags for easy combination.

use crate::dom::NodeId;
use bitflags::bitflags;

/// Canonical input event.
///
/// This enum represents all discrete events the page engine can receive
/// from its host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The page scrolled to an absolute vertical offset.
    Scroll {
        /// Vertical scroll offset in CSS pixels.
        offset: f64,
    },

    /// A keyboard event.
    Key(KeyEvent),

    /// A click landed on an element.
    Click {
        /// The element that was clicked.
        target: NodeId,
    },

    /// The pointer entered an element.
    PointerEnter {
        /// The element that was entered.
        target: NodeId,
        /// Pointer x relative to the element's left edge.
        x: f64,
        /// Pointer y relative to the element's top edge.
        y: f64,
    },

    /// A form was submitted.
    Submit {
        /// The form element.
        form: NodeId,
    },

    /// An animation frame fired.
    ///
    /// Scroll-derived work is coalesced and runs here, at most once per
    /// frame. Pending reveals are re-evaluated on every frame.
    Frame,

    /// The page finished loading.
    Load,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Whether this is the Escape key.
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.code == KeyCode::Escape
    }

    /// Whether this is the Tab key (with or without Shift).
    #[must_use]
    pub fn is_tab(&self) -> bool {
        self.code == KeyCode::Tab
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b000;
        /// Shift key.
        const SHIFT = 0b001;
        /// Alt/Option key.
        const ALT   = 0b010;
        /// Control key.
        const CTRL  = 0b100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_modifiers() {
        let event = KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        assert!(event.shift());
        assert!(!event.ctrl());
        assert!(!event.alt());
    }

    #[test]
    fn key_event_combined_modifiers() {
        let event = KeyEvent::new(KeyCode::Char('s'))
            .with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert!(event.ctrl());
        assert!(event.shift());
        assert!(!event.alt());
    }

    #[test]
    fn escape_and_tab_predicates() {
        assert!(KeyEvent::new(KeyCode::Escape).is_escape());
        assert!(!KeyEvent::new(KeyCode::Escape).is_tab());
        assert!(KeyEvent::new(KeyCode::Tab).is_tab());
        assert!(
            KeyEvent::new(KeyCode::Tab)
                .with_modifiers(Modifiers::SHIFT)
                .is_tab()
        );
    }

    #[test]
    fn modifiers_default() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn event_is_clone_and_eq() {
        let event = Event::Scroll { offset: 120.0 };
        let cloned = event;
        assert_eq!(event, cloned);
    }
}
