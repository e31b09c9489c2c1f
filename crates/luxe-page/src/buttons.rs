#![forbid(unsafe_code)]

//! Button hover tracking and loading states.

use luxe_core::dom::{Document, NodeId};
use luxe_core::effect::Effect;

/// How long a primary button stays in its loading state, in
/// milliseconds.
pub const LOADING_MS: u64 = 2000;

/// Result of a primary-button click.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingOutcome {
    pub effects: Vec<Effect>,
    /// The button's original label, to be restored after [`LOADING_MS`].
    pub restore_label: Option<String>,
}

/// Controller for `.btn` elements.
#[derive(Debug, Clone, Default)]
pub struct ButtonController;

impl ButtonController {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Record the pointer position as CSS custom properties, relative to
    /// the button's top-left corner.
    pub fn hover(&self, doc: &Document, button: NodeId, x: f64, y: f64) -> Vec<Effect> {
        if !doc.has_class(button, "btn") {
            return Vec::new();
        }
        vec![
            Effect::set_style(button, "--mouse-x", format!("{x}px")),
            Effect::set_style(button, "--mouse-y", format!("{y}px")),
        ]
    }

    /// Put a primary button into its loading state on click.
    ///
    /// Only `.btn-primary` without `no-loading` participates; disabled
    /// buttons and buttons already loading are left alone.
    pub fn click(&self, doc: &Document, button: NodeId) -> LoadingOutcome {
        let eligible = doc.get(button).is_some_and(|e| {
            e.has_class("btn-primary") && !e.has_class("no-loading") && !e.disabled
        });
        if !eligible {
            return LoadingOutcome {
                effects: Vec::new(),
                restore_label: None,
            };
        }
        let label = doc.text(button).unwrap_or_default().to_string();
        LoadingOutcome {
            effects: vec![
                Effect::set_text(button, "Loading..."),
                Effect::SetDisabled {
                    node: button,
                    disabled: true,
                },
            ],
            restore_label: Some(label),
        }
    }

    /// Restore a button once its loading timer fires.
    pub fn restore(&self, button: NodeId, label: &str) -> Vec<Effect> {
        vec![
            Effect::set_text(button, label),
            Effect::SetDisabled {
                node: button,
                disabled: false,
            },
        ]
    }
}
