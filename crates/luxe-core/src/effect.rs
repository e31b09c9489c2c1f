#![forbid(unsafe_code)]

//! Side effects as data.
//!
//! Controllers never mutate anything directly. Each update returns an
//! ordered list of [`Effect`]s describing presentation mutations; the
//! host applies them to the real page, and [`Effect::apply`] applies the
//! document-shaped subset to the headless [`Document`] so tests (and the
//! engine's own view of the page) stay current.
//!
//! Host-only effects — scrolling the viewport and persisting a value —
//! are no-ops against the model.

use crate::dom::{Document, NodeId};

/// A single presentation side effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Add a CSS class to an element.
    AddClass { node: NodeId, class: String },
    /// Remove a CSS class from an element.
    RemoveClass { node: NodeId, class: String },
    /// Toggle a CSS class on an element.
    ToggleClass { node: NodeId, class: String },
    /// Set an inline style property.
    SetStyle {
        node: NodeId,
        prop: String,
        value: String,
    },
    /// Remove an inline style property.
    ClearStyle { node: NodeId, prop: String },
    /// Set a non-style attribute.
    SetAttr {
        node: NodeId,
        name: String,
        value: String,
    },
    /// Replace an element's text content.
    SetText { node: NodeId, text: String },
    /// Set the value of a form control.
    SetValue { node: NodeId, value: String },
    /// Enable or disable a form control.
    SetDisabled { node: NodeId, disabled: bool },
    /// Replace an element's children with fresh elements of `tag`.
    ReplaceChildren {
        node: NodeId,
        tag: String,
        texts: Vec<String>,
    },
    /// Append a fresh child element.
    AppendChild {
        parent: NodeId,
        tag: String,
        class: String,
        text: String,
    },
    /// Remove an element (and its subtree) from the page.
    Remove { node: NodeId },
    /// Move keyboard focus to an element.
    Focus(NodeId),
    /// Suppress page background scrolling.
    LockScroll,
    /// Restore page background scrolling.
    UnlockScroll,
    /// Scroll the viewport to an absolute page offset.
    ScrollTo { top: f64, smooth: bool },
    /// Persist a key/value pair in the host's key-value store.
    Persist { key: String, value: String },
}

impl Effect {
    /// Build an [`Effect::AddClass`].
    #[must_use]
    pub fn add_class(node: NodeId, class: impl Into<String>) -> Self {
        Self::AddClass {
            node,
            class: class.into(),
        }
    }

    /// Build an [`Effect::RemoveClass`].
    #[must_use]
    pub fn remove_class(node: NodeId, class: impl Into<String>) -> Self {
        Self::RemoveClass {
            node,
            class: class.into(),
        }
    }

    /// Build an [`Effect::SetStyle`].
    #[must_use]
    pub fn set_style(node: NodeId, prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetStyle {
            node,
            prop: prop.into(),
            value: value.into(),
        }
    }

    /// Build an [`Effect::ClearStyle`].
    #[must_use]
    pub fn clear_style(node: NodeId, prop: impl Into<String>) -> Self {
        Self::ClearStyle {
            node,
            prop: prop.into(),
        }
    }

    /// Build an [`Effect::SetText`].
    #[must_use]
    pub fn set_text(node: NodeId, text: impl Into<String>) -> Self {
        Self::SetText {
            node,
            text: text.into(),
        }
    }

    /// Apply this effect to the headless document model.
    ///
    /// Viewport scrolling and persistence are host concerns and leave
    /// the model untouched.
    pub fn apply(&self, doc: &mut Document) {
        match self {
            Self::AddClass { node, class } => doc.add_class(*node, class),
            Self::RemoveClass { node, class } => doc.remove_class(*node, class),
            Self::ToggleClass { node, class } => {
                let _ = doc.toggle_class(*node, class);
            }
            Self::SetStyle { node, prop, value } => doc.set_style(*node, prop, value),
            Self::ClearStyle { node, prop } => doc.clear_style(*node, prop),
            Self::SetAttr { node, name, value } => doc.set_attr(*node, name, value),
            Self::SetText { node, text } => doc.set_text(*node, text),
            Self::SetValue { node, value } => doc.set_value(*node, value),
            Self::SetDisabled { node, disabled } => doc.set_disabled(*node, *disabled),
            Self::ReplaceChildren { node, tag, texts } => doc.replace_children(*node, tag, texts),
            Self::AppendChild {
                parent,
                tag,
                class,
                text,
            } => {
                let spec = crate::dom::ElementSpec::new(tag.clone())
                    .class(class.clone())
                    .text(text.clone());
                let _ = doc.append(Some(*parent), spec);
            }
            Self::Remove { node } => doc.detach(*node),
            Self::Focus(node) => doc.focus(*node),
            Self::LockScroll => doc.lock_scroll(),
            Self::UnlockScroll => doc.unlock_scroll(),
            Self::ScrollTo { .. } | Self::Persist { .. } => {}
        }
    }
}

/// Apply a batch of effects in order.
pub fn apply_all(effects: &[Effect], doc: &mut Document) {
    for effect in effects {
        effect.apply(doc);
    }
}
