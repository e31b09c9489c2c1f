#![forbid(unsafe_code)]

//! Mobile navigation and in-page anchor scrolling.

use luxe_core::dom::{Document, NodeId};
use luxe_core::effect::Effect;

/// Fixed header height compensated when scrolling to an anchor.
pub const HEADER_OFFSET: f64 = 80.0;

/// Controller for the hamburger menu and nav links.
#[derive(Debug, Clone, Default)]
pub struct NavController;

impl NavController {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Toggle the mobile menu open or closed.
    pub fn toggle_menu(&self, doc: &Document) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(toggle) = doc.first_by_class("nav-toggle") {
            effects.push(Effect::ToggleClass {
                node: toggle,
                class: "active".into(),
            });
        }
        if let Some(menu) = doc.first_by_class("nav-menu") {
            effects.push(Effect::ToggleClass {
                node: menu,
                class: "active".into(),
            });
        }
        effects
    }

    /// Follow a nav link: close the mobile menu and scroll to the
    /// link's fragment target, offset for the fixed header.
    pub fn follow_link(&self, doc: &Document, link: NodeId) -> Vec<Effect> {
        let mut effects = self.close_menu(doc);
        let Some(target) = self.fragment_target(doc, link) else {
            return effects;
        };
        if let Some(element) = doc.get(target) {
            effects.push(Effect::ScrollTo {
                top: (element.bounds.top - HEADER_OFFSET).max(0.0),
                smooth: true,
            });
        }
        effects
    }

    fn close_menu(&self, doc: &Document) -> Vec<Effect> {
        let mut effects = Vec::new();
        for class_name in ["nav-toggle", "nav-menu"] {
            if let Some(node) = doc.first_by_class(class_name) {
                effects.push(Effect::remove_class(node, "active"));
            }
        }
        effects
    }

    /// Resolve a link's `#fragment` href to the element it names.
    fn fragment_target(&self, doc: &Document, link: NodeId) -> Option<NodeId> {
        let href = doc.get(link)?.href.as_deref()?;
        let fragment = href.strip_prefix('#')?;
        doc.by_id(fragment)
    }
}
