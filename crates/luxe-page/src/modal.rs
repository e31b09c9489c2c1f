#![forbid(unsafe_code)]

//! Project detail overlay.
//!
//! Opening populates the modal from a [`ProjectRecord`], marks the
//! container active, locks background scrolling, and moves focus to the
//! close control. While open, Escape closes and Tab is contained within
//! the modal's focusable elements.
//!
//! # Invariants
//!
//! - At most one project is shown at a time; opening replaces content
//!   in place.
//! - Closing is idempotent and never moves focus.
//! - Key handling is inert while the modal is closed.

use luxe_core::dom::{Document, NodeId};
use luxe_core::effect::Effect;
use luxe_core::event::KeyEvent;

use crate::directory::{ProjectDirectory, ProjectRecord};

/// Whether the overlay is showing, and for which project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        /// Name of the project on display.
        project: String,
        /// Element focused before the modal opened, if any.
        restore_to: Option<NodeId>,
    },
}

impl ModalState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// Controller for the project detail modal.
#[derive(Debug, Clone, Default)]
pub struct ModalController {
    state: ModalState,
}

impl ModalController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Open the modal for a named project.
    ///
    /// Unknown names and missing modal markup produce no effects.
    pub fn open(
        &mut self,
        doc: &Document,
        directory: &ProjectDirectory,
        project_name: &str,
    ) -> Vec<Effect> {
        let Some(record) = directory.get(project_name) else {
            luxe_core::warn!(project = project_name, "unknown project");
            return Vec::new();
        };
        let Some(container) = doc.by_id("projectModal") else {
            return Vec::new();
        };

        let mut effects = self.populate(doc, record);
        effects.push(Effect::add_class(container, "active"));
        effects.push(Effect::LockScroll);
        if let Some(close) = self.first_by_class_within(doc, container, "modal-close") {
            effects.push(Effect::Focus(close));
        }

        self.state = ModalState::Open {
            project: record.name.clone(),
            restore_to: doc.active_element(),
        };
        luxe_core::debug!(project = %record.name, "modal opened");
        effects
    }

    /// Close the modal. Safe to call while already closed.
    pub fn close(&mut self, doc: &Document) -> Vec<Effect> {
        self.state = ModalState::Closed;
        let Some(container) = doc.by_id("projectModal") else {
            return Vec::new();
        };
        vec![
            Effect::remove_class(container, "active"),
            Effect::UnlockScroll,
        ]
    }

    /// Close the modal and hand off to the enquiry form: scroll to the
    /// contact section and report where its top sits. The caller
    /// schedules the deferred input focus.
    pub fn enquire_now(&mut self, doc: &Document) -> Vec<Effect> {
        let mut effects = self.close(doc);
        if let Some(contact) = doc.by_id("contact") {
            if let Some(element) = doc.get(contact) {
                effects.push(Effect::ScrollTo {
                    top: element.bounds.top,
                    smooth: true,
                });
            }
        }
        effects
    }

    /// Handle a key press while the page has keyboard focus.
    ///
    /// Returns `None` when the key is not consumed (modal closed, or a
    /// key with no modal meaning), letting it propagate to the page.
    pub fn handle_key(&mut self, doc: &Document, key: KeyEvent) -> Option<Vec<Effect>> {
        if !self.is_open() {
            return None;
        }
        if key.is_escape() {
            return Some(self.close(doc));
        }
        if key.is_tab() {
            return self.contain_tab(doc, key.shift());
        }
        None
    }

    /// Tab containment: wrap focus at the edges of the modal's
    /// focusable elements, in document order.
    fn contain_tab(&self, doc: &Document, backwards: bool) -> Option<Vec<Effect>> {
        let container = doc.by_id("projectModal")?;
        let focusable: Vec<NodeId> = doc
            .descendants(container)
            .into_iter()
            .filter(|&n| doc.is_focusable(n))
            .collect();
        let (first, last) = (*focusable.first()?, *focusable.last()?);

        let active = doc.active_element();
        if backwards && active == Some(first) {
            Some(vec![Effect::Focus(last)])
        } else if !backwards && active == Some(last) {
            Some(vec![Effect::Focus(first)])
        } else {
            // Focus moves normally within the modal.
            None
        }
    }

    fn populate(&self, doc: &Document, record: &ProjectRecord) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(name) = doc.by_id("modalProjectName") {
            effects.push(Effect::set_text(name, record.name.clone()));
        }
        if let Some(location) = doc.by_id("modalLocation") {
            // Location text lives in a span inside the label.
            let target = doc
                .descendants(location)
                .into_iter()
                .find(|&n| doc.get(n).is_some_and(|e| e.tag == "span"))
                .unwrap_or(location);
            effects.push(Effect::set_text(target, record.location.clone()));
        }
        if let Some(description) = doc.by_id("modalDescription") {
            effects.push(Effect::set_text(description, record.description.clone()));
        }
        if let Some(highlights) = doc.by_id("modalHighlights") {
            effects.push(Effect::ReplaceChildren {
                node: highlights,
                tag: "li".into(),
                texts: record.highlights.clone(),
            });
        }
        effects
    }

    fn first_by_class_within(
        &self,
        doc: &Document,
        container: NodeId,
        class: &str,
    ) -> Option<NodeId> {
        doc.descendants(container)
            .into_iter()
            .find(|&n| doc.has_class(n, class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxe_core::dom::ElementSpec;
    use luxe_core::effect::apply_all;
    use luxe_core::event::{KeyCode, KeyEvent, Modifiers};

    struct Fixture {
        doc: Document,
        close_btn: NodeId,
        enquire_btn: NodeId,
        trigger: NodeId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let trigger = doc.append(None, ElementSpec::new("button").class("project-btn"));
        let modal = doc.append(None, ElementSpec::new("div").dom_id("projectModal"));
        let close_btn = doc.append(
            Some(modal),
            ElementSpec::new("button").class("modal-close"),
        );
        doc.append(Some(modal), ElementSpec::new("h2").dom_id("modalProjectName"));
        let location = doc.append(Some(modal), ElementSpec::new("p").dom_id("modalLocation"));
        doc.append(Some(location), ElementSpec::new("span"));
        doc.append(Some(modal), ElementSpec::new("p").dom_id("modalDescription"));
        doc.append(Some(modal), ElementSpec::new("ul").dom_id("modalHighlights"));
        let enquire_btn = doc.append(
            Some(modal),
            ElementSpec::new("button").class("enquire-btn"),
        );
        doc.append(
            None,
            ElementSpec::new("section").dom_id("contact").bounds(2400.0, 600.0),
        );
        Fixture {
            doc,
            close_btn,
            enquire_btn,
            trigger,
        }
    }

    fn open_heights(fx: &mut Fixture, modal: &mut ModalController) {
        let dir = ProjectDirectory::seed();
        let effects = modal.open(&fx.doc, &dir, "Nova Haven Heights");
        apply_all(&effects, &mut fx.doc);
    }

    #[test]
    fn open_populates_and_locks() {
        let mut fx = fixture();
        let mut modal = ModalController::new();
        open_heights(&mut fx, &mut modal);

        assert!(modal.is_open());
        let container = fx.doc.by_id("projectModal").unwrap();
        assert!(fx.doc.has_class(container, "active"));
        assert!(fx.doc.is_scroll_locked());
        assert_eq!(fx.doc.active_element(), Some(fx.close_btn));

        let name = fx.doc.by_id("modalProjectName").unwrap();
        assert_eq!(fx.doc.text(name), Some("Nova Haven Heights"));
        let highlights = fx.doc.by_id("modalHighlights").unwrap();
        assert_eq!(fx.doc.children(highlights).len(), 3);
    }

    #[test]
    fn location_lands_in_inner_span() {
        let mut fx = fixture();
        let mut modal = ModalController::new();
        open_heights(&mut fx, &mut modal);

        let location = fx.doc.by_id("modalLocation").unwrap();
        let span = fx
            .doc
            .descendants(location)
            .into_iter()
            .find(|&n| fx.doc.get(n).unwrap().tag == "span")
            .unwrap();
        assert_eq!(fx.doc.text(span), Some("Mumbai, Maharashtra"));
        // The label itself keeps its own text.
        assert_eq!(fx.doc.text(location), Some(""));
    }

    #[test]
    fn unknown_project_is_a_no_op() {
        let fx = fixture();
        let mut modal = ModalController::new();
        let dir = ProjectDirectory::seed();
        let effects = modal.open(&fx.doc, &dir, "Nova Haven Nowhere");
        assert!(effects.is_empty());
        assert!(!modal.is_open());
    }

    #[test]
    fn reopen_replaces_content() {
        let mut fx = fixture();
        let mut modal = ModalController::new();
        let dir = ProjectDirectory::seed();

        let effects = modal.open(&fx.doc, &dir, "Nova Haven Heights");
        apply_all(&effects, &mut fx.doc);
        let effects = modal.open(&fx.doc, &dir, "Nova Haven Vista");
        apply_all(&effects, &mut fx.doc);

        let name = fx.doc.by_id("modalProjectName").unwrap();
        assert_eq!(fx.doc.text(name), Some("Nova Haven Vista"));
        let highlights = fx.doc.by_id("modalHighlights").unwrap();
        assert_eq!(fx.doc.children(highlights).len(), 3);
    }

    #[test]
    fn close_is_idempotent_and_keeps_focus() {
        let mut fx = fixture();
        let mut modal = ModalController::new();
        open_heights(&mut fx, &mut modal);

        let effects = modal.close(&fx.doc);
        apply_all(&effects, &mut fx.doc);
        assert!(!modal.is_open());
        assert!(!fx.doc.is_scroll_locked());
        // Focus stays where the modal left it.
        assert_eq!(fx.doc.active_element(), Some(fx.close_btn));

        let again = modal.close(&fx.doc);
        apply_all(&again, &mut fx.doc);
        assert!(!modal.is_open());
    }

    #[test]
    fn escape_closes_only_while_open() {
        let mut fx = fixture();
        let mut modal = ModalController::new();
        let escape = KeyEvent::new(KeyCode::Escape);

        assert!(modal.handle_key(&fx.doc, escape).is_none());

        open_heights(&mut fx, &mut modal);
        let effects = modal.handle_key(&fx.doc, escape).unwrap();
        apply_all(&effects, &mut fx.doc);
        assert!(!modal.is_open());
    }

    #[test]
    fn tab_wraps_from_last_to_first() {
        let mut fx = fixture();
        let mut modal = ModalController::new();
        open_heights(&mut fx, &mut modal);

        fx.doc.focus(fx.enquire_btn);
        let effects = modal
            .handle_key(&fx.doc, KeyEvent::new(KeyCode::Tab))
            .unwrap();
        assert_eq!(effects, vec![Effect::Focus(fx.close_btn)]);
    }

    #[test]
    fn shift_tab_wraps_from_first_to_last() {
        let mut fx = fixture();
        let mut modal = ModalController::new();
        open_heights(&mut fx, &mut modal);

        // Close control is already focused after open.
        let effects = modal
            .handle_key(
                &fx.doc,
                KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT),
            )
            .unwrap();
        assert_eq!(effects, vec![Effect::Focus(fx.enquire_btn)]);
    }

    #[test]
    fn interior_tab_passes_through() {
        let mut fx = fixture();
        let mut modal = ModalController::new();
        open_heights(&mut fx, &mut modal);

        fx.doc.focus(fx.trigger); // focus outside the edge elements
        assert!(modal
            .handle_key(&fx.doc, KeyEvent::new(KeyCode::Tab))
            .is_none());
    }

    #[test]
    fn enquire_now_closes_and_scrolls_to_contact() {
        let mut fx = fixture();
        let mut modal = ModalController::new();
        open_heights(&mut fx, &mut modal);

        let effects = modal.enquire_now(&fx.doc);
        assert!(effects.contains(&Effect::UnlockScroll));
        assert!(effects.contains(&Effect::ScrollTo {
            top: 2400.0,
            smooth: true,
        }));
        assert!(!modal.is_open());
    }

    #[test]
    fn open_records_prior_focus() {
        let mut fx = fixture();
        let mut modal = ModalController::new();
        fx.doc.focus(fx.trigger);
        open_heights(&mut fx, &mut modal);

        match modal.state() {
            ModalState::Open { restore_to, .. } => assert_eq!(*restore_to, Some(fx.trigger)),
            ModalState::Closed => panic!("modal should be open"),
        }
    }
}
