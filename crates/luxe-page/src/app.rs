#![forbid(unsafe_code)]

//! Top-level event dispatch.
//!
//! [`PageApp`] owns the document model, every controller, and the timer
//! queue. Hosts feed it [`Event`]s and virtual time; it answers with
//! ordered [`Effect`] lists, already applied to its own model so the
//! engine's view of the page never drifts from what it emitted.
//!
//! # Usage
//!
//! ```
//! use luxe_core::dom::{Document, ElementSpec};
//! use luxe_core::event::Event;
//! use luxe_page::PageApp;
//!
//! let mut doc = Document::new();
//! let html = doc.append(None, ElementSpec::new("html"));
//! doc.append(Some(html), ElementSpec::new("header").class("header"));
//! let mut app = PageApp::new(doc, 900.0);
//! let _startup = app.init();
//! let _ = app.update(Event::Scroll { offset: 120.0 });
//! let effects = app.update(Event::Frame);
//! assert!(!effects.is_empty()); // header gained the "scrolled" class
//! ```

use std::time::Duration;

use luxe_core::dom::{Document, NodeId};
use luxe_core::effect::{Effect, apply_all};
use luxe_core::event::Event;
use luxe_core::timer::TimerQueue;
use luxe_motion::{RevealEngine, RevealOptions, RevealTransform, ScrollFx, Viewport};

use crate::action::TimerAction;
use crate::buttons::{ButtonController, LOADING_MS};
use crate::directory::ProjectDirectory;
use crate::form::{FormController, RESET_MS};
use crate::modal::ModalController;
use crate::nav::NavController;
use crate::theme::{MemoryStore, ThemeController, ThemeStore, TRANSITION_RESTORE_MS};

/// Delay before the enquiry input receives focus after the hand-off
/// scroll, in milliseconds.
pub const ENQUIRY_FOCUS_MS: u64 = 500;

/// The assembled page engine.
pub struct PageApp {
    doc: Document,
    timers: TimerQueue<TimerAction>,
    reveal: RevealEngine,
    scrollfx: ScrollFx,
    modal: ModalController,
    theme: ThemeController,
    form: FormController,
    nav: NavController,
    buttons: ButtonController,
    directory: ProjectDirectory,
    viewport_height: f64,
    last_offset: f64,
}

impl PageApp {
    /// Build an engine over `doc` with an in-memory preference store.
    #[must_use]
    pub fn new(doc: Document, viewport_height: f64) -> Self {
        Self::with_store(doc, Box::new(MemoryStore::new()), viewport_height)
    }

    /// Build an engine with an explicit preference store.
    #[must_use]
    pub fn with_store(doc: Document, store: Box<dyn ThemeStore>, viewport_height: f64) -> Self {
        Self {
            doc,
            timers: TimerQueue::new(),
            reveal: RevealEngine::new(),
            scrollfx: ScrollFx::new(),
            modal: ModalController::new(),
            theme: ThemeController::new(store),
            form: FormController::new(),
            nav: NavController::new(),
            buttons: ButtonController::new(),
            directory: ProjectDirectory::seed(),
            viewport_height,
            last_offset: 0.0,
        }
    }

    /// The engine's document model.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access for hosts that restructure the page.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Pending reveal targets, for host diagnostics.
    #[must_use]
    pub fn pending_reveals(&self) -> usize {
        self.reveal.pending()
    }

    /// One-time page setup: theme, hidden reveal states, body fade prep.
    ///
    /// Must run before the first [`Self::update`] call.
    pub fn init(&mut self) -> Vec<Effect> {
        tracing::info!("LUXE Real Estate");
        tracing::info!("Premium Living Spaces");

        let mut effects = self.theme.startup(&self.doc);
        self.timers.schedule(
            Duration::from_millis(TRANSITION_RESTORE_MS),
            TimerAction::RestoreThemeTransition,
        );

        // The page starts transparent and fades in on load.
        if let Some(body) = self.doc.by_tag("body").first().copied() {
            effects.push(Effect::set_style(body, "opacity", "0"));
            effects.push(Effect::set_style(body, "transition", "opacity 0.3s ease"));
        }

        effects.extend(self.register_reveals());
        apply_all(&effects, &mut self.doc);
        effects
    }

    /// Advance virtual time, firing any timers that come due.
    pub fn advance(&mut self, dt: Duration) -> Vec<Effect> {
        let mut effects = Vec::new();
        for (_, action) in self.timers.advance(dt) {
            match action {
                TimerAction::Reveal(reveal_effects) => effects.extend(reveal_effects),
                TimerAction::FocusEnquiryInput => {
                    if let Some(contact) = self.doc.by_id("contact") {
                        if let Some(input) = self.form.first_input(&self.doc, contact) {
                            effects.push(Effect::Focus(input));
                        }
                    }
                }
                TimerAction::ResetForm { form } => {
                    effects.extend(self.form.reset(&self.doc, form));
                }
                TimerAction::RestoreThemeTransition => {
                    effects.extend(self.theme.restore_transitions(&self.doc));
                }
                TimerAction::RestoreButton { node, label } => {
                    effects.extend(self.buttons.restore(node, &label));
                }
            }
        }
        apply_all(&effects, &mut self.doc);
        effects
    }

    /// Dispatch one input event.
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        let effects = match event {
            Event::Scroll { offset } => {
                self.last_offset = offset;
                self.scrollfx.on_scroll(offset);
                Vec::new()
            }
            Event::Frame => self.on_frame(),
            Event::Key(key) => self
                .modal
                .handle_key(&self.doc, key)
                .unwrap_or_default(),
            Event::Click { target } => self.on_click(target),
            Event::PointerEnter { target, x, y } => self.buttons.hover(&self.doc, target, x, y),
            Event::Submit { form } => self.on_submit(form),
            Event::Load => self.on_load(),
        };
        apply_all(&effects, &mut self.doc);
        effects
    }

    fn on_frame(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some((_, scroll_effects)) = self.scrollfx.on_frame(&self.doc) {
            effects.extend(scroll_effects);
        }

        let viewport = Viewport::new(self.last_offset, self.viewport_height);
        for reveal in self.reveal.observe(viewport, &self.doc) {
            if reveal.delay.is_zero() {
                effects.extend(reveal.effects);
            } else {
                self.timers
                    .schedule(reveal.delay, TimerAction::Reveal(reveal.effects));
            }
        }
        effects
    }

    fn on_click(&mut self, target: NodeId) -> Vec<Effect> {
        if self.doc.has_class(target, "nav-toggle") {
            return self.nav.toggle_menu(&self.doc);
        }
        if self.doc.has_class(target, "nav-link") {
            return self.nav.follow_link(&self.doc, target);
        }
        if self.doc.has_class(target, "project-btn") {
            return self.open_project_from(target);
        }
        if self.doc.has_class(target, "modal-close") {
            return self.modal.close(&self.doc);
        }
        if self.doc.has_class(target, "enquire-btn") {
            let effects = self.modal.enquire_now(&self.doc);
            self.timers.schedule(
                Duration::from_millis(ENQUIRY_FOCUS_MS),
                TimerAction::FocusEnquiryInput,
            );
            return effects;
        }
        if self.doc.get(target).is_some_and(|e| {
            e.dom_id.as_deref() == Some("darkModeToggle")
        }) {
            return self.theme.toggle(&self.doc);
        }

        let outcome = self.buttons.click(&self.doc, target);
        if let Some(label) = outcome.restore_label {
            self.timers.schedule(
                Duration::from_millis(LOADING_MS),
                TimerAction::RestoreButton {
                    node: target,
                    label,
                },
            );
        }
        outcome.effects
    }

    /// Resolve a project button to its card's name, then open the modal.
    fn open_project_from(&mut self, button: NodeId) -> Vec<Effect> {
        let Some(card) = self.doc.closest_class(button, "project-card") else {
            return Vec::new();
        };
        let Some(name_node) = self
            .doc
            .descendants(card)
            .into_iter()
            .find(|&n| self.doc.has_class(n, "project-name"))
        else {
            return Vec::new();
        };
        let name = self.doc.text(name_node).unwrap_or_default().to_string();
        self.modal.open(&self.doc, &self.directory, &name)
    }

    fn on_submit(&mut self, form: NodeId) -> Vec<Effect> {
        if !self.doc.has_class(form, "cta-form") {
            return Vec::new();
        }
        let outcome = self.form.submit(&self.doc, form);
        if outcome.accepted {
            self.timers.schedule(
                Duration::from_millis(RESET_MS),
                TimerAction::ResetForm { form },
            );
        }
        outcome.effects
    }

    fn on_load(&mut self) -> Vec<Effect> {
        match self.doc.by_tag("body").first().copied() {
            Some(body) => vec![Effect::set_style(body, "opacity", "1")],
            None => Vec::new(),
        }
    }

    fn register_reveals(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        let doc = &self.doc;

        self.reveal
            .register_class_only(&doc.by_class("section-header"), RevealOptions::default());

        for class_name in ["feature-card", "amenity-card", "project-card"] {
            effects.extend(self.reveal.register(
                &doc.by_class(class_name),
                RevealTransform::TranslateY(30.0),
                RevealOptions::default(),
            ));
        }

        if let Some(details) = doc.first_by_class("location-details") {
            effects.extend(self.reveal.register(
                &[details],
                RevealTransform::TranslateX(-30.0),
                RevealOptions::default(),
            ));
        }
        if let Some(map) = doc.first_by_class("location-map") {
            effects.extend(self.reveal.register(
                &[map],
                RevealTransform::TranslateX(30.0),
                RevealOptions::default(),
            ));
        }
        if let Some(cta) = doc.first_by_class("cta-content") {
            effects.extend(self.reveal.register(
                &[cta],
                RevealTransform::Scale(0.95),
                RevealOptions::default(),
            ));
        }

        effects.extend(self.reveal.register(
            &doc.by_class("testimonial-card"),
            RevealTransform::TranslateY(30.0),
            RevealOptions::default().stagger(true),
        ));

        effects.extend(self.reveal.register(
            &doc.by_tag("section"),
            RevealTransform::TranslateY(30.0),
            RevealOptions::default().transition("opacity 0.6s ease, transform 0.6s ease"),
        ));

        effects
    }
}
