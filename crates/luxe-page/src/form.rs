#![forbid(unsafe_code)]

//! Enquiry form validation and submission.
//!
//! Validation is inline: each empty field gets an error message appended
//! to its `.form-group` and a red border on the control. A valid submit
//! swaps the button into a thank-you state for [`RESET_MS`], then the
//! form is cleared and the button restored.

use luxe_core::dom::{Document, NodeId};
use luxe_core::effect::Effect;

/// How long the thank-you state is shown before the form resets, in
/// milliseconds.
pub const RESET_MS: u64 = 3000;

/// Inline error text for an empty required field.
pub const REQUIRED_MESSAGE: &str = "This field is required";

const ERROR_BORDER: &str = "#ef4444";

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub effects: Vec<Effect>,
    /// Whether the submission was accepted and a reset should be
    /// scheduled after [`RESET_MS`].
    pub accepted: bool,
}

/// Controller for the `.cta-form` enquiry form.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    submitting: bool,
    saved_label: Option<String>,
}

impl FormController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a thank-you reset is pending.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and submit the form.
    ///
    /// Re-entrant submits during the thank-you window are ignored.
    pub fn submit(&mut self, doc: &Document, form: NodeId) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome {
                effects: Vec::new(),
                accepted: false,
            };
        }

        let mut effects = self.clear_errors(doc, form);
        let inputs = self.inputs(doc, form);
        let mut valid = true;
        for &input in &inputs {
            let empty = doc
                .get(input)
                .is_none_or(|e| e.value.trim().is_empty());
            if empty {
                valid = false;
                effects.extend(self.mark_invalid(doc, input));
            }
        }

        if !valid {
            luxe_core::debug!(fields = inputs.len(), "form submit rejected");
            return SubmitOutcome {
                effects,
                accepted: false,
            };
        }

        if let Some(button) = self.submit_button(doc, form) {
            self.saved_label = doc.text(button).map(str::to_string);
            effects.push(Effect::set_text(
                button,
                "Thank You! We'll contact you soon.",
            ));
            effects.push(Effect::set_style(
                button,
                "background",
                "var(--color-accent)",
            ));
            effects.push(Effect::SetDisabled {
                node: button,
                disabled: true,
            });
        }
        self.submitting = true;
        luxe_core::info!("enquiry submitted");
        SubmitOutcome {
            effects,
            accepted: true,
        }
    }

    /// Clear values, restore the submit button, and drop any inline
    /// errors. Runs when the thank-you timer fires.
    pub fn reset(&mut self, doc: &Document, form: NodeId) -> Vec<Effect> {
        let mut effects = self.clear_errors(doc, form);
        for input in self.inputs(doc, form) {
            effects.push(Effect::SetValue {
                node: input,
                value: String::new(),
            });
        }
        if let Some(button) = self.submit_button(doc, form) {
            if let Some(label) = self.saved_label.take() {
                effects.push(Effect::set_text(button, label));
            }
            effects.push(Effect::clear_style(button, "background"));
            effects.push(Effect::SetDisabled {
                node: button,
                disabled: false,
            });
        }
        self.submitting = false;
        effects
    }

    /// The form's first text input, focused after an enquiry hand-off.
    #[must_use]
    pub fn first_input(&self, doc: &Document, form: NodeId) -> Option<NodeId> {
        doc.descendants(form)
            .into_iter()
            .find(|&n| doc.has_class(n, "form-input"))
    }

    fn inputs(&self, doc: &Document, form: NodeId) -> Vec<NodeId> {
        doc.descendants(form)
            .into_iter()
            .filter(|&n| {
                doc.get(n).is_some_and(|e| {
                    e.tag == "input"
                        && matches!(
                            e.attrs.get("type").map(String::as_str),
                            Some("text" | "email" | "tel")
                        )
                })
            })
            .collect()
    }

    fn submit_button(&self, doc: &Document, form: NodeId) -> Option<NodeId> {
        doc.descendants(form)
            .into_iter()
            .find(|&n| doc.has_class(n, "cta-submit-btn"))
    }

    fn mark_invalid(&self, doc: &Document, input: NodeId) -> Vec<Effect> {
        let mut effects = vec![Effect::set_style(input, "border-color", ERROR_BORDER)];
        if let Some(group) = doc.closest_class(input, "form-group") {
            effects.push(Effect::AppendChild {
                parent: group,
                tag: "span".into(),
                class: "error-message".into(),
                text: REQUIRED_MESSAGE.into(),
            });
        }
        effects
    }

    fn clear_errors(&self, doc: &Document, form: NodeId) -> Vec<Effect> {
        let mut effects = Vec::new();
        for node in doc.descendants(form) {
            if doc.has_class(node, "error-message") {
                effects.push(Effect::Remove { node });
            } else if doc.style(node, "border-color").is_some() {
                effects.push(Effect::clear_style(node, "border-color"));
            }
        }
        effects
    }
}
