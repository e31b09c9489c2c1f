#![forbid(unsafe_code)]

//! One-shot viewport reveals.
//!
//! Elements start hidden (opacity 0 plus a small transform offset) and
//! transition to their final state the first time enough of them enters
//! the viewport. A single [`RevealEngine`] instance holds every
//! registered group, parameterized by a [`RevealTransform`] and
//! [`RevealOptions`] per group.
//!
//! # Invariants
//!
//! 1. **One-shot**: a target reveals at most once. Later viewport
//!    crossings are ignored; there is no un-reveal and no re-arming.
//! 2. **Synchronous hiding**: registration emits the initial hidden
//!    presentation immediately. Observing before hiding would make the
//!    first reveal jump with no visible transition.
//! 3. **Stagger**: within one observation pass, the n-th newly revealing
//!    target of a staggered group is delayed by `n * 100 ms`.
//!
//! # Activation predicate
//!
//! A target activates when the fraction of its height visible inside the
//! viewport — with the viewport bottom pulled up by `bottom_margin` — is
//! at least `threshold`. The defaults (0.1 and 50 px) make the reveal
//! fire when the element is about 50 px from fully entering.

use std::time::Duration;

use luxe_core::dom::{Bounds, Document, NodeId};
use luxe_core::effect::Effect;

/// Per-item stagger step.
pub const STAGGER_STEP: Duration = Duration::from_millis(100);

/// Default visible-fraction threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Default bottom activation margin in CSS pixels.
pub const DEFAULT_BOTTOM_MARGIN: f64 = 50.0;

/// Default CSS transition applied to hidden targets.
pub const DEFAULT_TRANSITION: &str = "all 0.6s ease-out";

/// The hidden-state transform of a reveal group.
///
/// The final state is always the identity of the same transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealTransform {
    /// Hidden below the final position by the given offset.
    TranslateY(f64),
    /// Hidden to the side of the final position by the given offset.
    TranslateX(f64),
    /// Hidden scaled down (or up) by the given factor.
    Scale(f64),
}

impl RevealTransform {
    /// CSS for the hidden state.
    #[must_use]
    pub fn hidden_css(&self) -> String {
        match self {
            Self::TranslateY(px) => format!("translateY({px}px)"),
            Self::TranslateX(px) => format!("translateX({px}px)"),
            Self::Scale(factor) => format!("scale({factor})"),
        }
    }

    /// CSS for the revealed state (identity).
    #[must_use]
    pub const fn visible_css(&self) -> &'static str {
        match self {
            Self::TranslateY(_) => "translateY(0)",
            Self::TranslateX(_) => "translateX(0)",
            Self::Scale(_) => "scale(1)",
        }
    }
}

/// Per-group tuning for a reveal registration.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealOptions {
    /// Minimum visible fraction to activate.
    pub threshold: f64,
    /// Bottom margin pulled off the viewport before measuring.
    pub bottom_margin: f64,
    /// Delay the n-th target of a batch by `n * 100 ms`.
    pub stagger: bool,
    /// CSS transition installed on the hidden state.
    pub transition: String,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            stagger: false,
            transition: DEFAULT_TRANSITION.to_string(),
        }
    }
}

impl RevealOptions {
    /// Override the activation threshold.
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Override the bottom activation margin.
    #[must_use]
    pub fn bottom_margin(mut self, margin: f64) -> Self {
        self.bottom_margin = margin;
        self
    }

    /// Enable per-item stagger.
    #[must_use]
    pub fn stagger(mut self, stagger: bool) -> Self {
        self.stagger = stagger;
        self
    }

    /// Override the CSS transition.
    #[must_use]
    pub fn transition(mut self, transition: impl Into<String>) -> Self {
        self.transition = transition.into();
        self
    }
}

/// The visible portion of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Absolute vertical scroll offset.
    pub scroll_offset: f64,
    /// Viewport height in CSS pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport at the given scroll offset and height.
    #[must_use]
    pub const fn new(scroll_offset: f64, height: f64) -> Self {
        Self {
            scroll_offset,
            height,
        }
    }

    /// Fraction of `bounds` visible inside this viewport, with the
    /// bottom edge pulled up by `bottom_margin`.
    ///
    /// Zero-height elements are treated as not visible.
    #[must_use]
    pub fn visible_fraction(&self, bounds: Bounds, bottom_margin: f64) -> f64 {
        if bounds.height <= 0.0 {
            return 0.0;
        }
        let view_top = self.scroll_offset;
        let view_bottom = self.scroll_offset + self.height - bottom_margin;
        let overlap = bounds.bottom().min(view_bottom) - bounds.top.max(view_top);
        (overlap / bounds.height).clamp(0.0, 1.0)
    }
}

/// A reveal scheduled by [`RevealEngine::observe`].
///
/// `delay` is zero for unstaggered groups; the caller routes delayed
/// reveals through its timer queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Reveal {
    /// The revealing element.
    pub node: NodeId,
    /// Stagger delay before the effects should run.
    pub delay: Duration,
    /// The reveal side effects.
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone)]
struct Target {
    node: NodeId,
    revealed: bool,
}

#[derive(Debug, Clone)]
struct Group {
    hidden: Option<RevealTransform>,
    options: RevealOptions,
    targets: Vec<Target>,
}

/// Registry of reveal groups, shared across the whole page.
#[derive(Debug, Clone, Default)]
pub struct RevealEngine {
    groups: Vec<Group>,
}

impl RevealEngine {
    /// Create an engine with no registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a styled group and emit its initial hidden presentation.
    ///
    /// The hidden styles must be applied before the first observation or
    /// the reveal has no visible transition; callers apply the returned
    /// effects synchronously.
    #[must_use]
    pub fn register(
        &mut self,
        nodes: &[NodeId],
        hidden: RevealTransform,
        options: RevealOptions,
    ) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(nodes.len() * 3);
        for &node in nodes {
            effects.push(Effect::set_style(node, "opacity", "0"));
            effects.push(Effect::set_style(node, "transform", hidden.hidden_css()));
            effects.push(Effect::set_style(node, "transition", options.transition.clone()));
        }
        self.push_group(nodes, Some(hidden), options);
        effects
    }

    /// Register a class-only group: no inline styles, the reveal just
    /// adds the `visible` class and CSS owns the transition.
    pub fn register_class_only(&mut self, nodes: &[NodeId], options: RevealOptions) {
        self.push_group(nodes, None, options);
    }

    fn push_group(
        &mut self,
        nodes: &[NodeId],
        hidden: Option<RevealTransform>,
        options: RevealOptions,
    ) {
        self.groups.push(Group {
            hidden,
            options,
            targets: nodes
                .iter()
                .map(|&node| Target {
                    node,
                    revealed: false,
                })
                .collect(),
        });
    }

    /// Number of targets still waiting to reveal.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.targets)
            .filter(|t| !t.revealed)
            .count()
    }

    /// Evaluate every unrevealed target against the viewport.
    ///
    /// Targets meeting the activation predicate are marked revealed
    /// immediately (so a later pass cannot double-schedule them) and
    /// returned with their effects and stagger delay.
    pub fn observe(&mut self, viewport: Viewport, doc: &Document) -> Vec<Reveal> {
        let mut reveals = Vec::new();
        for group in &mut self.groups {
            let mut batch_index: u32 = 0;
            for target in &mut group.targets {
                if target.revealed {
                    continue;
                }
                let Some(element) = doc.get(target.node) else {
                    continue;
                };
                let fraction = viewport.visible_fraction(element.bounds, group.options.bottom_margin);
                if fraction < group.options.threshold {
                    continue;
                }
                target.revealed = true;

                let delay = if group.options.stagger {
                    STAGGER_STEP * batch_index
                } else {
                    Duration::ZERO
                };
                batch_index += 1;

                let mut effects = Vec::with_capacity(3);
                if let Some(hidden) = group.hidden {
                    effects.push(Effect::set_style(target.node, "opacity", "1"));
                    effects.push(Effect::set_style(
                        target.node,
                        "transform",
                        hidden.visible_css(),
                    ));
                }
                effects.push(Effect::add_class(target.node, "visible"));

                let node = target.node;
                luxe_core::debug!(?node, delay_ms = delay.as_millis() as u64, "reveal");
                reveals.push(Reveal {
                    node,
                    delay,
                    effects,
                });
            }
        }
        reveals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxe_core::dom::ElementSpec;
    use luxe_core::effect::apply_all;

    fn doc_with_cards(tops: &[f64]) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new();
        let cards = tops
            .iter()
            .map(|&top| {
                doc.append(
                    None,
                    ElementSpec::new("div").class("feature-card").bounds(top, 200.0),
                )
            })
            .collect();
        (doc, cards)
    }

    #[test]
    fn register_emits_hidden_presentation() {
        let (mut doc, cards) = doc_with_cards(&[2000.0]);
        let mut engine = RevealEngine::new();
        let effects = engine.register(
            &cards,
            RevealTransform::TranslateY(30.0),
            RevealOptions::default(),
        );
        apply_all(&effects, &mut doc);

        assert_eq!(doc.style(cards[0], "opacity"), Some("0"));
        assert_eq!(doc.style(cards[0], "transform"), Some("translateY(30px)"));
        assert_eq!(doc.style(cards[0], "transition"), Some("all 0.6s ease-out"));
    }

    #[test]
    fn out_of_viewport_target_does_not_reveal() {
        let (doc, cards) = doc_with_cards(&[5000.0]);
        let mut engine = RevealEngine::new();
        let _ = engine.register(
            &cards,
            RevealTransform::TranslateY(30.0),
            RevealOptions::default(),
        );
        let reveals = engine.observe(Viewport::new(0.0, 900.0), &doc);
        assert!(reveals.is_empty());
        assert_eq!(engine.pending(), 1);
    }

    #[test]
    fn in_viewport_target_reveals_with_final_state() {
        let (mut doc, cards) = doc_with_cards(&[300.0]);
        let mut engine = RevealEngine::new();
        let effects = engine.register(
            &cards,
            RevealTransform::TranslateY(30.0),
            RevealOptions::default(),
        );
        apply_all(&effects, &mut doc);

        let reveals = engine.observe(Viewport::new(0.0, 900.0), &doc);
        assert_eq!(reveals.len(), 1);
        assert_eq!(reveals[0].delay, Duration::ZERO);
        apply_all(&reveals[0].effects, &mut doc);

        assert_eq!(doc.style(cards[0], "opacity"), Some("1"));
        assert_eq!(doc.style(cards[0], "transform"), Some("translateY(0)"));
        assert!(doc.has_class(cards[0], "visible"));
    }

    #[test]
    fn reveal_is_one_shot() {
        let (doc, cards) = doc_with_cards(&[300.0]);
        let mut engine = RevealEngine::new();
        let _ = engine.register(
            &cards,
            RevealTransform::TranslateY(30.0),
            RevealOptions::default(),
        );
        let first = engine.observe(Viewport::new(0.0, 900.0), &doc);
        assert_eq!(first.len(), 1);

        // Scroll away and back: no second reveal.
        let away = engine.observe(Viewport::new(10_000.0, 900.0), &doc);
        assert!(away.is_empty());
        let back = engine.observe(Viewport::new(0.0, 900.0), &doc);
        assert!(back.is_empty());
        assert_eq!(engine.pending(), 0);
    }

    #[test]
    fn bottom_margin_delays_activation() {
        // Card occupies [860, 1060); viewport is [0, 900). Without the
        // margin 40px (20%) would be visible; with the 50px margin the
        // effective bottom is 850 and nothing is visible.
        let (doc, cards) = doc_with_cards(&[860.0]);
        let mut engine = RevealEngine::new();
        let _ = engine.register(
            &cards,
            RevealTransform::TranslateY(30.0),
            RevealOptions::default(),
        );
        assert!(engine.observe(Viewport::new(0.0, 900.0), &doc).is_empty());

        // Scrolling 60px further exposes 50px of the card beyond the
        // margin: 25% fraction, well past the 0.1 threshold.
        let reveals = engine.observe(Viewport::new(60.0, 900.0), &doc);
        assert_eq!(reveals.len(), 1);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        // Card [880, 1080), viewport [0, 900), margin 50 -> effective
        // bottom 850: nothing visible. Raise the viewport until exactly
        // 10% (20px) is visible past the margin.
        let (doc, cards) = doc_with_cards(&[880.0]);
        let mut engine = RevealEngine::new();
        let _ = engine.register(
            &cards,
            RevealTransform::TranslateY(30.0),
            RevealOptions::default(),
        );
        // effective bottom = offset + 850; need offset + 850 - 880 = 20 -> offset 50.
        let reveals = engine.observe(Viewport::new(50.0, 900.0), &doc);
        assert_eq!(reveals.len(), 1, "activation fires at exactly the threshold");
    }

    #[test]
    fn staggered_batch_spaces_delays() {
        let (doc, cards) = doc_with_cards(&[100.0, 320.0, 540.0]);
        let mut engine = RevealEngine::new();
        let _ = engine.register(
            &cards,
            RevealTransform::TranslateY(30.0),
            RevealOptions::default().stagger(true),
        );
        let reveals = engine.observe(Viewport::new(0.0, 900.0), &doc);
        assert_eq!(reveals.len(), 3);
        assert_eq!(reveals[0].delay, Duration::ZERO);
        assert_eq!(reveals[1].delay, Duration::from_millis(100));
        assert_eq!(reveals[2].delay, Duration::from_millis(200));
    }

    #[test]
    fn stagger_index_resets_per_batch() {
        let (doc, cards) = doc_with_cards(&[100.0, 5000.0]);
        let mut engine = RevealEngine::new();
        let _ = engine.register(
            &cards,
            RevealTransform::TranslateY(30.0),
            RevealOptions::default().stagger(true),
        );
        let first = engine.observe(Viewport::new(0.0, 900.0), &doc);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].delay, Duration::ZERO);

        // The second card reveals later, alone in its batch: no delay.
        let second = engine.observe(Viewport::new(4500.0, 900.0), &doc);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].delay, Duration::ZERO);
    }

    #[test]
    fn class_only_group_emits_only_the_class() {
        let mut doc = Document::new();
        let header = doc.append(
            None,
            ElementSpec::new("div").class("section-header").bounds(100.0, 80.0),
        );
        let mut engine = RevealEngine::new();
        engine.register_class_only(&[header], RevealOptions::default());

        let reveals = engine.observe(Viewport::new(0.0, 900.0), &doc);
        assert_eq!(reveals.len(), 1);
        assert_eq!(
            reveals[0].effects,
            vec![Effect::add_class(header, "visible")]
        );
    }

    #[test]
    fn transform_css_strings() {
        assert_eq!(RevealTransform::TranslateY(30.0).hidden_css(), "translateY(30px)");
        assert_eq!(RevealTransform::TranslateX(-30.0).hidden_css(), "translateX(-30px)");
        assert_eq!(RevealTransform::Scale(0.95).hidden_css(), "scale(0.95)");
        assert_eq!(RevealTransform::TranslateY(30.0).visible_css(), "translateY(0)");
        assert_eq!(RevealTransform::TranslateX(30.0).visible_css(), "translateX(0)");
        assert_eq!(RevealTransform::Scale(0.95).visible_css(), "scale(1)");
    }

    #[test]
    fn zero_height_element_never_reveals() {
        let mut doc = Document::new();
        let node = doc.append(None, ElementSpec::new("div").bounds(100.0, 0.0));
        let mut engine = RevealEngine::new();
        let _ = engine.register(
            &[node],
            RevealTransform::TranslateY(30.0),
            RevealOptions::default(),
        );
        assert!(engine.observe(Viewport::new(0.0, 900.0), &doc).is_empty());
    }

    #[test]
    fn detached_target_is_skipped() {
        let (mut doc, cards) = doc_with_cards(&[100.0]);
        let mut engine = RevealEngine::new();
        let _ = engine.register(
            &cards,
            RevealTransform::TranslateY(30.0),
            RevealOptions::default(),
        );
        doc.detach(cards[0]);
        assert!(engine.observe(Viewport::new(0.0, 900.0), &doc).is_empty());
    }
}
