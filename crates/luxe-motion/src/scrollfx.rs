#![forbid(unsafe_code)]

//! Per-frame scroll effects: header state, parallax, active-nav links.
//!
//! Three independent scroll-reactive behaviors share one coalesced
//! offset so a burst of scroll events produces at most one effects pass
//! per animation frame:
//!
//! 1. **Header state** — the site header gains the `scrolled` class at
//!    an offset of 80 px and above, exact at the boundary.
//! 2. **Parallax** — the hero background translates at half scroll
//!    speed, the hero content at 0.3x while fading out linearly over
//!    800 px. The fade is clamped to `[0, 1]`; the unclamped negative
//!    opacity of the reference behavior past 800 px was a defect.
//! 3. **Active section** — with a probe at `offset + 100`, the section
//!    containing the probe marks its nav link `active`; every other
//!    link is cleared, and no containing section clears them all.
//!
//! Each behavior silently skips when its elements are absent.

use luxe_core::coalesce::ScrollCoalescer;
use luxe_core::dom::Document;
use luxe_core::effect::Effect;

/// Tunables for the scroll effects pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFxConfig {
    /// Offset at and above which the header is "scrolled".
    pub header_threshold: f64,
    /// Hero background parallax factor.
    pub background_factor: f64,
    /// Hero content parallax factor.
    pub foreground_factor: f64,
    /// Distance over which the hero content fades to zero.
    pub fade_distance: f64,
    /// Probe offset added to the scroll position for section matching.
    pub probe_offset: f64,
}

impl Default for ScrollFxConfig {
    fn default() -> Self {
        Self {
            header_threshold: 80.0,
            background_factor: 0.5,
            foreground_factor: 0.3,
            fade_distance: 800.0,
            probe_offset: 100.0,
        }
    }
}

impl ScrollFxConfig {
    /// Override the header threshold.
    #[must_use]
    pub fn header_threshold(mut self, threshold: f64) -> Self {
        self.header_threshold = threshold;
        self
    }

    /// Override the hero content fade distance.
    #[must_use]
    pub fn fade_distance(mut self, distance: f64) -> Self {
        self.fade_distance = distance;
        self
    }
}

/// Scroll-reactive effects, throttled to one pass per frame.
#[derive(Debug, Clone, Default)]
pub struct ScrollFx {
    config: ScrollFxConfig,
    coalescer: ScrollCoalescer,
}

impl ScrollFx {
    /// Create with default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with explicit tuning.
    #[must_use]
    pub fn with_config(config: ScrollFxConfig) -> Self {
        Self {
            config,
            coalescer: ScrollCoalescer::new(),
        }
    }

    /// Queue a scroll offset; supersedes any not-yet-processed one.
    pub fn on_scroll(&mut self, offset: f64) {
        self.coalescer.push(offset);
    }

    /// Whether a scroll offset is waiting for the next frame.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.coalescer.has_pending()
    }

    /// Run the effects pass for the pending offset, if any.
    ///
    /// Returns the consumed offset alongside the effects so the caller
    /// can reuse it (e.g. for reveal observation).
    pub fn on_frame(&mut self, doc: &Document) -> Option<(f64, Vec<Effect>)> {
        let offset = self.coalescer.take()?;
        let mut effects = Vec::new();
        self.header_effects(offset, doc, &mut effects);
        self.parallax_effects(offset, doc, &mut effects);
        self.active_section_effects(offset, doc, &mut effects);
        Some((offset, effects))
    }

    fn header_effects(&self, offset: f64, doc: &Document, out: &mut Vec<Effect>) {
        let Some(header) = doc.first_by_class("header") else {
            return;
        };
        if offset >= self.config.header_threshold {
            out.push(Effect::add_class(header, "scrolled"));
        } else {
            out.push(Effect::remove_class(header, "scrolled"));
        }
    }

    fn parallax_effects(&self, offset: f64, doc: &Document, out: &mut Vec<Effect>) {
        if let Some(hero) = doc.first_by_class("hero") {
            let shift = offset * self.config.background_factor;
            out.push(Effect::set_style(
                hero,
                "transform",
                format!("translateY({shift}px)"),
            ));
        }
        if let Some(content) = doc.first_by_class("hero-content") {
            let shift = offset * self.config.foreground_factor;
            let opacity = (1.0 - offset / self.config.fade_distance).clamp(0.0, 1.0);
            out.push(Effect::set_style(
                content,
                "transform",
                format!("translateY({shift}px)"),
            ));
            out.push(Effect::set_style(content, "opacity", format!("{opacity}")));
        }
    }

    fn active_section_effects(&self, offset: f64, doc: &Document, out: &mut Vec<Effect>) {
        let links = doc.by_class("nav-link");
        if links.is_empty() {
            return;
        }

        let probe = offset + self.config.probe_offset;
        let mut current: Option<String> = None;
        for section in doc.by_tag("section") {
            let Some(element) = doc.get(section) else {
                continue;
            };
            if element.bounds.contains(probe) {
                // A section without an id still wins the probe; it just
                // matches no link.
                current = element.dom_id.clone();
            }
        }

        for link in links {
            out.push(Effect::remove_class(link, "active"));
            let matches_current = match (&current, doc.get(link).and_then(|e| e.href.as_deref())) {
                (Some(id), Some(href)) => href.strip_prefix('#') == Some(id.as_str()),
                _ => false,
            };
            if matches_current {
                out.push(Effect::add_class(link, "active"));
            }
        }
    }
}
