#![forbid(unsafe_code)]

//! Motion: one-shot viewport reveals and per-frame scroll effects.

pub mod reveal;
pub mod scrollfx;

pub use reveal::{Reveal, RevealEngine, RevealOptions, RevealTransform, Viewport};
pub use scrollfx::{ScrollFx, ScrollFxConfig};
