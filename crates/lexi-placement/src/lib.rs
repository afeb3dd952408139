#![forbid(unsafe_code)]

//! Placement: pure geometry for anchored floating panels.
//!
//! # Role in LexiPop
//! `lexi-placement` answers one question: given a word's bounding box, the
//! measured popover size, a preferred side, and the viewport, where does the
//! popover go? It is synchronous, infallible, and allocation-free.
//!
//! # Primary responsibilities
//! - **[`resolve`]**: gap offset, perpendicular centering, vertical flip,
//!   margin clamp.
//! - **[`PlacementParams`]**: the gap/margin distances as loadable data.
//!
//! # How it fits in the system
//! The popover controller (`lexi-overlay`) calls [`resolve`] once per
//! measure-then-place round trip and again whenever the anchor or the panel
//! size changes. Nothing here knows about rendering or timing.

pub mod params;
pub mod resolve;

pub use params::PlacementParams;
pub use resolve::{Placement, resolve};
