#![forbid(unsafe_code)]

//! Core: geometry, pointer events, word model, and configuration.
//!
//! # Role in LexiPop
//! `lexi-core` is the vocabulary layer. It owns the plain data every other
//! crate speaks: viewport-pixel geometry, the raw pointer events the
//! controllers consume, the dictionary word record, and the user
//! configuration.
//!
//! # Primary responsibilities
//! - **Geometry**: `Point`/`Size`/`Rect` in viewport pixels, plus `Side`.
//! - **Pointer events**: normalized `PointerEvent` values from the host.
//! - **Word model**: the externally-supplied `WordEntry` record.
//! - **Playback requests**: the data half of the audio contract.
//! - **Configuration**: `OverlayConfig` with stock-behavior defaults.
//!
//! # How it fits in the system
//! The placement engine (`lexi-placement`) computes with the geometry, the
//! audio crate (`lexi-audio`) executes the playback requests, and the
//! controllers (`lexi-overlay`) consume all of it. This crate has no I/O
//! and never suspends.

pub mod config;
pub mod geometry;
pub mod playback;
pub mod pointer;
pub mod word;

pub use config::OverlayConfig;
pub use geometry::{Point, Rect, Side, Size};
pub use playback::{PlaybackRequest, PlaybackSource};
pub use pointer::{Modifiers, PointerButton, PointerEvent, PointerEventKind};
pub use word::{Accent, ExampleSentence, WordCategory, WordEntry};
