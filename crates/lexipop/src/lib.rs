#![forbid(unsafe_code)]

//! LexiPop public facade crate.
//!
//! This crate provides the stable surface area for embedders. It re-exports
//! the overlay building blocks from the internal crates and offers a
//! lightweight prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use lexi_core::config::OverlayConfig;
pub use lexi_core::geometry::{Point, Rect, Side, Size};
pub use lexi_core::playback::{PlaybackRequest, PlaybackSource};
pub use lexi_core::pointer::{Modifiers, PointerButton, PointerEvent, PointerEventKind};
pub use lexi_core::word::{Accent, ExampleSentence, WordCategory, WordEntry};

// --- Placement re-exports --------------------------------------------------

pub use lexi_placement::{Placement, PlacementParams, resolve};

// --- Controller re-exports -------------------------------------------------

pub use lexi_overlay::{
    BubbleCmd, BubbleController, BubblePhase, DragConfig, JsonFileStore, MemoryStore,
    PositionStore, StoreError, TriggerCmd, TriggerController, TriggerPosition,
};

// --- Audio re-exports ------------------------------------------------------

#[cfg(feature = "audio")]
pub use lexi_audio::{
    AudioBackend, AudioError, AudioPlayer, CancelSource, CancelToken, NullBackend,
    PlaybackOutcome, play_times,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for LexiPop embedders.
#[derive(Debug)]
pub enum Error {
    /// Position store failure.
    Store(StoreError),
    /// Audio backend failure surfaced outside the player.
    #[cfg(feature = "audio")]
    Audio(AudioError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            #[cfg(feature = "audio")]
            Self::Audio(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            #[cfg(feature = "audio")]
            Self::Audio(err) => Some(err),
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

#[cfg(feature = "audio")]
impl From<AudioError> for Error {
    fn from(err: AudioError) -> Self {
        Self::Audio(err)
    }
}

/// Standard result type for LexiPop APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Accent, BubbleCmd, BubbleController, BubblePhase, DragConfig, Error, Modifiers,
        OverlayConfig, Placement, PlaybackRequest, Point, PointerEvent, PositionStore, Rect,
        Result, Side, Size, TriggerCmd, TriggerController, TriggerPosition, WordCategory,
        WordEntry,
    };

    #[cfg(feature = "audio")]
    pub use crate::{AudioPlayer, PlaybackOutcome, play_times};

    pub use crate::{core, overlay, placement};

    #[cfg(feature = "audio")]
    pub use crate::audio;
}

pub use lexi_core as core;
pub use lexi_overlay as overlay;
pub use lexi_placement as placement;

#[cfg(feature = "audio")]
pub use lexi_audio as audio;
