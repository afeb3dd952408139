#![forbid(unsafe_code)]

//! Audio: single-flight pronunciation and sentence playback.
//!
//! # Role in LexiPop
//! `lexi-audio` owns the one shared resource in the overlay: the logical
//! "currently playing" slot. Whoever asks last gets the slot; whoever held
//! it resolves cleanly as interrupted.
//!
//! # Primary responsibilities
//! - **[`AudioPlayer`]**: preempting single-flight `play`/`stop`.
//! - **[`PlaybackRequest`]**: speech-synthesis or direct-URL sources.
//! - **[`AudioBackend`]**: the seam to the real voice service and output.
//! - **[`CancelSource`]/[`CancelToken`]**: cooperative interruption.
//!
//! # How it fits in the system
//! The popover controller emits playback commands; the embedder executes
//! them against one shared player. All waiting happens at `await` points,
//! so the player runs fine on a single-threaded executor and fits the
//! event-loop model of the host page.

pub mod backend;
pub mod cancellation;
pub mod player;

pub use backend::{AudioBackend, AudioError, NullBackend};
pub use cancellation::{CancelSource, CancelToken};
pub use player::{AudioPlayer, PlaybackOutcome, play_times};

// The request record itself is plain data and lives in `lexi-core`;
// re-exported here so audio callers see one coherent surface.
pub use lexi_core::playback::{PlaybackRequest, PlaybackSource};
