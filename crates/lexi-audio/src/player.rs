#![forbid(unsafe_code)]

//! The single-flight playback slot.
//!
//! At most one playback is audibly active at any time. A new `play` call
//! preempts whatever is in flight rather than queueing behind it, so a
//! later request always wins. Preemption and explicit stops resolve the
//! preempted call with [`PlaybackOutcome::Interrupted`]; acquisition
//! failures are logged and resolve with [`PlaybackOutcome::Unavailable`].
//! Nothing in this module returns an error to the caller: pronunciation is
//! a convenience, and the popover must never fail because the network did.

use std::sync::{Arc, Mutex};

use lexi_core::playback::PlaybackRequest;

use crate::backend::AudioBackend;
use crate::cancellation::{CancelSource, CancelToken};

/// How a playback ended.
///
/// `play` never fails: interruption is a normal outcome of preemption or an
/// explicit stop, and acquisition problems degrade to `Unavailable` after a
/// log line. Callers needing the distinction read the outcome; callers that
/// treat audio as fire-and-forget drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The sound played to its natural end.
    Completed,
    /// Preempted by a later request or stopped.
    Interrupted,
    /// The audio could not be obtained or produced.
    Unavailable,
}

impl PlaybackOutcome {
    /// True only for a natural end.
    #[inline]
    pub const fn is_completed(self) -> bool {
        matches!(self, PlaybackOutcome::Completed)
    }

    /// True when a later request or a stop won the slot.
    #[inline]
    pub const fn is_interrupted(self) -> bool {
        matches!(self, PlaybackOutcome::Interrupted)
    }
}

/// Serializes playback through one logical slot.
///
/// Cheap to clone; clones share the slot, so a `play` on one clone preempts
/// a playback started through another.
#[derive(Clone)]
pub struct AudioPlayer {
    inner: Arc<PlayerInner>,
}

struct PlayerInner {
    backend: Arc<dyn AudioBackend>,
    slot: Mutex<Slot>,
}

/// The occupant of the playback slot plus a monotonic claim counter.
///
/// The counter tells a finished playback whether it still owns the slot;
/// without it, a preempted play could clear the source its successor just
/// installed.
#[derive(Default)]
struct Slot {
    current: Option<CancelSource>,
    generation: u64,
}

impl AudioPlayer {
    /// Create a player over the given backend.
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            inner: Arc::new(PlayerInner {
                backend,
                slot: Mutex::new(Slot::default()),
            }),
        }
    }

    /// Play one request, preempting any playback currently in flight.
    ///
    /// Resolves when the sound finishes, is preempted/stopped, or turns out
    /// to be unobtainable. Never returns an error; see
    /// [`PlaybackOutcome`].
    pub async fn play(&self, request: PlaybackRequest) -> PlaybackOutcome {
        let (token, generation) = self.claim_slot();
        tracing::debug!(target: "lexipop.audio", request = %request, generation, "playback started");

        let result = tokio::select! {
            res = self.inner.backend.play(&request, &token) => Some(res),
            () = token.cancelled() => None,
        };

        self.release_slot(generation);

        match result {
            Some(Ok(())) if !token.is_cancelled() => {
                tracing::debug!(target: "lexipop.audio", generation, "playback completed");
                PlaybackOutcome::Completed
            }
            Some(Err(err)) if !token.is_cancelled() => {
                tracing::warn!(target: "lexipop.audio", generation, error = %err, "playback unavailable");
                PlaybackOutcome::Unavailable
            }
            _ => {
                tracing::debug!(target: "lexipop.audio", generation, "playback interrupted");
                PlaybackOutcome::Interrupted
            }
        }
    }

    /// Stop the in-flight playback, if any.
    ///
    /// The preempted `play` call resolves with
    /// [`PlaybackOutcome::Interrupted`]; the hardware may take a moment to
    /// fall silent, but the slot is logically free on return.
    pub fn stop(&self) {
        let mut slot = self.lock_slot();
        if let Some(source) = slot.current.take() {
            source.cancel();
            tracing::debug!(target: "lexipop.audio", "playback stopped");
        }
    }

    /// Whether a playback currently owns the slot.
    pub fn is_playing(&self) -> bool {
        self.lock_slot().current.is_some()
    }

    /// Cancel the current occupant and install a fresh source.
    fn claim_slot(&self) -> (CancelToken, u64) {
        let mut slot = self.lock_slot();
        if let Some(previous) = slot.current.take() {
            previous.cancel();
            tracing::debug!(target: "lexipop.audio", "preempting in-flight playback");
        }
        let source = CancelSource::new();
        let token = source.token();
        slot.current = Some(source);
        slot.generation += 1;
        (token, slot.generation)
    }

    /// Clear the slot, but only if this playback still owns it.
    fn release_slot(&self, generation: u64) {
        let mut slot = self.lock_slot();
        if slot.generation == generation {
            slot.current = None;
        }
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.inner.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Play `request` up to `count` times, one after another.
///
/// The single-flight contract forbids concurrent plays, so each repeat is
/// awaited before the next starts. The loop ends early once a repeat does
/// not complete naturally: a preemption means a later request took the
/// slot, and an unavailable source will not heal between repeats. Returns
/// the last outcome; `count == 0` plays nothing and reports `Completed`.
pub async fn play_times(
    player: &AudioPlayer,
    request: &PlaybackRequest,
    count: u8,
) -> PlaybackOutcome {
    let mut outcome = PlaybackOutcome::Completed;
    for _ in 0..count {
        outcome = player.play(request.clone()).await;
        if !outcome.is_completed() {
            break;
        }
    }
    outcome
}
