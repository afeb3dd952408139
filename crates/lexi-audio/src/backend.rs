#![forbid(unsafe_code)]

//! The seam between playback orchestration and actual sound.
//!
//! The player knows nothing about voice services, codecs, or output
//! devices; it drives an [`AudioBackend`]. A real extension backs this with
//! its TTS endpoint and the host's audio element; tests and headless hosts
//! use scripted fakes or [`NullBackend`].

use async_trait::async_trait;

use lexi_core::playback::PlaybackRequest;

use crate::cancellation::CancelToken;

/// Why a backend could not produce sound.
#[derive(Debug)]
pub enum AudioError {
    /// The clip or synthesized speech could not be fetched.
    Acquisition(String),
    /// The payload arrived but could not be decoded.
    Decode(String),
    /// The output device rejected the stream.
    Output(String),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::Acquisition(msg) => write!(f, "audio acquisition failed: {msg}"),
            AudioError::Decode(msg) => write!(f, "audio decode failed: {msg}"),
            AudioError::Output(msg) => write!(f, "audio output failed: {msg}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Acquires and audibly plays single requests.
///
/// Implementations must watch `cancel` and return promptly once it fires;
/// anything returned after cancellation is treated as an interruption by
/// the player, never surfaced as an error. One call handles one request
/// from fetch to the last sample; the player guarantees calls never
/// overlap.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Play `request` to completion or until `cancel` fires.
    async fn play(&self, request: &PlaybackRequest, cancel: &CancelToken)
    -> Result<(), AudioError>;
}

/// Backend that produces no sound and completes immediately.
///
/// Useful for headless hosts and for exercising controller flows without
/// audio hardware.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

#[async_trait]
impl AudioBackend for NullBackend {
    async fn play(
        &self,
        _request: &PlaybackRequest,
        _cancel: &CancelToken,
    ) -> Result<(), AudioError> {
        Ok(())
    }
}
