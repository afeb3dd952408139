#![forbid(unsafe_code)]

//! What to play: the request record handed to the audio layer.
//!
//! Pure data. The machinery that turns a request into sound lives in
//! `lexi-audio`; controllers only construct and forward these values.

use std::fmt;

use crate::word::Accent;

/// Where the sound comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackSource {
    /// Synthesize text through the external voice service.
    Speech {
        text: String,
        accent: Accent,
        /// Sentence prosody instead of single-word citation form.
        sentence: bool,
    },
    /// Fetch and play a pre-recorded clip.
    Url(String),
}

/// One playback request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    pub source: PlaybackSource,
    /// Playback rate, 1.0 = normal.
    pub speed: f64,
}

impl PlaybackRequest {
    /// Pronounce a single word.
    pub fn word(text: impl Into<String>, accent: Accent, speed: f64) -> Self {
        Self {
            source: PlaybackSource::Speech {
                text: text.into(),
                accent,
                sentence: false,
            },
            speed,
        }
    }

    /// Read a sentence aloud.
    pub fn sentence(text: impl Into<String>, accent: Accent, speed: f64) -> Self {
        Self {
            source: PlaybackSource::Speech {
                text: text.into(),
                accent,
                sentence: true,
            },
            speed,
        }
    }

    /// Play a pre-recorded clip at normal speed.
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            source: PlaybackSource::Url(url.into()),
            speed: 1.0,
        }
    }
}

impl fmt::Display for PlaybackRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            PlaybackSource::Speech {
                text,
                accent,
                sentence,
            } => {
                let kind = if *sentence { "sentence" } else { "word" };
                write!(f, "{kind} {text:?} [{accent}] x{}", self.speed)
            }
            PlaybackSource::Url(url) => write!(f, "url {url} x{}", self.speed),
        }
    }
}
