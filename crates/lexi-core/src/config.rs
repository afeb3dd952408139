#![forbid(unsafe_code)]

//! Overlay configuration as data.
//!
//! Captures every user-tunable option the overlay consumes as a single
//! [`OverlayConfig`] value. The extension host ships options as a JSON
//! payload; with the `config-io` feature the struct loads straight from
//! that payload, with every missing field falling back to the default
//! behavior.
//!
//! # Defaults
//!
//! Every field defaults to the stock behavior: popover below the anchor,
//! one automatic US pronunciation at normal speed, all informational rows
//! visible.

use crate::geometry::Side;
use crate::word::Accent;

/// User-tunable overlay options, consumed at call time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct OverlayConfig {
    /// Preferred popover side relative to the anchor.
    pub bubble_position: Side,

    /// How many times to pronounce a word automatically when its popover
    /// first becomes visible. Zero disables auto-pronunciation.
    pub auto_pronounce_count: u8,

    /// Accent used for automatic pronunciation.
    pub auto_pronounce_accent: Accent,

    /// Playback rate handed to the voice service (1.0 = normal).
    pub tts_speed: f64,

    /// Show phonetic transcriptions in the popover.
    pub show_phonetic: bool,

    /// Show the dictionary translation row.
    pub show_dict_translation: bool,

    /// Show the original looked-up text row.
    pub show_original_text: bool,

    /// Show the dictionary example row.
    pub show_dict_example: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            bubble_position: Side::Bottom,
            auto_pronounce_count: 1,
            auto_pronounce_accent: Accent::Us,
            tts_speed: 1.0,
            show_phonetic: true,
            show_dict_translation: true,
            show_original_text: true,
            show_dict_example: true,
        }
    }
}

impl OverlayConfig {
    /// Parse a configuration from the host's JSON options payload.
    ///
    /// Missing fields take their defaults; unknown fields are ignored so
    /// newer hosts can ship options this version does not know about.
    #[cfg(feature = "config-io")]
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
