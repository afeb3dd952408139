#![forbid(unsafe_code)]

//! The word-entry record supplied by the dictionary collaborator.
//!
//! The overlay core performs no dictionary lookups. A fully formed
//! [`WordEntry`] arrives from outside; the core reads `text` for audio and
//! display, `category` to derive the initial added-state, and the optional
//! phonetic/example fields when asked to play them. Everything else about
//! the entry (definitions, senses, frequency data) stays with the
//! collaborator.

/// Pronunciation accent variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Accent {
    /// American English.
    #[default]
    Us,
    /// British English.
    Uk,
}

impl Accent {
    /// Uppercase tag as the voice service expects it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Accent::Us => "US",
            Accent::Uk => "UK",
        }
    }
}

impl std::fmt::Display for Accent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Learning status of a word, as tracked by the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WordCategory {
    /// Never collected.
    #[default]
    New,
    /// In the user's learning queue.
    Learning,
    /// Marked as mastered.
    Known,
}

impl WordCategory {
    /// Whether this category means the word is already in the user's
    /// vocabulary book.
    #[inline]
    pub const fn is_added(self) -> bool {
        matches!(self, WordCategory::Learning | WordCategory::Known)
    }
}

/// An example sentence attached to a dictionary entry.
///
/// When the source dictionary ships a pre-recorded reading, `audio_url`
/// points at it; otherwise playback falls back to synthesizing `text`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ExampleSentence {
    pub text: String,
    pub audio_url: Option<String>,
}

impl ExampleSentence {
    /// Create an example with no recording.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            audio_url: None,
        }
    }

    /// Attach a pre-recorded reading.
    #[must_use]
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }
}

/// One dictionary entry, as handed over by the data collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct WordEntry {
    /// Opaque identifier; entry identity for memoization and add-intents.
    pub id: String,
    /// The word itself, as displayed and as sent to the voice service.
    pub text: String,
    /// Learning status at lookup time.
    pub category: WordCategory,
    /// IPA transcription, American.
    pub phonetic_us: Option<String>,
    /// IPA transcription, British.
    pub phonetic_uk: Option<String>,
    /// Primary translation line.
    pub translation: Option<String>,
    /// Example sentence, possibly with a recording.
    pub example: Option<ExampleSentence>,
}

impl WordEntry {
    /// Create a minimal entry.
    pub fn new(id: impl Into<String>, text: impl Into<String>, category: WordCategory) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category,
            ..Self::default()
        }
    }

    /// Set both phonetic transcriptions.
    #[must_use]
    pub fn with_phonetics(
        mut self,
        us: impl Into<String>,
        uk: impl Into<String>,
    ) -> Self {
        self.phonetic_us = Some(us.into());
        self.phonetic_uk = Some(uk.into());
        self
    }

    /// Set the translation line.
    #[must_use]
    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    /// Attach an example sentence.
    #[must_use]
    pub fn with_example(mut self, example: ExampleSentence) -> Self {
        self.example = Some(example);
        self
    }

    /// The transcription for the given accent, if the entry carries one.
    pub fn phonetic(&self, accent: Accent) -> Option<&str> {
        match accent {
            Accent::Us => self.phonetic_us.as_deref(),
            Accent::Uk => self.phonetic_uk.as_deref(),
        }
    }
}
