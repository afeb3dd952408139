// SPDX-License-Identifier: MIT

//! Durable storage for the trigger position.
//!
//! The position is the only durable state in the overlay: a `{x, y}` pair
//! read once at startup and written once per completed drag. The store is a
//! seam; browser hosts adapt their extension-storage API behind
//! [`PositionStore`], native hosts use [`JsonFileStore`], and tests use
//! [`MemoryStore`].
//!
//! # File format
//!
//! ```json
//! {
//!   "version": 1,
//!   "x": 976.0,
//!   "y": 120.0
//! }
//! ```
//!
//! Writes use a temp-file-then-rename pattern to prevent corruption on
//! crash.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::trigger::TriggerPosition;

/// Current file format version.
const FORMAT_VERSION: u64 = 1;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from loading or saving a position.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error reading or writing the backing file.
    Io(io::Error),
    /// JSON encode/decode error.
    Json(serde_json::Error),
    /// The stored file claims a format version this build does not know.
    Version(u64),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Version(found) => {
                write!(
                    f,
                    "unsupported position file version: {found} (expected {FORMAT_VERSION})"
                )
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Version(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Where the trigger position lives between sessions.
pub trait PositionStore {
    /// Load the persisted position, `None` if nothing was stored yet.
    fn load(&self) -> Result<Option<TriggerPosition>, StoreError>;

    /// Durably store `position`, replacing any previous value.
    fn save(&mut self, position: TriggerPosition) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// On-disk representation of the position.
#[derive(Debug, Serialize, Deserialize)]
struct PositionFile {
    version: u64,
    x: f64,
    y: f64,
}

/// JSON-file-backed store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`. The parent directory must
    /// already exist; the file itself may not.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PositionStore for JsonFileStore {
    fn load(&self) -> Result<Option<TriggerPosition>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path).map_err(StoreError::Io)?;
        let file: PositionFile = serde_json::from_str(&contents).map_err(StoreError::Json)?;
        if file.version != FORMAT_VERSION {
            return Err(StoreError::Version(file.version));
        }
        Ok(Some(TriggerPosition::new(file.x, file.y)))
    }

    fn save(&mut self, position: TriggerPosition) -> Result<(), StoreError> {
        let file = PositionFile {
            version: FORMAT_VERSION,
            x: position.x,
            y: position.y,
        };
        let json = serde_json::to_string_pretty(&file).map_err(StoreError::Json)?;

        // Atomic write: temp file then rename.
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json).map_err(StoreError::Io)?;
        std::fs::rename(&temp, &self.path).map_err(StoreError::Io)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Volatile store for tests and hosts that manage durability themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    position: Option<TriggerPosition>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PositionStore for MemoryStore {
    fn load(&self) -> Result<Option<TriggerPosition>, StoreError> {
        Ok(self.position)
    }

    fn save(&mut self, position: TriggerPosition) -> Result<(), StoreError> {
        self.position = Some(position);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
