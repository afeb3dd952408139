#![forbid(unsafe_code)]

//! Placement tuning as data.
//!
//! The two distances the solver uses are deliberately few: a `gap` between
//! the anchor and the panel edge, and a `margin` the panel keeps from every
//! viewport edge. Both default to the stock overlay look and can be loaded
//! from configuration without touching code.

use serde::{Deserialize, Serialize};

/// Distances used by [`crate::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementParams {
    /// Pixels between the anchor edge and the facing panel edge.
    pub gap: f64,
    /// Minimum pixels between the panel and any viewport edge.
    pub margin: f64,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            gap: 12.0,
            margin: 10.0,
        }
    }
}

impl PlacementParams {
    /// Create params with explicit distances.
    pub const fn new(gap: f64, margin: f64) -> Self {
        Self { gap, margin }
    }
}
