// SPDX-License-Identifier: MIT
//! Anchored panel placement.
//!
//! Web overlays reach for floating-ui to keep a popover near its anchor and
//! inside the viewport. This module is the explicit, dependency-free
//! equivalent: one pure function from measured inputs to a final position.
//!
//! The solver is deliberately dumb about timing: it trusts the panel size it
//! is given. Callers own the measure-then-place protocol and must re-invoke
//! on every anchor or size change.

#![forbid(unsafe_code)]

use lexi_core::geometry::{Rect, Side, Size};
use serde::{Deserialize, Serialize};

use crate::params::PlacementParams;

/// Final position for a measured panel, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Top edge of the panel.
    pub top: f64,
    /// Left edge of the panel.
    pub left: f64,
    /// The side actually used. Differs from the preferred side after a
    /// flip; the caller orients the panel arrow with it.
    pub side: Side,
}

/// Resolve a panel position relative to an anchor.
///
/// The panel is placed `params.gap` pixels off the preferred anchor edge,
/// centered along the perpendicular axis. A vertical preference flips to
/// the opposite edge when the panel would cross the viewport margin and the
/// opposite edge has room; `Left`/`Right` preferences never flip. Both axes
/// are then clamped into the viewport margin box.
///
/// Infallible: degenerate inputs (zero-sized panel, negative viewport)
/// settle at the margin edge instead of failing. A panel wider or taller
/// than the margin box pins to the top/left margin and overflows the far
/// edge.
pub fn resolve(
    anchor: Rect,
    panel: Size,
    preferred: Side,
    viewport: Size,
    params: &PlacementParams,
) -> Placement {
    let side = resolve_side(anchor, panel, preferred, viewport, params);
    let (top, left) = naive_position(anchor, panel, side, params.gap);
    Placement {
        top: clamp_axis(top, panel.height, viewport.height, params.margin),
        left: clamp_axis(left, panel.width, viewport.width, params.margin),
        side,
    }
}

/// Apply the vertical flip policy.
///
/// Flips only when the preferred edge overflows AND the opposite edge fits
/// entirely inside the margin box; when neither fits, the preferred side
/// wins and clamping absorbs the overflow.
fn resolve_side(
    anchor: Rect,
    panel: Size,
    preferred: Side,
    viewport: Size,
    params: &PlacementParams,
) -> Side {
    let gap = params.gap;
    let margin = params.margin;
    match preferred {
        Side::Bottom => {
            let overflows = anchor.bottom() + gap + panel.height > viewport.height - margin;
            let fits_above = anchor.top() - gap - panel.height > margin;
            if overflows && fits_above {
                Side::Top
            } else {
                Side::Bottom
            }
        }
        Side::Top => {
            let overflows = anchor.top() - gap - panel.height < margin;
            let fits_below = anchor.bottom() + gap + panel.height < viewport.height - margin;
            if overflows && fits_below {
                Side::Bottom
            } else {
                Side::Top
            }
        }
        side => side,
    }
}

/// Position for the given side before clamping, centered on the anchor
/// along the perpendicular axis. Returns `(top, left)`.
fn naive_position(anchor: Rect, panel: Size, side: Side, gap: f64) -> (f64, f64) {
    match side {
        Side::Top => (
            anchor.top() - panel.height - gap,
            anchor.center_x() - panel.width / 2.0,
        ),
        Side::Bottom => (
            anchor.bottom() + gap,
            anchor.center_x() - panel.width / 2.0,
        ),
        Side::Left => (
            anchor.center_y() - panel.height / 2.0,
            anchor.left() - panel.width - gap,
        ),
        Side::Right => (
            anchor.center_y() - panel.height / 2.0,
            anchor.right() + gap,
        ),
    }
}

/// Clamp one axis into `[margin, viewport_extent - extent - margin]`.
///
/// When the range is inverted (panel larger than the margin box), the
/// margin edge wins.
fn clamp_axis(position: f64, extent: f64, viewport_extent: f64, margin: f64) -> f64 {
    let max = viewport_extent - extent - margin;
    position.min(max).max(margin)
}
