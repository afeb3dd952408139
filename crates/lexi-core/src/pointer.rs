#![forbid(unsafe_code)]

//! Raw pointer events as delivered by the host page.
//!
//! The overlay never talks to the DOM directly; the embedder translates
//! whatever event source it has (mouse events, pointer events, synthetic
//! test input) into this small vocabulary and feeds it to the controllers.
//!
//! # Invariants
//!
//! 1. Positions are viewport coordinates (same space as
//!    [`crate::geometry::Rect`]).
//! 2. A `Down` is eventually paired with exactly one `Up` or `Cancel` for
//!    the same button; the host owns pointer capture and guarantees this.
//! 3. `Move` events may arrive at any rate; consumers must not assume
//!    coalescing.

use bitflags::bitflags;

use crate::geometry::Point;

bitflags! {
    /// Keyboard modifiers held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

/// Which physical button an event refers to.
///
/// Matches the DOM `button` numbering for the three buttons the overlay
/// cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// Left button (DOM button 0).
    #[default]
    Primary,
    /// Middle button / wheel press (DOM button 1).
    Auxiliary,
    /// Right button (DOM button 2).
    Secondary,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Button pressed.
    Down,
    /// Pointer moved (any button state).
    Move,
    /// Button released.
    Up,
    /// The gesture was aborted by the host (capture lost, page blur).
    Cancel,
}

/// One pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create an event with default button and no modifiers.
    pub const fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            button: PointerButton::Primary,
            modifiers: Modifiers::empty(),
        }
    }

    /// Primary-button press at the given position.
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y))
    }

    /// Pointer move to the given position.
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y))
    }

    /// Primary-button release at the given position.
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y))
    }

    /// Host-initiated gesture abort.
    pub const fn cancel(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Cancel, Point::new(x, y))
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
