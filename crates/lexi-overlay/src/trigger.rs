// SPDX-License-Identifier: MIT

//! Click-vs-drag handling for the floating trigger button.
//!
//! The trigger is the small always-on-top button the user can drag anywhere
//! on the page. This module owns its screen position, classifies each
//! pointer gesture as a click or a drag, tracks the live position while the
//! button is held, and decides when the settled position should be written
//! back to the position store.
//!
//! # Invariants
//!
//! 1. A gesture is a click xor a drag: the click command is suppressed once
//!    pointer displacement strictly exceeds [`DragConfig::threshold`], and a
//!    sub-threshold gesture never commits a position.
//! 2. The owned position changes durably only through a completed drag. A
//!    gesture reclassified as a click restores the position held at
//!    pointer-down.
//! 3. Exactly one [`TriggerCmd::Persist`] is emitted per completed drag.
//!
//! Pointer events arrive pre-translated by the host page (see
//! [`lexi_core::pointer`]); the controller is synchronous and never touches
//! the DOM or the store itself.

use lexi_core::geometry::{Point, Size};
use lexi_core::pointer::{Modifiers, PointerButton, PointerEvent, PointerEventKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunable parameters for gesture classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Manhattan distance in CSS pixels the pointer must travel before the
    /// gesture counts as a drag rather than click jitter. Default: 3.0,
    /// strictly exceeded.
    pub threshold: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { threshold: 3.0 }
    }
}

impl DragConfig {
    /// Config with a custom drag threshold.
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The trigger's persisted screen position: the top-left corner of the
/// button in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TriggerPosition {
    pub x: f64,
    pub y: f64,
}

impl TriggerPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for TriggerPosition {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<TriggerPosition> for Point {
    fn from(position: TriggerPosition) -> Self {
        Self::new(position.x, position.y)
    }
}

/// What the host should do in response to a pointer event.
///
/// Commands are ordered; the host applies them sequentially.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerCmd {
    /// The gesture was a click; toggle whatever the trigger is bound to.
    /// Carries the modifiers held at release.
    Clicked { modifiers: Modifiers },
    /// Live position while a gesture is in progress, and the settled
    /// position when it ends. Render it; do not persist it.
    Moved(Point),
    /// A drag completed; write this position to the store.
    Persist(TriggerPosition),
}

/// Ephemeral per-gesture state, created on pointer-down and destroyed on
/// pointer-up or cancel.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    /// Element position when the gesture began.
    start_position: Point,
    /// Pointer position when the gesture began.
    start_pointer: Point,
    /// Latched once displacement strictly exceeds the threshold; never
    /// cleared for the rest of the session.
    moved: bool,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// State machine for the floating trigger.
///
/// Feed every pointer event touching the trigger to [`process`]; it returns
/// the commands the host must apply. Idle → dragging on primary-button
/// down, dragging → idle on up or cancel.
///
/// [`process`]: TriggerController::process
#[derive(Debug)]
pub struct TriggerController {
    config: DragConfig,
    /// Live top-left corner; equals the durable position while idle.
    position: Point,
    /// Rendered size of the trigger, used to keep it fully on-screen.
    size: Size,
    viewport: Size,
    session: Option<DragSession>,
    badge_count: u32,
}

impl TriggerController {
    /// Controller at `initial` (typically loaded from the position store)
    /// with the default [`DragConfig`].
    pub fn new(initial: TriggerPosition, size: Size, viewport: Size) -> Self {
        Self {
            config: DragConfig::default(),
            position: initial.into(),
            size,
            viewport,
            session: None,
            badge_count: 0,
        }
    }

    /// Replace the gesture configuration.
    #[must_use]
    pub fn with_config(mut self, config: DragConfig) -> Self {
        self.config = config;
        self
    }

    /// Process one pointer event, returning commands for the host.
    pub fn process(&mut self, event: &PointerEvent) -> Vec<TriggerCmd> {
        let mut out = Vec::new();
        match event.kind {
            PointerEventKind::Down => self.on_down(event),
            PointerEventKind::Move => self.on_move(event, &mut out),
            PointerEventKind::Up => self.on_up(event, &mut out),
            PointerEventKind::Cancel => self.abort(&mut out),
        }
        out
    }

    /// Abort any gesture in progress, restoring the position held at
    /// pointer-down. Nothing is persisted.
    pub fn cancel_drag(&mut self) -> Vec<TriggerCmd> {
        let mut out = Vec::new();
        self.abort(&mut out);
        out
    }

    /// Update the viewport and re-clamp the current position into it,
    /// returning the possibly adjusted position. Lets the embedder sanitize
    /// a stored position after a resolution change.
    pub fn clamp_into(&mut self, viewport: Size) -> Point {
        self.viewport = viewport;
        self.position = self.clamp_point(self.position);
        self.position
    }

    /// Update the viewport without moving the trigger.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Current top-left corner of the trigger.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// True once the current gesture has crossed the drag threshold.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.moved)
    }

    /// Set the unread-count badge. Zero hides the badge.
    pub fn set_badge_count(&mut self, count: u32) {
        self.badge_count = count;
    }

    #[inline]
    pub fn badge_count(&self) -> u32 {
        self.badge_count
    }

    /// Text for the badge, `None` when it should not be shown. Counts above
    /// 99 render as `99+`.
    pub fn badge_label(&self) -> Option<String> {
        match self.badge_count {
            0 => None,
            n if n > 99 => Some("99+".to_owned()),
            n => Some(n.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal handlers
// ---------------------------------------------------------------------------

impl TriggerController {
    fn on_down(&mut self, event: &PointerEvent) {
        if event.button != PointerButton::Primary {
            return;
        }
        self.session = Some(DragSession {
            start_position: self.position,
            start_pointer: event.position,
            moved: false,
        });
    }

    fn on_move(&mut self, event: &PointerEvent, out: &mut Vec<TriggerCmd>) {
        let Some(ref mut session) = self.session else {
            return;
        };

        if !session.moved {
            let distance = session.start_pointer.manhattan_distance(&event.position);
            if distance > self.config.threshold {
                session.moved = true;
                debug!(target: "lexipop.trigger", distance, "drag threshold crossed");
            }
        }

        self.position = session.start_position.offset(
            event.position.x - session.start_pointer.x,
            event.position.y - session.start_pointer.y,
        );
        out.push(TriggerCmd::Moved(self.position));
    }

    fn on_up(&mut self, event: &PointerEvent, out: &mut Vec<TriggerCmd>) {
        if event.button != PointerButton::Primary {
            return;
        }
        let Some(session) = self.session.take() else {
            return;
        };

        if !session.moved {
            // Click jitter: put the trigger back where the gesture found it.
            if self.position != session.start_position {
                self.position = session.start_position;
                out.push(TriggerCmd::Moved(self.position));
            }
            out.push(TriggerCmd::Clicked {
                modifiers: event.modifiers,
            });
            return;
        }

        self.position = self.clamp_point(self.position);
        out.push(TriggerCmd::Moved(self.position));
        out.push(TriggerCmd::Persist(self.position.into()));
        debug!(
            target: "lexipop.trigger",
            x = self.position.x,
            y = self.position.y,
            "drag committed"
        );
    }

    fn abort(&mut self, out: &mut Vec<TriggerCmd>) {
        let Some(session) = self.session.take() else {
            return;
        };
        if self.position != session.start_position {
            self.position = session.start_position;
            out.push(TriggerCmd::Moved(self.position));
        }
        debug!(target: "lexipop.trigger", "gesture aborted");
    }

    fn clamp_point(&self, point: Point) -> Point {
        let max_x = (self.viewport.width - self.size.width).max(0.0);
        let max_y = (self.viewport.height - self.size.height).max(0.0);
        Point::new(
            point.x.min(max_x).max(0.0),
            point.y.min(max_y).max(0.0),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1024.0, 600.0);
    const TRIGGER: Size = Size::new(48.0, 48.0);

    fn controller() -> TriggerController {
        TriggerController::new(TriggerPosition::new(100.0, 100.0), TRIGGER, VIEWPORT)
    }

    fn drag(
        ctrl: &mut TriggerController,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Vec<TriggerCmd> {
        let mut out = ctrl.process(&PointerEvent::down(from.0, from.1));
        out.extend(ctrl.process(&PointerEvent::moved(to.0, to.1)));
        out.extend(ctrl.process(&PointerEvent::up(to.0, to.1)));
        out
    }

    fn persist_count(cmds: &[TriggerCmd]) -> usize {
        cmds.iter()
            .filter(|cmd| matches!(cmd, TriggerCmd::Persist(_)))
            .count()
    }

    fn has_click(cmds: &[TriggerCmd]) -> bool {
        cmds.iter()
            .any(|cmd| matches!(cmd, TriggerCmd::Clicked { .. }))
    }

    #[test]
    fn click_without_movement_fires_once() {
        let mut ctrl = controller();
        let cmds = drag(&mut ctrl, (110.0, 110.0), (110.0, 110.0));
        assert_eq!(
            cmds,
            vec![
                TriggerCmd::Moved(Point::new(100.0, 100.0)),
                TriggerCmd::Clicked {
                    modifiers: Modifiers::empty()
                }
            ]
        );
        assert_eq!(ctrl.position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn sub_threshold_jitter_is_still_a_click() {
        let mut ctrl = controller();
        ctrl.process(&PointerEvent::down(110.0, 110.0));
        // Manhattan distance exactly 3.0: not strictly above the threshold.
        let live = ctrl.process(&PointerEvent::moved(112.0, 111.0));
        assert_eq!(live, vec![TriggerCmd::Moved(Point::new(102.0, 101.0))]);
        assert!(!ctrl.is_dragging());

        let cmds = ctrl.process(&PointerEvent::up(112.0, 111.0));
        assert_eq!(
            cmds,
            vec![
                TriggerCmd::Moved(Point::new(100.0, 100.0)),
                TriggerCmd::Clicked {
                    modifiers: Modifiers::empty()
                }
            ]
        );
        assert_eq!(ctrl.position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn drag_suppresses_click() {
        let mut ctrl = controller();
        let cmds = drag(&mut ctrl, (110.0, 110.0), (160.0, 140.0));
        assert!(!has_click(&cmds));
        assert_eq!(persist_count(&cmds), 1);
        assert_eq!(ctrl.position(), Point::new(150.0, 130.0));
    }

    #[test]
    fn live_moves_track_pointer_delta() {
        let mut ctrl = controller();
        ctrl.process(&PointerEvent::down(110.0, 110.0));
        assert_eq!(
            ctrl.process(&PointerEvent::moved(130.0, 110.0)),
            vec![TriggerCmd::Moved(Point::new(120.0, 100.0))]
        );
        assert_eq!(
            ctrl.process(&PointerEvent::moved(90.0, 150.0)),
            vec![TriggerCmd::Moved(Point::new(80.0, 140.0))]
        );
    }

    #[test]
    fn commit_clamps_into_viewport() {
        let mut ctrl = controller();
        ctrl.process(&PointerEvent::down(110.0, 110.0));
        // Live tracking is unclamped; only the commit is.
        assert_eq!(
            ctrl.process(&PointerEvent::moved(2100.0, -200.0)),
            vec![TriggerCmd::Moved(Point::new(2090.0, -210.0))]
        );
        let cmds = ctrl.process(&PointerEvent::up(2100.0, -200.0));
        assert_eq!(
            cmds,
            vec![
                TriggerCmd::Moved(Point::new(976.0, 0.0)),
                TriggerCmd::Persist(TriggerPosition::new(976.0, 0.0))
            ]
        );
    }

    #[test]
    fn persist_exactly_once_per_drag() {
        let mut ctrl = controller();
        let first = drag(&mut ctrl, (110.0, 110.0), (160.0, 140.0));
        assert_eq!(persist_count(&first), 1);
        let second = drag(&mut ctrl, (200.0, 200.0), (260.0, 260.0));
        assert_eq!(persist_count(&second), 1);
    }

    #[test]
    fn cancel_restores_start_without_persisting() {
        let mut ctrl = controller();
        ctrl.process(&PointerEvent::down(110.0, 110.0));
        ctrl.process(&PointerEvent::moved(150.0, 150.0));
        assert!(ctrl.is_dragging());

        let cmds = ctrl.process(&PointerEvent::cancel(150.0, 150.0));
        assert_eq!(cmds, vec![TriggerCmd::Moved(Point::new(100.0, 100.0))]);
        assert!(!ctrl.is_dragging());
        assert_eq!(ctrl.position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn cancel_drag_matches_pointer_cancel() {
        let mut ctrl = controller();
        ctrl.process(&PointerEvent::down(110.0, 110.0));
        ctrl.process(&PointerEvent::moved(150.0, 150.0));
        let cmds = ctrl.cancel_drag();
        assert_eq!(cmds, vec![TriggerCmd::Moved(Point::new(100.0, 100.0))]);
        assert_eq!(ctrl.cancel_drag(), vec![]);
    }

    #[test]
    fn secondary_button_never_starts_a_gesture() {
        let mut ctrl = controller();
        let down = PointerEvent::down(110.0, 110.0).with_button(PointerButton::Secondary);
        assert_eq!(ctrl.process(&down), vec![]);
        assert_eq!(ctrl.process(&PointerEvent::moved(160.0, 160.0)), vec![]);
        assert_eq!(ctrl.process(&PointerEvent::up(160.0, 160.0)), vec![]);
        assert_eq!(ctrl.position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn stray_move_and_up_are_ignored() {
        let mut ctrl = controller();
        assert_eq!(ctrl.process(&PointerEvent::moved(50.0, 50.0)), vec![]);
        assert_eq!(ctrl.process(&PointerEvent::up(50.0, 50.0)), vec![]);
    }

    #[test]
    fn clamp_into_sanitizes_stored_position() {
        let mut ctrl =
            TriggerController::new(TriggerPosition::new(5000.0, 300.0), TRIGGER, VIEWPORT);
        let adjusted = ctrl.clamp_into(VIEWPORT);
        assert_eq!(adjusted, Point::new(976.0, 300.0));
        assert_eq!(ctrl.position(), adjusted);
    }

    #[test]
    fn click_reports_release_modifiers() {
        let mut ctrl = controller();
        ctrl.process(&PointerEvent::down(110.0, 110.0));
        let cmds = ctrl.process(&PointerEvent::up(110.0, 110.0).with_modifiers(Modifiers::CTRL));
        assert_eq!(
            cmds,
            vec![TriggerCmd::Clicked {
                modifiers: Modifiers::CTRL
            }]
        );
    }

    #[test]
    fn second_drag_starts_from_committed_position() {
        let mut ctrl = controller();
        drag(&mut ctrl, (110.0, 110.0), (160.0, 140.0));
        assert_eq!(ctrl.position(), Point::new(150.0, 130.0));

        ctrl.process(&PointerEvent::down(200.0, 200.0));
        assert_eq!(
            ctrl.process(&PointerEvent::moved(210.0, 200.0)),
            vec![TriggerCmd::Moved(Point::new(160.0, 130.0))]
        );
    }

    #[test]
    fn is_dragging_latches_on_threshold() {
        let mut ctrl = controller();
        ctrl.process(&PointerEvent::down(110.0, 110.0));
        assert!(!ctrl.is_dragging());
        ctrl.process(&PointerEvent::moved(111.0, 110.0));
        assert!(!ctrl.is_dragging());
        ctrl.process(&PointerEvent::moved(120.0, 120.0));
        assert!(ctrl.is_dragging());
        ctrl.process(&PointerEvent::up(120.0, 120.0));
        assert!(!ctrl.is_dragging());
    }

    #[test]
    fn badge_label_formats_and_caps() {
        let mut ctrl = controller();
        assert_eq!(ctrl.badge_label(), None);
        ctrl.set_badge_count(1);
        assert_eq!(ctrl.badge_label().as_deref(), Some("1"));
        ctrl.set_badge_count(99);
        assert_eq!(ctrl.badge_label().as_deref(), Some("99"));
        ctrl.set_badge_count(100);
        assert_eq!(ctrl.badge_label().as_deref(), Some("99+"));
    }

    #[test]
    fn viewport_smaller_than_trigger_pins_to_origin() {
        let mut ctrl = controller();
        let adjusted = ctrl.clamp_into(Size::new(30.0, 30.0));
        assert_eq!(adjusted, Point::new(0.0, 0.0));
    }

    #[test]
    fn position_round_trips_through_trigger_position() {
        let position = TriggerPosition::new(12.5, 44.0);
        let point: Point = position.into();
        assert_eq!(TriggerPosition::from(point), position);
    }
}
