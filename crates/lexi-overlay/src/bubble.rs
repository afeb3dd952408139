//! The popover controller: lifecycle, placement, and pronunciation policy.
//!
//! # Role in LexiPop
//! `BubbleController` is the state machine behind the word popover. It owns
//! the hidden → positioning → visible lifecycle, decides when the panel
//! must be measured and where it goes (via `lexi-placement`), and decides
//! what gets pronounced when. Like the trigger controller it is synchronous
//! and side-effect free: every operation returns [`BubbleCmd`] values the
//! host applies in order.
//!
//! # Primary responsibilities
//! - **Two-phase reveal**: [`show`] requests an off-screen measurement;
//!   [`panel_measured`] computes the placement and makes the popover
//!   visible in the same step, so the panel never flashes at a stale
//!   position.
//! - **Auto-pronunciation**: on first reveal, emit one pronounce command
//!   with the configured repeat count, memoized per entry identity.
//! - **Add-intent**: optimistic, idempotent `NotifyAdd` toward the
//!   word-list collaborator.
//!
//! # Invariants
//!
//! 1. Placement is recomputed whenever the anchor, the panel size, or the
//!    viewport changes while the popover is shown; it is never guessed
//!    before a measurement arrives.
//! 2. Hiding emits [`BubbleCmd::StopAudio`] and leaves the auto-pronounce
//!    memo untouched; only an entry-identity change re-arms it.
//! 3. `is_added` never regresses from `true` to `false` for the same entry.
//!
//! [`show`]: BubbleController::show
//! [`panel_measured`]: BubbleController::panel_measured

use lexi_core::config::OverlayConfig;
use lexi_core::geometry::{Rect, Size};
use lexi_core::playback::PlaybackRequest;
use lexi_core::word::{Accent, WordEntry};
use lexi_placement::{Placement, PlacementParams, resolve};
use tracing::debug;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Where the popover is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BubblePhase {
    /// Not rendered at all.
    #[default]
    Hidden,
    /// Rendered invisibly, waiting for the host to report the panel size.
    Positioning,
    /// Rendered at a resolved placement.
    Visible,
}

impl BubblePhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            BubblePhase::Hidden => "hidden",
            BubblePhase::Positioning => "positioning",
            BubblePhase::Visible => "visible",
        }
    }
}

/// What the host should do in response to a controller operation.
///
/// Commands are ordered; the host applies them sequentially.
#[derive(Debug, Clone, PartialEq)]
pub enum BubbleCmd {
    /// Render the panel invisibly and report its size back through
    /// [`BubbleController::panel_measured`].
    MeasurePanel,
    /// Move the panel to its resolved position and show it.
    ApplyPlacement(Placement),
    /// Play `request`, `repeats` times back to back, through the shared
    /// audio player. A later pronounce preempts an earlier one.
    Pronounce {
        request: PlaybackRequest,
        repeats: u8,
    },
    /// Stop any in-flight audio immediately.
    StopAudio,
    /// The user wants this entry on their word list.
    NotifyAdd { entry_id: String },
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// State machine for the word popover.
pub struct BubbleController {
    config: OverlayConfig,
    params: PlacementParams,
    viewport: Size,
    phase: BubblePhase,
    /// Kept across hides so a re-shown entry is recognized as the same one.
    entry: Option<WordEntry>,
    /// Anchor of the current reveal; cleared on hide.
    anchor: Option<Rect>,
    placement: Option<Placement>,
    /// Optimistic add state, recomputed when the entry identity changes.
    is_added: bool,
    /// Entry id that already auto-pronounced. Survives hides.
    auto_played_for: Option<String>,
}

impl BubbleController {
    /// Controller with default placement distances.
    pub fn new(config: OverlayConfig, viewport: Size) -> Self {
        Self {
            config,
            params: PlacementParams::default(),
            viewport,
            phase: BubblePhase::Hidden,
            entry: None,
            anchor: None,
            placement: None,
            is_added: false,
            auto_played_for: None,
        }
    }

    /// Replace the placement distances.
    #[must_use]
    pub fn with_params(mut self, params: PlacementParams) -> Self {
        self.params = params;
        self
    }

    /// Begin showing the popover for `entry` anchored at `anchor`.
    ///
    /// Enters `Positioning` and asks the host to measure the panel; nothing
    /// is placed or pronounced until [`panel_measured`] reports back.
    ///
    /// [`panel_measured`]: BubbleController::panel_measured
    pub fn show(&mut self, entry: WordEntry, anchor: Rect) -> Vec<BubbleCmd> {
        let same_entry = self
            .entry
            .as_ref()
            .is_some_and(|current| current.id == entry.id);
        // An optimistic add must not regress while the intent is in flight.
        self.is_added = if same_entry {
            self.is_added || entry.category.is_added()
        } else {
            entry.category.is_added()
        };

        debug!(target: "lexipop.bubble", entry = %entry.id, "showing popover");
        self.entry = Some(entry);
        self.anchor = Some(anchor);
        self.placement = None;
        self.phase = BubblePhase::Positioning;
        vec![BubbleCmd::MeasurePanel]
    }

    /// The host measured the invisible panel at `panel`.
    ///
    /// Resolves the placement and reveals the popover. On the first reveal
    /// of an entry this also emits the auto-pronounce command. Re-measuring
    /// while visible (content changed) just moves the panel.
    pub fn panel_measured(&mut self, panel: Size) -> Vec<BubbleCmd> {
        if self.phase == BubblePhase::Hidden {
            debug!(target: "lexipop.bubble", "measurement after hide ignored");
            return Vec::new();
        }
        let Some(entry) = self.entry.as_ref() else {
            debug!(target: "lexipop.bubble", "measurement without an entry ignored");
            return Vec::new();
        };
        let Some(anchor) = self.anchor else {
            debug!(target: "lexipop.bubble", "measurement without an anchor ignored");
            return Vec::new();
        };

        let placement = resolve(
            anchor,
            panel,
            self.config.bubble_position,
            self.viewport,
            &self.params,
        );
        self.placement = Some(placement);

        let first_reveal = self.phase == BubblePhase::Positioning;
        self.phase = BubblePhase::Visible;
        debug!(
            target: "lexipop.bubble",
            entry = %entry.id,
            side = placement.side.as_str(),
            top = placement.top,
            left = placement.left,
            "popover placed"
        );

        let mut out = vec![BubbleCmd::ApplyPlacement(placement)];
        if first_reveal
            && self.config.auto_pronounce_count > 0
            && self.auto_played_for.as_deref() != Some(entry.id.as_str())
        {
            let request = PlaybackRequest::word(
                entry.text.clone(),
                self.config.auto_pronounce_accent,
                self.config.tts_speed,
            );
            self.auto_played_for = Some(entry.id.clone());
            out.push(BubbleCmd::Pronounce {
                request,
                repeats: self.config.auto_pronounce_count,
            });
        }
        out
    }

    /// The anchor moved (scroll, reflow). Recomputes the placement while
    /// visible; during `Positioning` only the anchor is updated, because
    /// the measurement is still pending.
    pub fn reposition(&mut self, anchor: Rect, panel: Size) -> Vec<BubbleCmd> {
        match self.phase {
            BubblePhase::Hidden => Vec::new(),
            BubblePhase::Positioning => {
                self.anchor = Some(anchor);
                Vec::new()
            }
            BubblePhase::Visible => {
                self.anchor = Some(anchor);
                let placement = resolve(
                    anchor,
                    panel,
                    self.config.bubble_position,
                    self.viewport,
                    &self.params,
                );
                self.placement = Some(placement);
                vec![BubbleCmd::ApplyPlacement(placement)]
            }
        }
    }

    /// Update the viewport. Takes effect at the next placement computation
    /// ([`panel_measured`] or [`reposition`]).
    ///
    /// [`panel_measured`]: BubbleController::panel_measured
    /// [`reposition`]: BubbleController::reposition
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Dismiss the popover.
    ///
    /// In-flight audio is stopped immediately. The auto-pronounce memo is
    /// deliberately kept: re-showing the same entry stays silent.
    pub fn hide(&mut self) -> Vec<BubbleCmd> {
        if self.phase == BubblePhase::Hidden {
            return Vec::new();
        }
        debug!(target: "lexipop.bubble", "hiding popover");
        self.phase = BubblePhase::Hidden;
        self.anchor = None;
        self.placement = None;
        vec![BubbleCmd::StopAudio]
    }

    /// Pronounce the current word once, optionally overriding the accent
    /// (the phonetic rows each carry their own accent button).
    ///
    /// Ignored while hidden; button callbacks can race dismissal.
    pub fn play_word(&self, accent: Option<Accent>) -> Vec<BubbleCmd> {
        if self.phase == BubblePhase::Hidden {
            return Vec::new();
        }
        let Some(entry) = self.entry.as_ref() else {
            debug!(target: "lexipop.bubble", "play requested without an entry");
            return Vec::new();
        };
        let request = PlaybackRequest::word(
            entry.text.clone(),
            accent.unwrap_or(self.config.auto_pronounce_accent),
            self.config.tts_speed,
        );
        vec![BubbleCmd::Pronounce {
            request,
            repeats: 1,
        }]
    }

    /// Read the example sentence aloud, preferring the dictionary's own
    /// recording over synthesis.
    pub fn play_example(&self) -> Vec<BubbleCmd> {
        if self.phase == BubblePhase::Hidden {
            return Vec::new();
        }
        let Some(entry) = self.entry.as_ref() else {
            debug!(target: "lexipop.bubble", "play requested without an entry");
            return Vec::new();
        };
        let Some(example) = entry.example.as_ref() else {
            debug!(target: "lexipop.bubble", entry = %entry.id, "entry has no example");
            return Vec::new();
        };
        let request = match example.audio_url.as_deref() {
            Some(url) => PlaybackRequest::url(url),
            None => PlaybackRequest::sentence(
                example.text.clone(),
                self.config.auto_pronounce_accent,
                self.config.tts_speed,
            ),
        };
        vec![BubbleCmd::Pronounce {
            request,
            repeats: 1,
        }]
    }

    /// The user pressed the add button.
    ///
    /// Flips `is_added` optimistically and notifies the collaborator on the
    /// false → true edge only; pressing again is a no-op.
    pub fn request_add(&mut self) -> Vec<BubbleCmd> {
        if self.phase == BubblePhase::Hidden {
            return Vec::new();
        }
        let Some(entry) = self.entry.as_ref() else {
            debug!(target: "lexipop.bubble", "add requested without an entry");
            return Vec::new();
        };
        if self.is_added {
            return Vec::new();
        }
        let entry_id = entry.id.clone();
        debug!(target: "lexipop.bubble", entry = %entry_id, "add requested");
        self.is_added = true;
        vec![BubbleCmd::NotifyAdd { entry_id }]
    }

    #[inline]
    pub fn phase(&self) -> BubblePhase {
        self.phase
    }

    /// Whether the current entry is (optimistically) on the word list.
    #[inline]
    pub fn is_added(&self) -> bool {
        self.is_added
    }

    /// The placement of the current reveal, once measured.
    #[inline]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// The entry being shown (kept across hides).
    pub fn entry(&self) -> Option<&WordEntry> {
        self.entry.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lexi_core::geometry::Side;
    use lexi_core::playback::PlaybackSource;
    use lexi_core::word::{ExampleSentence, WordCategory};

    const VIEWPORT: Size = Size::new(1024.0, 600.0);
    const PANEL: Size = Size::new(280.0, 160.0);

    fn anchor() -> Rect {
        Rect::from_edges(400.0, 200.0, 500.0, 220.0)
    }

    fn entry(id: &str) -> WordEntry {
        WordEntry::new(id, "anchor", WordCategory::New)
    }

    fn config_with_count(count: u8) -> OverlayConfig {
        OverlayConfig {
            auto_pronounce_count: count,
            ..OverlayConfig::default()
        }
    }

    fn controller(count: u8) -> BubbleController {
        BubbleController::new(config_with_count(count), VIEWPORT)
    }

    fn reveal(ctrl: &mut BubbleController, entry: WordEntry) -> Vec<BubbleCmd> {
        let mut out = ctrl.show(entry, anchor());
        out.extend(ctrl.panel_measured(PANEL));
        out
    }

    fn pronounce_count(cmds: &[BubbleCmd]) -> usize {
        cmds.iter()
            .filter(|cmd| matches!(cmd, BubbleCmd::Pronounce { .. }))
            .count()
    }

    #[test]
    fn show_measures_then_placement_applies() {
        let mut ctrl = controller(0);
        let cmds = ctrl.show(entry("w1"), anchor());
        assert_eq!(cmds, vec![BubbleCmd::MeasurePanel]);
        assert_eq!(ctrl.phase(), BubblePhase::Positioning);
        assert_eq!(ctrl.placement(), None);

        let cmds = ctrl.panel_measured(PANEL);
        // Anchor bottom 220 + gap 12; centered on x 450 for a 280-wide panel.
        let expected = Placement {
            top: 232.0,
            left: 310.0,
            side: Side::Bottom,
        };
        assert_eq!(cmds, vec![BubbleCmd::ApplyPlacement(expected)]);
        assert_eq!(ctrl.phase(), BubblePhase::Visible);
        assert_eq!(ctrl.placement(), Some(expected));
    }

    #[test]
    fn first_reveal_auto_pronounces_with_repeat_count() {
        let mut ctrl = controller(2);
        let cmds = reveal(&mut ctrl, entry("w1"));
        assert_eq!(
            cmds.last(),
            Some(&BubbleCmd::Pronounce {
                request: PlaybackRequest::word("anchor", Accent::Us, 1.0),
                repeats: 2,
            })
        );
    }

    #[test]
    fn auto_pronounce_disabled_when_count_is_zero() {
        let mut ctrl = controller(0);
        let cmds = reveal(&mut ctrl, entry("w1"));
        assert_eq!(pronounce_count(&cmds), 0);
    }

    #[test]
    fn auto_pronounce_fires_once_per_entry_identity() {
        let mut ctrl = controller(1);
        let first = reveal(&mut ctrl, entry("w1"));
        assert_eq!(pronounce_count(&first), 1);

        ctrl.hide();
        // Same entry again: the memo survives the hide.
        let again = reveal(&mut ctrl, entry("w1"));
        assert_eq!(pronounce_count(&again), 0);
    }

    #[test]
    fn identity_change_rearms_auto_pronounce() {
        let mut ctrl = controller(1);
        reveal(&mut ctrl, entry("w1"));
        ctrl.hide();
        let cmds = reveal(&mut ctrl, entry("w2"));
        assert_eq!(pronounce_count(&cmds), 1);
    }

    #[test]
    fn hide_stops_audio_and_clears_placement() {
        let mut ctrl = controller(1);
        reveal(&mut ctrl, entry("w1"));
        let cmds = ctrl.hide();
        assert_eq!(cmds, vec![BubbleCmd::StopAudio]);
        assert_eq!(ctrl.phase(), BubblePhase::Hidden);
        assert_eq!(ctrl.placement(), None);
        // Already hidden: nothing to stop.
        assert_eq!(ctrl.hide(), vec![]);
    }

    #[test]
    fn hide_during_positioning_still_stops_audio() {
        let mut ctrl = controller(1);
        ctrl.show(entry("w1"), anchor());
        assert_eq!(ctrl.hide(), vec![BubbleCmd::StopAudio]);
    }

    #[test]
    fn measurement_after_hide_is_ignored() {
        let mut ctrl = controller(1);
        ctrl.show(entry("w1"), anchor());
        ctrl.hide();
        assert_eq!(ctrl.panel_measured(PANEL), vec![]);
        assert_eq!(ctrl.phase(), BubblePhase::Hidden);
    }

    #[test]
    fn reposition_tracks_anchor_while_visible() {
        let mut ctrl = controller(0);
        reveal(&mut ctrl, entry("w1"));

        let moved = Rect::from_edges(600.0, 300.0, 700.0, 320.0);
        let expected = resolve(
            moved,
            PANEL,
            Side::Bottom,
            VIEWPORT,
            &PlacementParams::default(),
        );
        let cmds = ctrl.reposition(moved, PANEL);
        assert_eq!(cmds, vec![BubbleCmd::ApplyPlacement(expected)]);
        assert_eq!(ctrl.placement(), Some(expected));
    }

    #[test]
    fn reposition_while_hidden_is_ignored() {
        let mut ctrl = controller(0);
        assert_eq!(ctrl.reposition(anchor(), PANEL), vec![]);
    }

    #[test]
    fn viewport_change_affects_next_placement() {
        let mut ctrl = controller(0);
        reveal(&mut ctrl, entry("w1"));

        let small = Size::new(500.0, 400.0);
        ctrl.set_viewport(small);
        let expected = resolve(
            anchor(),
            PANEL,
            Side::Bottom,
            small,
            &PlacementParams::default(),
        );
        assert_eq!(expected.side, Side::Top);
        assert_eq!(
            ctrl.reposition(anchor(), PANEL),
            vec![BubbleCmd::ApplyPlacement(expected)]
        );
    }

    #[test]
    fn manual_play_uses_accent_override() {
        let mut ctrl = controller(0);
        reveal(&mut ctrl, entry("w1"));

        assert_eq!(
            ctrl.play_word(Some(Accent::Uk)),
            vec![BubbleCmd::Pronounce {
                request: PlaybackRequest::word("anchor", Accent::Uk, 1.0),
                repeats: 1,
            }]
        );
        assert_eq!(
            ctrl.play_word(None),
            vec![BubbleCmd::Pronounce {
                request: PlaybackRequest::word("anchor", Accent::Us, 1.0),
                repeats: 1,
            }]
        );
    }

    #[test]
    fn manual_play_while_hidden_is_ignored() {
        let mut ctrl = controller(0);
        reveal(&mut ctrl, entry("w1"));
        ctrl.hide();
        assert_eq!(ctrl.play_word(None), vec![]);
        assert_eq!(ctrl.play_example(), vec![]);
    }

    #[test]
    fn example_playback_prefers_the_recording() {
        let mut ctrl = controller(0);
        let with_clip = entry("w1").with_example(
            ExampleSentence::new("Drop the anchor.")
                .with_audio_url("https://dict.example/a.mp3"),
        );
        reveal(&mut ctrl, with_clip);

        let cmds = ctrl.play_example();
        assert_eq!(
            cmds,
            vec![BubbleCmd::Pronounce {
                request: PlaybackRequest::url("https://dict.example/a.mp3"),
                repeats: 1,
            }]
        );
    }

    #[test]
    fn example_playback_synthesizes_without_a_recording() {
        let mut ctrl = controller(0);
        let spoken = entry("w1").with_example(ExampleSentence::new("Drop the anchor."));
        reveal(&mut ctrl, spoken);

        let cmds = ctrl.play_example();
        assert_eq!(cmds.len(), 1);
        let BubbleCmd::Pronounce { request, repeats } = &cmds[0] else {
            panic!("expected a pronounce command");
        };
        assert_eq!(*repeats, 1);
        assert!(matches!(
            &request.source,
            PlaybackSource::Speech { sentence: true, .. }
        ));
    }

    #[test]
    fn example_playback_without_example_is_a_noop() {
        let mut ctrl = controller(0);
        reveal(&mut ctrl, entry("w1"));
        assert_eq!(ctrl.play_example(), vec![]);
    }

    #[test]
    fn add_notifies_exactly_once() {
        let mut ctrl = controller(0);
        reveal(&mut ctrl, entry("w1"));
        assert!(!ctrl.is_added());

        let cmds = ctrl.request_add();
        assert_eq!(
            cmds,
            vec![BubbleCmd::NotifyAdd {
                entry_id: "w1".to_owned()
            }]
        );
        assert!(ctrl.is_added());
        assert_eq!(ctrl.request_add(), vec![]);
        assert!(ctrl.is_added());
    }

    #[test]
    fn already_added_entry_never_notifies() {
        let mut ctrl = controller(0);
        let known = WordEntry::new("w1", "anchor", WordCategory::Learning);
        reveal(&mut ctrl, known);
        assert!(ctrl.is_added());
        assert_eq!(ctrl.request_add(), vec![]);
    }

    #[test]
    fn optimistic_add_survives_reshow_of_same_entry() {
        let mut ctrl = controller(0);
        reveal(&mut ctrl, entry("w1"));
        ctrl.request_add();
        ctrl.hide();

        // Collaborator hands back the same entry, still categorized New.
        reveal(&mut ctrl, entry("w1"));
        assert!(ctrl.is_added());
        assert_eq!(ctrl.request_add(), vec![]);
    }

    #[test]
    fn added_state_recomputed_on_entry_change() {
        let mut ctrl = controller(0);
        reveal(&mut ctrl, entry("w1"));
        ctrl.request_add();
        assert!(ctrl.is_added());

        reveal(&mut ctrl, entry("w2"));
        assert!(!ctrl.is_added());
    }

    #[test]
    fn remeasure_while_visible_moves_without_pronouncing() {
        let mut ctrl = controller(1);
        let first = reveal(&mut ctrl, entry("w1"));
        assert_eq!(pronounce_count(&first), 1);

        let bigger = Size::new(320.0, 220.0);
        let cmds = ctrl.panel_measured(bigger);
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], BubbleCmd::ApplyPlacement(_)));
    }

    #[test]
    fn tts_speed_flows_into_every_request() {
        let config = OverlayConfig {
            auto_pronounce_count: 1,
            tts_speed: 0.75,
            ..OverlayConfig::default()
        };
        let mut ctrl = BubbleController::new(config, VIEWPORT);
        let cmds = reveal(&mut ctrl, entry("w1"));
        assert_eq!(
            cmds.last(),
            Some(&BubbleCmd::Pronounce {
                request: PlaybackRequest::word("anchor", Accent::Us, 0.75),
                repeats: 1,
            })
        );
        assert_eq!(
            ctrl.play_word(None),
            vec![BubbleCmd::Pronounce {
                request: PlaybackRequest::word("anchor", Accent::Us, 0.75),
                repeats: 1,
            }]
        );
    }
}
