// crates/darkframe-core/src/session.rs
//
// EditSession: the caller-owned editing context.
//
// Owns the clip list for one source asset plus the view state that edits
// touch (mode, playhead, selection). The shell constructs it, hands `&mut`
// to whatever needs to edit and `&` to whatever needs to read, and drops it
// when the session ends. There is no global instance.
//
// View modes:
//   Original: playhead and timeline are in source time; the full asset,
//             deleted spans included, is shown.
//   Edited:   playhead and timeline are in preview time via the segment
//             mapper; gaps are invisible and skipped during playback.
//
// Mode changes only via SetMode / ToggleMode (entering Edited needs at least
// one clip) and as a side effect of Delete.

use serde::{Deserialize, Serialize};

use crate::clip::{Clip, ClipId, SourceRef};
use crate::commands::EditorCommand;
use crate::media_types::{ExportPlan, ExportRange};
use crate::segments::{self, Segment, SourceLookup};
use crate::timeline::{ClipList, EditOutcome};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Original,
    Edited,
}

/// What the playback driver should do for the source position it just reached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaybackStep {
    /// Keep playing; the playhead is at `timeline_time`.
    Play { timeline_time: f64 },
    /// The source is in deleted footage: seek it to `source_time`, which is
    /// `timeline_time` on the edited timeline.
    Seek { source_time: f64, timeline_time: f64 },
    /// No surviving material left.
    Ended,
}

#[derive(Clone, Debug)]
pub struct EditSession {
    source:          SourceRef,
    source_duration: f64,
    clips:           ClipList,
    mode:            ViewMode,
    playhead:        f64,
    selected:        Option<ClipId>,
}

impl EditSession {
    /// A fresh session: one clip spanning the whole asset, Original mode.
    pub fn new(source: SourceRef, source_duration: f64) -> Self {
        let clips = ClipList::for_asset(source.clone(), source_duration);
        Self {
            source,
            source_duration,
            clips,
            mode:     ViewMode::Original,
            playhead: 0.0,
            selected: None,
        }
    }

    /// A session pre-cut to `keeps` (source-time ranges), e.g. from
    /// transcript planning. Opens in Edited mode when anything survives.
    pub fn from_keep_ranges(source: SourceRef, source_duration: f64, keeps: &[(f64, f64)]) -> Self {
        let clips = ClipList::from_ranges(&source, keeps);
        let mode  = if clips.is_empty() { ViewMode::Original } else { ViewMode::Edited };
        log::debug!("[session] {} keep ranges -> {} clips", keeps.len(), clips.len());
        Self { source, source_duration, clips, mode, playhead: 0.0, selected: None }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn source(&self) -> &SourceRef { &self.source }
    pub fn source_duration(&self) -> f64 { self.source_duration }
    pub fn clips(&self) -> &ClipList { &self.clips }
    pub fn mode(&self) -> ViewMode { self.mode }
    pub fn playhead(&self) -> f64 { self.playhead }
    pub fn selected(&self) -> Option<ClipId> { self.selected }

    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.get(id)
    }

    /// Clip whose source range covers `source_time`, e.g. for cut-at-playhead
    /// in Original mode.
    pub fn clip_at_source(&self, source_time: f64) -> Option<&Clip> {
        self.clips.clip_spanning(source_time)
    }

    pub fn segments(&self) -> Vec<Segment> {
        segments::build_segments(self.clips.as_slice())
    }

    /// Length of the timeline the user currently sees.
    pub fn timeline_duration(&self) -> f64 {
        match self.mode {
            ViewMode::Original => self.source_duration,
            ViewMode::Edited   => segments::total_preview_duration(self.clips.as_slice()),
        }
    }

    pub fn preview_to_source(&self, preview_time: f64) -> Option<f64> {
        segments::preview_to_source(preview_time, &self.segments())
    }

    pub fn source_to_preview(&self, source_time: f64) -> SourceLookup {
        segments::source_to_preview(source_time, &self.segments())
    }

    /// Source time under the playhead. `None` in Edited mode when the
    /// playhead is past the last segment.
    pub fn playhead_source_time(&self) -> Option<f64> {
        match self.mode {
            ViewMode::Original => Some(self.playhead),
            ViewMode::Edited   => self.preview_to_source(self.playhead),
        }
    }

    /// Render snapshot in the same order the preview plays.
    pub fn export_plan(&self) -> ExportPlan {
        let ranges = segments::preview_order(self.clips.as_slice())
            .into_iter()
            .map(|c| {
                let (start, end) = c.media_range();
                ExportRange { source: c.source.clone(), start, end }
            })
            .collect();
        ExportPlan { ranges }
    }

    // ── Commands ─────────────────────────────────────────────────────────────

    pub fn apply(&mut self, cmd: EditorCommand) -> EditOutcome {
        let outcome = match cmd {
            EditorCommand::SetPlayhead(t) => self.set_playhead(t),
            EditorCommand::SetMode(mode) => self.set_mode(mode),
            EditorCommand::ToggleMode => {
                let next = match self.mode {
                    ViewMode::Original => ViewMode::Edited,
                    ViewMode::Edited   => ViewMode::Original,
                };
                self.set_mode(next)
            }
            EditorCommand::Select(id) => {
                if id.is_some_and(|id| self.clips.get(id).is_none()) {
                    EditOutcome::Rejected
                } else {
                    self.selected = id;
                    EditOutcome::Applied
                }
            }
            EditorCommand::Cut { id, at } => self.cut(id, at),
            EditorCommand::CutAtPlayhead => {
                let target = self.playhead_source_time()
                    .and_then(|t| self.clip_at_source(t).map(|c| (c.id, t)));
                match target {
                    Some((id, t)) => self.cut(id, t),
                    None          => EditOutcome::Rejected,
                }
            }
            EditorCommand::Delete(id) => self.delete(id),
            EditorCommand::DeleteSelected => match self.selected {
                Some(id) => self.delete(id),
                None     => EditOutcome::Rejected,
            },
            EditorCommand::Drag { id, position } => {
                self.clips.drag(id, position, self.source_duration)
            }
            EditorCommand::Splice { old, replacements } => {
                let outcome = self.clips.splice(old, replacements);
                self.forget_replaced(old, outcome);
                outcome
            }
            EditorCommand::SpliceProcessed { old, start, end, processed } => {
                let outcome = self.clips.splice_processed(old, start, end, processed);
                self.forget_replaced(old, outcome);
                outcome
            }
        };
        if !outcome.is_applied() {
            log::debug!("[session] command rejected");
        }
        outcome
    }

    fn forget_replaced(&mut self, old: ClipId, outcome: EditOutcome) {
        if outcome.is_applied() && self.selected == Some(old) && self.clips.get(old).is_none() {
            self.selected = None;
        }
    }

    fn set_playhead(&mut self, t: f64) -> EditOutcome {
        if !t.is_finite() {
            return EditOutcome::Rejected;
        }
        self.playhead = t.clamp(0.0, self.timeline_duration());
        EditOutcome::Applied
    }

    /// Switch view mode, carrying the playhead across so the same source
    /// frame stays under it where possible.
    fn set_mode(&mut self, mode: ViewMode) -> EditOutcome {
        if mode == self.mode {
            return EditOutcome::Applied;
        }
        if mode == ViewMode::Edited && self.clips.is_empty() {
            return EditOutcome::Rejected;
        }
        let playhead = match mode {
            ViewMode::Original => self.preview_to_source(self.playhead).unwrap_or(0.0),
            ViewMode::Edited   => match self.source_to_preview(self.playhead) {
                SourceLookup::Mapped(p) => p,
                SourceLookup::Gap { next_source_start: Some(next) } => {
                    match self.source_to_preview(next) {
                        SourceLookup::Mapped(p) => p,
                        SourceLookup::Gap { .. } => 0.0,
                    }
                }
                SourceLookup::Gap { next_source_start: None } => 0.0,
            },
        };
        self.mode     = mode;
        self.playhead = playhead;
        EditOutcome::Applied
    }

    fn cut(&mut self, id: ClipId, at: f64) -> EditOutcome {
        let outcome = self.clips.cut(id, at);
        if outcome.is_applied() {
            log::debug!("[session] cut at {at:.3}s -> {} clips", self.clips.len());
            if self.selected == Some(id) {
                self.selected = None;
            }
        }
        outcome
    }

    /// Delete always previews the result: Edited mode if anything is left,
    /// back to Original when the list empties. Playhead returns to zero.
    fn delete(&mut self, id: ClipId) -> EditOutcome {
        let outcome = self.clips.delete(id);
        if outcome.is_applied() {
            if self.selected == Some(id) {
                self.selected = None;
            }
            self.mode = if self.clips.is_empty() { ViewMode::Original } else { ViewMode::Edited };
            self.playhead = 0.0;
            log::debug!("[session] deleted clip, {} remain, mode {:?}", self.clips.len(), self.mode);
        }
        outcome
    }

    // ── Playback ─────────────────────────────────────────────────────────────

    /// Decide what to do now that the source media reached `source_time`.
    pub fn resolve_playback(&self, source_time: f64) -> PlaybackStep {
        match self.mode {
            ViewMode::Original => {
                if source_time >= self.source_duration {
                    PlaybackStep::Ended
                } else {
                    PlaybackStep::Play { timeline_time: source_time }
                }
            }
            ViewMode::Edited => {
                let segs  = self.segments();
                let total = segments::total_preview_duration(self.clips.as_slice());
                match segments::source_to_preview(source_time, &segs) {
                    SourceLookup::Mapped(p) if p < total => PlaybackStep::Play { timeline_time: p },
                    SourceLookup::Mapped(_) => PlaybackStep::Ended,
                    SourceLookup::Gap { next_source_start: Some(next) } => {
                        match segments::source_to_preview(next, &segs) {
                            SourceLookup::Mapped(p) => PlaybackStep::Seek { source_time: next, timeline_time: p },
                            SourceLookup::Gap { .. } => PlaybackStep::Ended,
                        }
                    }
                    SourceLookup::Gap { next_source_start: None } => PlaybackStep::Ended,
                }
            }
        }
    }

    /// `resolve_playback` plus moving the playhead to match.
    pub fn advance_playback(&mut self, source_time: f64) -> PlaybackStep {
        let step = self.resolve_playback(source_time);
        match step {
            PlaybackStep::Play { timeline_time }
            | PlaybackStep::Seek { timeline_time, .. } => self.playhead = timeline_time,
            PlaybackStep::Ended => self.playhead = self.timeline_duration(),
        }
        step
    }
}
