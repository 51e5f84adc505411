// crates/darkframe-core/src/timeline.rs
//
// ClipList: the ordered clip sequence and its four mutations.
//
// Order is insertion/timeline order, not source order. Drag never reorders,
// cut inserts the second half right after the first, splice keeps the
// replacements at the old clip's index. The mapper sorts its own copy.
//
// Invalid requests (cut outside a clip, unknown ids) are no-ops. Each
// mutation has a matching `can_*` boundary check and returns an EditOutcome
// so callers and tests can tell "rejected" from "applied" without diffing.

use serde::Serialize;

use crate::clip::{Clip, ClipId, SourceRef};

/// Result of a clip list mutation. Rejected means the list is unchanged.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Rejected,
}

impl EditOutcome {
    pub fn is_applied(self) -> bool {
        self == EditOutcome::Applied
    }
}

/// Maximum replacement clips in one splice: before / processed / after.
pub const MAX_SPLICE_CLIPS: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClipList {
    clips: Vec<Clip>,
}

impl ClipList {
    pub fn new() -> Self {
        Self::default()
    }

    /// One clip spanning the whole asset. Empty if `duration` is not positive.
    pub fn for_asset(source: SourceRef, duration: f64) -> Self {
        Self { clips: Clip::new(source, 0.0, duration, 0.0).into_iter().collect() }
    }

    /// One clip per `(start, end)` range, positions laid end to end.
    /// Ranges with `start >= end` are skipped.
    pub fn from_ranges(source: &SourceRef, ranges: &[(f64, f64)]) -> Self {
        let mut clips    = Vec::with_capacity(ranges.len());
        let mut position = 0.0;
        for &(start, end) in ranges {
            if let Some(clip) = Clip::new(source.clone(), start, end, position) {
                position += clip.duration();
                clips.push(clip);
            }
        }
        Self { clips }
    }

    pub fn as_slice(&self) -> &[Clip] {
        &self.clips
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clip> {
        self.clips.iter()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    fn index_of(&self, id: ClipId) -> Option<usize> {
        self.clips.iter().position(|c| c.id == id)
    }

    /// The first clip (list order) whose interval strictly contains `t`.
    pub fn clip_spanning(&self, t: f64) -> Option<&Clip> {
        self.clips.iter().find(|c| c.strictly_contains(t))
    }

    // ── Cut ──────────────────────────────────────────────────────────────────

    pub fn can_cut(&self, id: ClipId, t: f64) -> bool {
        self.get(id).is_some_and(|c| c.strictly_contains(t))
    }

    /// Split clip `id` at source time `t` into `[start, t)` and `[t, end)`.
    /// The first half keeps the original position; the second is offset by
    /// the first half's duration and lands right after it in list order.
    pub fn cut(&mut self, id: ClipId, t: f64) -> EditOutcome {
        if !self.can_cut(id, t) {
            return EditOutcome::Rejected;
        }
        let Some(idx) = self.index_of(id) else { return EditOutcome::Rejected };
        let orig = &self.clips[idx];

        let first  = orig.derive(orig.source_start, t, orig.position);
        let second = orig.derive(t, orig.source_end, orig.position + (t - orig.source_start));
        let (Some(first), Some(second)) = (first, second) else {
            return EditOutcome::Rejected;
        };

        self.clips.splice(idx..=idx, [first, second]);
        EditOutcome::Applied
    }

    // ── Delete ───────────────────────────────────────────────────────────────

    pub fn can_delete(&self, id: ClipId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn delete(&mut self, id: ClipId) -> EditOutcome {
        match self.index_of(id) {
            Some(idx) => {
                self.clips.remove(idx);
                EditOutcome::Applied
            }
            None => EditOutcome::Rejected,
        }
    }

    // ── Drag ─────────────────────────────────────────────────────────────────

    pub fn can_drag(&self, id: ClipId, new_position: f64) -> bool {
        self.index_of(id).is_some() && new_position.is_finite()
    }

    /// Clamp `new_position` into `[0, asset_duration - clip.duration()]`.
    ///
    /// `asset_duration` is the full source duration, not the preview length:
    /// dragging works against the original-mode timeline. If the clip is
    /// longer than that span the lower bound wins.
    pub fn drag(&mut self, id: ClipId, new_position: f64, asset_duration: f64) -> EditOutcome {
        if !self.can_drag(id, new_position) {
            return EditOutcome::Rejected;
        }
        let Some(idx) = self.index_of(id) else { return EditOutcome::Rejected };
        let clip = &mut self.clips[idx];
        let max  = (asset_duration - clip.duration()).max(0.0);
        clip.position = new_position.clamp(0.0, max);
        EditOutcome::Applied
    }

    // ── Splice ───────────────────────────────────────────────────────────────

    /// 1 to 3 valid replacements whose ids are new to the list (or `old`
    /// itself) and distinct from each other.
    pub fn can_splice(&self, old: ClipId, replacements: &[Clip]) -> bool {
        self.index_of(old).is_some()
            && (1..=MAX_SPLICE_CLIPS).contains(&replacements.len())
            && replacements.iter().all(Clip::is_valid)
            && replacements.iter().enumerate().all(|(i, c)| {
                replacements[..i].iter().all(|prev| prev.id != c.id)
                    && (c.id == old || self.get(c.id).is_none())
            })
    }

    /// Replace clip `old` with `replacements` at the same index, in order.
    pub fn splice(&mut self, old: ClipId, replacements: Vec<Clip>) -> EditOutcome {
        if !self.can_splice(old, &replacements) {
            return EditOutcome::Rejected;
        }
        let Some(idx) = self.index_of(old) else { return EditOutcome::Rejected };
        self.clips.splice(idx..=idx, replacements);
        EditOutcome::Applied
    }

    /// Build the before / processed / after clips for an externally processed
    /// sub-interval of clip `old` and splice them in.
    ///
    /// `processed_start..processed_end` is in the old clip's source time and
    /// must lie within it. The processed clip keeps that interval, so it
    /// stays between before and after in preview order, and reads `processed`
    /// from zero. Before/after keep the old source and are omitted when the
    /// processed span touches a clip boundary.
    pub fn splice_processed(
        &mut self,
        old:             ClipId,
        processed_start: f64,
        processed_end:   f64,
        processed:       SourceRef,
    ) -> EditOutcome {
        let Some(orig) = self.get(old) else { return EditOutcome::Rejected };
        if !(orig.source_start <= processed_start
            && processed_start < processed_end
            && processed_end <= orig.source_end)
        {
            return EditOutcome::Rejected;
        }

        let mut position     = orig.position;
        let mut replacements = Vec::with_capacity(MAX_SPLICE_CLIPS);

        if let Some(before) = orig.derive(orig.source_start, processed_start, position) {
            position += before.duration();
            replacements.push(before);
        }
        let mid = Clip::new(processed, processed_start, processed_end, position)
            .and_then(|c| c.with_media_start(0.0));
        match mid {
            Some(mid) => {
                position += mid.duration();
                replacements.push(mid);
            }
            None => return EditOutcome::Rejected,
        }
        if let Some(after) = orig.derive(processed_end, orig.source_end, position) {
            replacements.push(after);
        }

        self.splice(old, replacements)
    }

    /// Sum of clip durations: the length of the edited preview timeline.
    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(Clip::duration).sum()
    }
}
