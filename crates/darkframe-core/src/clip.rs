// crates/darkframe-core/src/clip.rs
//
// Clip and SourceRef: the only stored timeline data.
//
// A Clip is one contiguous span [source_start, source_end) of a single source
// asset. The asset itself is owned elsewhere (the shell, or whoever probed
// it); a Clip only carries a SourceRef that names it.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque clip identifier. Fresh per clip, never reused.
pub type ClipId = Uuid;

/// Non-owning handle to a source media asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    pub id:   Uuid,
    pub path: PathBuf,
}

impl SourceRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { id: Uuid::new_v4(), path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for log lines and listings.
    pub fn display_name(&self) -> String {
        self.path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// One span of the edited asset placed on the editing timeline.
///
/// `source_start..source_end` is always in the edited asset's time, so the
/// mapper can order every clip on one axis. `media_start` is where that span
/// begins inside `source`: equal to `source_start` for footage cut from the
/// asset itself, usually `0.0` for a processed replacement rendered to its
/// own file.
///
/// The interval fields are private to the crate. Outside it a Clip can only
/// come from `Clip::new`, so every Clip a ClipList sees has passed the
/// interval check; `ClipList::can_splice` re-checks anyway.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Clip {
    pub id:                  ClipId,
    pub source:              SourceRef,
    pub(crate) source_start: f64,
    pub(crate) source_end:   f64,
    pub(crate) media_start:  f64,
    /// Offset on the positional (drag) timeline. Display only; preview order
    /// is always by `source_start`.
    pub position:            f64,
}

impl Clip {
    /// Returns `None` unless `0 <= source_start < source_end`, so no stored
    /// clip can ever have a non-positive duration.
    pub fn new(source: SourceRef, source_start: f64, source_end: f64, position: f64) -> Option<Self> {
        if !(source_start < source_end) || source_start < 0.0 {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            source,
            source_start,
            source_end,
            media_start: source_start,
            position,
        })
    }

    /// Same clip, but read from `media_start` onward in its media file.
    /// `None` for a negative or non-finite offset.
    pub fn with_media_start(mut self, media_start: f64) -> Option<Self> {
        if !(media_start >= 0.0 && media_start.is_finite()) {
            return None;
        }
        self.media_start = media_start;
        Some(self)
    }

    pub fn source_start(&self) -> f64 {
        self.source_start
    }

    pub fn source_end(&self) -> f64 {
        self.source_end
    }

    /// `[start, end)` inside `source`'s media file: what an export extracts.
    pub fn media_range(&self) -> (f64, f64) {
        (self.media_start, self.media_start + self.duration())
    }

    /// Interval invariant, for clips that did not come through `new`.
    pub(crate) fn is_valid(&self) -> bool {
        self.source_start >= 0.0
            && self.source_start < self.source_end
            && self.media_start >= 0.0
            && self.media_start.is_finite()
    }

    pub fn duration(&self) -> f64 {
        self.source_end - self.source_start
    }

    /// Strictly inside the clip's interval. Cut points on a boundary are not.
    pub fn strictly_contains(&self, t: f64) -> bool {
        self.source_start < t && t < self.source_end
    }

    /// Closed-interval containment, used by the mapper.
    pub fn contains(&self, t: f64) -> bool {
        self.source_start <= t && t <= self.source_end
    }

    /// Copy of this clip restricted to `[start, end)` with a fresh id. The
    /// media offset moves with the start.
    pub(crate) fn derive(&self, start: f64, end: f64, position: f64) -> Option<Self> {
        Clip::new(self.source.clone(), start, end, position)?
            .with_media_start(self.media_start + (start - self.source_start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src() -> SourceRef { SourceRef::new("talk.mp4") }

    #[test]
    fn rejects_empty_or_inverted_interval() {
        assert!(Clip::new(src(), 4.0, 4.0, 0.0).is_none());
        assert!(Clip::new(src(), 5.0, 4.0, 0.0).is_none());
        assert!(Clip::new(src(), -1.0, 4.0, 0.0).is_none());
        assert!(Clip::new(src(), f64::NAN, 4.0, 0.0).is_none());
    }

    #[test]
    fn duration_and_containment() {
        let c = Clip::new(src(), 2.0, 6.0, 0.0).unwrap();
        assert_eq!(c.duration(), 4.0);
        assert!(c.strictly_contains(3.0));
        assert!(!c.strictly_contains(2.0));
        assert!(!c.strictly_contains(6.0));
        assert!(c.contains(2.0) && c.contains(6.0));
    }

    #[test]
    fn derived_clips_get_fresh_ids() {
        let c = Clip::new(src(), 0.0, 10.0, 0.0).unwrap();
        let d = c.derive(0.0, 5.0, 0.0).unwrap();
        assert_ne!(c.id, d.id);
        assert_eq!(c.source, d.source);
    }

    #[test]
    fn derived_clip_keeps_media_offset() {
        let processed = Clip::new(SourceRef::new("processed.mp4"), 3.0, 5.0, 0.0)
            .unwrap()
            .with_media_start(0.0)
            .unwrap();
        let tail = processed.derive(4.0, 5.0, 1.0).unwrap();
        assert_eq!((tail.source_start(), tail.source_end()), (4.0, 5.0));
        assert_eq!(tail.media_range(), (1.0, 2.0));
    }

    #[test]
    fn media_offset_must_be_non_negative() {
        let c = Clip::new(src(), 2.0, 6.0, 0.0).unwrap();
        assert_eq!(c.media_range(), (2.0, 6.0));
        assert!(c.clone().with_media_start(-0.5).is_none());
        assert!(c.with_media_start(f64::INFINITY).is_none());
    }

    #[test]
    fn display_name_is_file_name() {
        assert_eq!(SourceRef::new("/tmp/clips/talk.mp4").display_name(), "talk.mp4");
    }
}
