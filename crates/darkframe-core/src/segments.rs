// crates/darkframe-core/src/segments.rs
//
// Segment mapper: preview time <-> source time.
//
// Preview time is the virtual timeline formed by laying the surviving clips
// end to end in ascending source_start order, starting at zero. Export uses
// the same ordering (see EditSession::export_plan) so what plays in preview
// is what gets rendered.
//
// Everything here is pure and recomputed on demand. No cache.

use std::cmp::Ordering;
use serde::Serialize;

use crate::clip::{Clip, ClipId};

/// One clip's slot on the preview timeline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub clip_id:       ClipId,
    pub preview_start: f64,
    pub preview_end:   f64,
    pub source_start:  f64,
    pub source_end:    f64,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.preview_end - self.preview_start
    }
}

/// Outcome of mapping a source time onto the preview timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SourceLookup {
    /// The source time is inside a surviving clip.
    Mapped(f64),
    /// The source time falls in deleted footage. `next_source_start` is where
    /// playback should resume; `None` means no surviving material follows.
    Gap { next_source_start: Option<f64> },
}

/// Clips in preview order: stable sort of a copy by `source_start`.
pub fn preview_order(clips: &[Clip]) -> Vec<&Clip> {
    let mut sorted: Vec<&Clip> = clips.iter().collect();
    sorted.sort_by(|a, b| {
        a.source_start.partial_cmp(&b.source_start).unwrap_or(Ordering::Equal)
    });
    sorted
}

/// Lay the clips end to end on a zero-based preview axis.
pub fn build_segments(clips: &[Clip]) -> Vec<Segment> {
    let mut cursor = 0.0;
    preview_order(clips)
        .into_iter()
        .map(|c| {
            let seg = Segment {
                clip_id:       c.id,
                preview_start: cursor,
                preview_end:   cursor + c.duration(),
                source_start:  c.source_start,
                source_end:    c.source_end,
            };
            cursor = seg.preview_end;
            seg
        })
        .collect()
}

/// Map a preview time to source time. First segment wins on a boundary tie.
/// `None` when `preview_time` is outside every segment.
pub fn preview_to_source(preview_time: f64, segments: &[Segment]) -> Option<f64> {
    segments.iter()
        .find(|s| s.preview_start <= preview_time && preview_time <= s.preview_end)
        .map(|s| s.source_start + (preview_time - s.preview_start))
}

/// `preview_to_source` with the legacy fallback of `0.0` for unmapped times.
///
/// Only a safe default seek position; `0.0` here does not mean the preview
/// time maps to the start of the source.
pub fn preview_to_source_or_zero(preview_time: f64, segments: &[Segment]) -> f64 {
    preview_to_source(preview_time, segments).unwrap_or(0.0)
}

/// Map a source time to preview time, or report the gap it falls into.
pub fn source_to_preview(source_time: f64, segments: &[Segment]) -> SourceLookup {
    if let Some(s) = segments.iter()
        .find(|s| s.source_start <= source_time && source_time <= s.source_end)
    {
        return SourceLookup::Mapped(s.preview_start + (source_time - s.source_start));
    }
    let next_source_start = segments.iter()
        .map(|s| s.source_start)
        .filter(|&start| start > source_time)
        .fold(None, |best: Option<f64>, start| Some(best.map_or(start, |b| b.min(start))));
    SourceLookup::Gap { next_source_start }
}

/// Length of the edited timeline: sum of all clip durations.
pub fn total_preview_duration(clips: &[Clip]) -> f64 {
    clips.iter().map(Clip::duration).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::SourceRef;
    use crate::timeline::ClipList;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn list(ranges: &[(f64, f64)]) -> ClipList {
        ClipList::from_ranges(&SourceRef::new("talk.mp4"), ranges)
    }

    #[test]
    fn empty_list_maps_nothing() {
        let segs = build_segments(&[]);
        assert!(segs.is_empty());
        assert_eq!(preview_to_source(1.0, &segs), None);
        assert_eq!(preview_to_source_or_zero(1.0, &segs), 0.0);
        assert_eq!(source_to_preview(1.0, &segs), SourceLookup::Gap { next_source_start: None });
        assert_eq!(total_preview_duration(&[]), 0.0);
    }

    #[test]
    fn segments_follow_source_order_not_list_order() {
        let l = list(&[(6.0, 10.0), (0.0, 4.0)]);
        let segs = build_segments(l.as_slice());
        assert_eq!(segs[0].source_start, 0.0);
        assert_eq!((segs[0].preview_start, segs[0].preview_end), (0.0, 4.0));
        assert_eq!(segs[1].source_start, 6.0);
        assert_eq!((segs[1].preview_start, segs[1].preview_end), (4.0, 8.0));
    }

    #[test]
    fn gap_lookup_points_at_next_clip() {
        // [4, 6) was deleted.
        let l = list(&[(0.0, 4.0), (6.0, 10.0)]);
        let segs = build_segments(l.as_slice());
        assert_eq!(source_to_preview(5.0, &segs), SourceLookup::Gap { next_source_start: Some(6.0) });
        assert_eq!(source_to_preview(6.0, &segs), SourceLookup::Mapped(4.0));
        assert_eq!(source_to_preview(11.0, &segs), SourceLookup::Gap { next_source_start: None });
    }

    #[test]
    fn preview_boundary_tie_takes_first_segment() {
        let l = list(&[(0.0, 4.0), (6.0, 10.0)]);
        let segs = build_segments(l.as_slice());
        assert_eq!(preview_to_source(4.0, &segs), Some(4.0));
        assert_eq!(preview_to_source(4.5, &segs), Some(6.5));
        assert_eq!(preview_to_source(8.5, &segs), None);
        assert_eq!(preview_to_source_or_zero(8.5, &segs), 0.0);
    }

    #[test]
    fn build_is_deterministic() {
        let l = list(&[(3.0, 5.0), (0.0, 1.0), (7.0, 9.5)]);
        assert_eq!(build_segments(l.as_slice()), build_segments(l.as_slice()));
    }

    fn arb_ranges() -> impl Strategy<Value = Vec<(f64, f64)>> {
        // Disjoint ranges built from sorted cut points, then shuffled.
        proptest::collection::vec(0.1f64..5.0, 1..10).prop_flat_map(|lens| {
            let mut cursor = 0.0_f64;
            let ranges: Vec<(f64, f64)> = lens.iter().copied().enumerate()
                .filter_map(|(i, len)| {
                    let r = (cursor, cursor + len);
                    cursor += len;
                    (i % 3 != 1).then_some(r)
                })
                .collect();
            Just(ranges).prop_shuffle()
        })
    }

    proptest! {
        #[test]
        fn segments_are_gapless_and_duration_preserving(ranges in arb_ranges()) {
            let l = list(&ranges);
            let segs = build_segments(l.as_slice());
            let total: f64 = segs.iter().map(Segment::duration).sum();
            prop_assert!((total - total_preview_duration(l.as_slice())).abs() < EPS);
            if let Some(first) = segs.first() {
                prop_assert_eq!(first.preview_start, 0.0);
            }
            for w in segs.windows(2) {
                prop_assert_eq!(w[0].preview_end, w[1].preview_start);
                prop_assert!(w[0].source_start <= w[1].source_start);
            }
            for s in &segs {
                prop_assert!((s.duration() - (s.source_end - s.source_start)).abs() < EPS);
            }
        }

        #[test]
        fn source_preview_round_trip(ranges in arb_ranges(), pick in 0usize..10, frac in 0.0f64..0.99) {
            let l = list(&ranges);
            let segs = build_segments(l.as_slice());
            let clip = &l.as_slice()[pick % l.len()];
            let t = clip.source_start + frac * clip.duration();
            match source_to_preview(t, &segs) {
                SourceLookup::Mapped(p) => {
                    let back = preview_to_source(p, &segs).unwrap();
                    prop_assert!((back - t).abs() < 1e-6, "{} -> {} -> {}", t, p, back);
                }
                SourceLookup::Gap { .. } => prop_assert!(false, "{} is inside a clip", t),
            }
        }
    }
}
