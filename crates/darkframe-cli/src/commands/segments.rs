// crates/darkframe-cli/src/commands/segments.rs
//
// `segments`: dump the segment map of the planned edit as JSON. Inspection
// only; nothing is written to disk.

use anyhow::Result;
use serde::Serialize;

use darkframe_core::segments::Segment;
use darkframe_core::session::{EditSession, ViewMode};
use darkframe_core::transcript::FillerDetector;
use darkframe_media::MediaConfig;

use super::{load_transcript, plan_session, source_duration};
use crate::cli::{InputArgs, WordIds};

#[derive(Debug, Serialize)]
struct SegmentReport {
    source:           String,
    source_duration:  f64,
    preview_duration: f64,
    mode:             ViewMode,
    removed_ids:      Vec<usize>,
    segments:         Vec<Segment>,
}

impl SegmentReport {
    fn new(session: &EditSession, removed_ids: Vec<usize>) -> Self {
        Self {
            source:           session.source().path().display().to_string(),
            source_duration:  session.source_duration(),
            preview_duration: session.timeline_duration(),
            mode:             session.mode(),
            removed_ids,
            segments:         session.segments(),
        }
    }
}

pub fn run(input: &InputArgs, ids: Option<&WordIds>, config: &MediaConfig) -> Result<()> {
    let words = load_transcript(input)?;
    let ids = match ids {
        Some(ids) => ids.0.clone(),
        None      => FillerDetector::new().detect(&words),
    };
    let duration = source_duration(&input.video, &words, config);
    let session  = plan_session(&input.video, &words, &ids, duration, input.padding())?;

    let report = SegmentReport::new(&session, ids);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
