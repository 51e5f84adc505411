// crates/darkframe-core/src/media_types.rs
//
// Types that flow between darkframe-core and darkframe-media.
// Plain data only. No process spawning, no threads.

use std::path::PathBuf;
use serde::Serialize;
use uuid::Uuid;

use crate::clip::SourceRef;

/// One interval to extract during export, in `source`'s own media time
/// (see `Clip::media_range`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportRange {
    pub source: SourceRef,
    pub start:  f64,
    pub end:    f64,
}

impl ExportRange {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Snapshot of the clip list in render order (ascending source_start, the
/// same order the segment mapper uses for preview).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExportPlan {
    pub ranges: Vec<ExportRange>,
}

impl ExportPlan {
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn total_duration(&self) -> f64 {
        self.ranges.iter().map(ExportRange::duration).sum()
    }
}

/// Results sent from the export worker thread to the owner.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportEvent {
    /// Fraction complete in `[0, 100]`, monotonically non-decreasing per job.
    Progress { job_id: Uuid, percent: f32 },
    Done     { job_id: Uuid, path: PathBuf },
    /// Terminal. No partial output is left behind.
    Failed   { job_id: Uuid, msg: String },
}

impl ExportEvent {
    pub fn job_id(&self) -> Uuid {
        match self {
            ExportEvent::Progress { job_id, .. }
            | ExportEvent::Done   { job_id, .. }
            | ExportEvent::Failed { job_id, .. } => *job_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExportEvent::Progress { .. })
    }
}
