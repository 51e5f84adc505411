// crates/darkframe-cli/src/commands/mod.rs
//
// Subcommand handlers. Each one gets the shell-owned ExportWorker; none of
// them keeps state beyond its own EditSession.

pub mod segments;
pub mod trim;
pub mod words;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use darkframe_core::clip::SourceRef;
use darkframe_core::session::EditSession;
use darkframe_core::transcript::{load_words, plan_keeps, CutPadding, Word};
use darkframe_media::{probe_duration, ExportEvent, ExportSpec, ExportWorker, MediaConfig};

use crate::cli::{Command, InputArgs};

pub fn dispatch(command: Command, worker: &ExportWorker) -> Result<()> {
    match command {
        Command::Words { words, count }       => words::run(&words, count),
        Command::Clean { input, export }      => trim::clean(&input, &export, worker),
        Command::Remove { input, ids, export } => trim::remove(&input, &ids.0, &export, worker),
        Command::Segments { input, ids }      => segments::run(&input, ids.as_ref(), worker.config()),
    }
}

// ── Shared steps ─────────────────────────────────────────────────────────────

pub(crate) fn load_transcript(input: &InputArgs) -> Result<Vec<Word>> {
    let path = input.words_path();
    let words = load_words(&path)
        .with_context(|| format!("loading words from {} (run transcription first)", path.display()))?;
    log::info!("[words] {} words ← {}", words.len(), path.display());
    Ok(words)
}

/// Probed source duration. Without ffprobe the transcript's last word end
/// stands in, which drops any trailing silence from the keep ranges.
pub(crate) fn source_duration(video: &Path, words: &[Word], config: &MediaConfig) -> f64 {
    match probe_duration(video, config) {
        Ok(d) => d,
        Err(e) => {
            let fallback = words.last().map_or(0.0, |w| w.end);
            log::warn!("[probe] {e}; using transcript end {fallback:.2}s");
            fallback
        }
    }
}

/// Session pre-cut to everything except the padded `ids`.
pub(crate) fn plan_session(
    video:    &Path,
    words:    &[Word],
    ids:      &[usize],
    duration: f64,
    padding:  CutPadding,
) -> Result<EditSession> {
    let keeps = plan_keeps(words, ids, duration, padding);
    if keeps.is_empty() {
        bail!("nothing to keep after cuts");
    }
    Ok(EditSession::from_keep_ranges(SourceRef::new(video), duration, &keeps))
}

/// Start `spec` on the worker and block until its terminal event.
pub(crate) fn run_export(spec: ExportSpec, worker: &ExportWorker) -> Result<PathBuf> {
    let job = worker.start(spec).context("starting export")?;
    wait_for(worker, job)
}

fn wait_for(worker: &ExportWorker, job: Uuid) -> Result<PathBuf> {
    let mut stderr = std::io::stderr();
    for event in worker.rx.iter() {
        if event.job_id() != job {
            continue;
        }
        match event {
            ExportEvent::Progress { percent, .. } => {
                let _ = write!(stderr, "\rExporting {percent:5.1}%");
                let _ = stderr.flush();
            }
            ExportEvent::Done { path, .. } => {
                let _ = writeln!(stderr);
                return Ok(path);
            }
            ExportEvent::Failed { msg, .. } => {
                let _ = writeln!(stderr);
                bail!("export failed: {msg}");
            }
        }
    }
    bail!("export worker stopped without a result")
}
