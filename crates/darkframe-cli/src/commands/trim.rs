// crates/darkframe-cli/src/commands/trim.rs
//
// `clean` and `remove`: plan keeps from the transcript, build the edited
// session, export it.

use std::path::PathBuf;

use anyhow::Result;

use darkframe_core::helpers::time::format_duration;
use darkframe_core::transcript::{remove_ranges, FillerDetector, Word};
use darkframe_media::{ExportSpec, ExportWorker};

use super::{load_transcript, plan_session, run_export, source_duration};
use crate::cli::{ExportArgs, InputArgs};

pub fn clean(input: &InputArgs, export: &ExportArgs, worker: &ExportWorker) -> Result<()> {
    let words = load_transcript(input)?;
    let ids   = FillerDetector::new().detect(&words);
    if ids.is_empty() {
        println!("No filler words found.");
        return Ok(());
    }

    let found: Vec<&str> = ids.iter().filter_map(|&i| words.get(i)).map(|w| w.word.as_str()).collect();
    println!("Found {} filler words: {}", ids.len(), found.join(", "));

    let output = export.output_for(&input.video, "clean");
    let path   = cut_and_export(input, &words, &ids, export, output, worker)?;
    println!("Saved cleaned video: {}", path.display());
    Ok(())
}

pub fn remove(input: &InputArgs, ids: &[usize], export: &ExportArgs, worker: &ExportWorker) -> Result<()> {
    let words = load_transcript(input)?;
    let unknown = ids.iter().filter(|&&i| i >= words.len()).count();
    if unknown > 0 {
        log::warn!("[words] ignoring {unknown} id(s) past the last word ({})", words.len());
    }

    let output = export.output_for(&input.video, "edited");
    let path   = cut_and_export(input, &words, ids, export, output, worker)?;
    println!("Saved edited video: {}", path.display());
    Ok(())
}

fn cut_and_export(
    input:  &InputArgs,
    words:  &[Word],
    ids:    &[usize],
    export: &ExportArgs,
    output: PathBuf,
    worker: &ExportWorker,
) -> Result<PathBuf> {
    let padding  = input.padding();
    let duration = source_duration(&input.video, words, worker.config());
    let session  = plan_session(&input.video, words, ids, duration, padding)?;
    let plan     = session.export_plan();

    println!(
        "Cutting {} remove ranges -> {} kept segments ({} of {})",
        remove_ranges(words, ids, padding).len(),
        plan.len(),
        format_duration(session.timeline_duration()),
        format_duration(duration),
    );
    run_export(ExportSpec::new(plan, output, export.codec()), worker)
}
