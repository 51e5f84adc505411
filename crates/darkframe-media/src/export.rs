// crates/darkframe-media/src/export.rs
//
// Extract-and-concatenate export through the ffmpeg CLI.
//
// Design:
//   • `ExportSpec`:        the job: a render-order ExportPlan, an output
//     path and the codec policy.
//   • `export_timeline()`: blocking; ExportWorker runs it on its own thread.
//
// Steps (same ordering as the preview timeline, see ExportPlan):
//   1. For each range, `ffmpeg -ss S -to E -i SRC ... part_NNN.mp4` into a
//      private TempDir.
//   2. Write a concat-demuxer list of the parts.
//   3. `ffmpeg -f concat -safe 0 -i files.txt -c copy OUTPUT`.
//
// Progress:
//   0 before the first extraction, 100·(i+1)/(n+1) after extraction i of n,
//   100 once the concat finishes. The +1 reserves the last step for the
//   concat so the bar never sits at 100 while work remains.
//
// Failure:
//   Any failed step ends the job. The TempDir is dropped (parts removed) and
//   an output file written by a failed concat is deleted, so callers never
//   see partial output.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use darkframe_core::helpers::time::ffmpeg_seconds;
use darkframe_core::media_types::{ExportPlan, ExportRange};

use crate::config::MediaConfig;
use crate::error::ExportError;
use crate::helpers::process::run_tool;

// ── Public types ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportCodec {
    /// `-c copy`: fast and lossless, cuts snap to the nearest keyframe.
    #[default]
    StreamCopy,
    /// H.264 (CRF 18, preset fast) + AAC 128 kbps: frame-accurate cuts.
    Reencode,
}

/// Complete description of an export job.
#[derive(Clone, Debug)]
pub struct ExportSpec {
    pub job_id: Uuid,
    pub plan:   ExportPlan,
    /// Destination file, including extension (`.mp4`).
    pub output: PathBuf,
    pub codec:  ExportCodec,
}

impl ExportSpec {
    pub fn new(plan: ExportPlan, output: PathBuf, codec: ExportCodec) -> Self {
        Self { job_id: Uuid::new_v4(), plan, output, codec }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Export `spec` to disk, reporting progress in `[0, 100]`. Blocking.
pub fn export_timeline(
    spec:        &ExportSpec,
    config:      &MediaConfig,
    mut on_progress: impl FnMut(f32),
) -> Result<PathBuf, ExportError> {
    if spec.plan.is_empty() {
        return Err(ExportError::EmptyPlan);
    }
    log::info!(
        "[export] {} ranges ({:.2}s) → {}",
        spec.plan.len(), spec.plan.total_duration(), spec.output.display(),
    );

    let work  = tempfile::Builder::new().prefix("darkframe_export_").tempdir()?;
    let parts = extract_parts(spec, config, work.path(), &mut on_progress)?;

    let list = work.path().join("files.txt");
    std::fs::write(&list, concat_list(&parts))?;

    if let Some(parent) = spec.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    if let Err(e) = run_tool(&config.ffmpeg, concat_args(&list, &spec.output)) {
        remove_partial(&spec.output);
        return Err(e.into());
    }

    on_progress(100.0);
    log::info!("[export] done → {}", spec.output.display());
    Ok(spec.output.clone())
}

fn extract_parts(
    spec:        &ExportSpec,
    config:      &MediaConfig,
    dir:         &Path,
    on_progress: &mut impl FnMut(f32),
) -> Result<Vec<PathBuf>, ExportError> {
    let n = spec.plan.len();
    let mut parts = Vec::with_capacity(n);
    on_progress(0.0);

    for (i, range) in spec.plan.ranges.iter().enumerate() {
        let part = dir.join(format!("part_{i:03}.mp4"));
        log::debug!(
            "[export] extract {}/{n} {}..{} ← {}",
            i + 1, ffmpeg_seconds(range.start), ffmpeg_seconds(range.end),
            range.source.display_name(),
        );
        run_tool(&config.ffmpeg, extract_args(range, &part, spec.codec))?;
        parts.push(part);
        on_progress(progress_after_extract(i, n));
    }
    Ok(parts)
}

fn remove_partial(path: &Path) {
    if path.exists() {
        match std::fs::remove_file(path) {
            Ok(())  => log::warn!("[export] removed partial output {}", path.display()),
            Err(e)  => log::warn!("[export] could not remove partial output {}: {e}", path.display()),
        }
    }
}

// ── Argument building ─────────────────────────────────────────────────────────

fn codec_args(codec: ExportCodec) -> &'static [&'static str] {
    match codec {
        ExportCodec::StreamCopy => &["-c", "copy"],
        ExportCodec::Reencode => &[
            "-c:v", "libx264", "-preset", "fast", "-crf", "18", "-pix_fmt", "yuv420p",
            "-c:a", "aac", "-b:a", "128k",
        ],
    }
}

pub(crate) fn extract_args(range: &ExportRange, part: &Path, codec: ExportCodec) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-v", "error", "-ss"].iter().map(OsString::from).collect();
    args.push(ffmpeg_seconds(range.start).into());
    args.push("-to".into());
    args.push(ffmpeg_seconds(range.end).into());
    args.push("-i".into());
    args.push(range.source.path().into());
    args.extend(codec_args(codec).iter().map(OsString::from));
    args.push(part.into());
    args
}

pub(crate) fn concat_args(list: &Path, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-v", "error", "-f", "concat", "-safe", "0", "-i"]
        .iter()
        .map(OsString::from)
        .collect();
    args.push(list.into());
    args.extend(["-c", "copy", "-movflags", "+faststart"].iter().map(OsString::from));
    args.push(output.into());
    args
}

/// Concat-demuxer list: one `file '<path>'` per line, forward slashes,
/// single quotes escaped the way the demuxer expects (`'\''`).
pub(crate) fn concat_list(parts: &[PathBuf]) -> String {
    parts.iter()
        .map(|p| {
            let path = p.to_string_lossy().replace('\\', "/").replace('\'', r"'\''");
            format!("file '{path}'")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn progress_after_extract(i: usize, n: usize) -> f32 {
    (100.0 * (i + 1) as f64 / (n + 1) as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkframe_core::clip::SourceRef;

    fn range(start: f64, end: f64) -> ExportRange {
        ExportRange { source: SourceRef::new("/media/talk.mp4"), start, end }
    }

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().to_string()).collect()
    }

    #[test]
    fn extract_args_trim_source_range() {
        let args = strings(&extract_args(&range(1.5, 4.25), Path::new("/tmp/p/part_000.mp4"), ExportCodec::StreamCopy));
        assert_eq!(args, vec![
            "-y", "-v", "error", "-ss", "1.500", "-to", "4.250",
            "-i", "/media/talk.mp4", "-c", "copy", "/tmp/p/part_000.mp4",
        ]);
    }

    #[test]
    fn reencode_uses_h264_and_aac() {
        let args = strings(&extract_args(&range(0.0, 1.0), Path::new("p.mp4"), ExportCodec::Reencode));
        assert!(args.windows(2).any(|w| w == ["-c:v", "libx264"]));
        assert!(args.windows(2).any(|w| w == ["-c:a", "aac"]));
        assert_eq!(args.last().map(String::as_str), Some("p.mp4"));
    }

    #[test]
    fn concat_args_copy_into_output() {
        let args = strings(&concat_args(Path::new("files.txt"), Path::new("out.mp4")));
        assert_eq!(&args[..8], ["-y", "-v", "error", "-f", "concat", "-safe", "0", "-i"]);
        assert_eq!(args[8], "files.txt");
        assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
    }

    #[test]
    fn concat_list_escapes_quotes() {
        let list = concat_list(&[PathBuf::from("/tmp/a/part_000.mp4"), PathBuf::from("/tmp/it's/part_001.mp4")]);
        assert_eq!(list, "file '/tmp/a/part_000.mp4'\nfile '/tmp/it'\\''s/part_001.mp4'");
    }

    #[test]
    fn progress_is_monotonic_and_leaves_room_for_concat() {
        let n = 4;
        let steps: Vec<f32> = (0..n).map(|i| progress_after_extract(i, n)).collect();
        assert!(steps.windows(2).all(|w| w[0] < w[1]));
        assert!(steps.iter().all(|p| *p > 0.0 && *p < 100.0));
        assert_eq!(steps[n - 1], 80.0);
    }

    #[test]
    fn empty_plan_is_rejected() {
        let spec = ExportSpec::new(ExportPlan::default(), PathBuf::from("out.mp4"), ExportCodec::StreamCopy);
        let err = export_timeline(&spec, &MediaConfig::default(), |_| {}).unwrap_err();
        assert!(matches!(err, ExportError::EmptyPlan));
    }

    #[test]
    fn missing_ffmpeg_fails_without_output() {
        let dir    = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp4");
        let plan   = ExportPlan { ranges: vec![range(0.0, 2.0), range(3.0, 5.0)] };
        let spec   = ExportSpec::new(plan, output.clone(), ExportCodec::StreamCopy);
        let config = MediaConfig { ffmpeg: "/nonexistent/darkframe-ffmpeg".into(), ..MediaConfig::default() };

        let mut seen = Vec::new();
        let err = export_timeline(&spec, &config, |p| seen.push(p)).unwrap_err();
        assert!(matches!(err, ExportError::Media(crate::error::MediaError::ToolNotFound(_))), "{err:?}");
        assert_eq!(seen, vec![0.0]);
        assert!(!output.exists());
    }
}
