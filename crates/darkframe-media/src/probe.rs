// crates/darkframe-media/src/probe.rs
//
// Source duration via ffprobe. The duration seeds the initial clip
// ([0, duration)) and bounds drag and keep-range inversion.

use std::ffi::OsStr;
use std::path::Path;

use crate::config::MediaConfig;
use crate::error::MediaError;
use crate::helpers::process::run_tool;

pub fn probe_duration(path: &Path, config: &MediaConfig) -> Result<f64, MediaError> {
    let output = run_tool(&config.ffprobe, [
        OsStr::new("-v"), OsStr::new("error"),
        OsStr::new("-show_entries"), OsStr::new("format=duration"),
        OsStr::new("-of"), OsStr::new("default=nw=1:nk=1"),
        path.as_os_str(),
    ])?;

    let text = String::from_utf8_lossy(&output.stdout);
    match parse_duration(&text) {
        Some(d) => {
            log::info!("[probe] duration {d:.2}s ← {}", path.display());
            Ok(d)
        }
        None => Err(MediaError::Probe {
            path: path.to_path_buf(),
            msg:  format!("unexpected ffprobe output {:?}", text.trim()),
        }),
    }
}

/// First line of ffprobe's `nw=1:nk=1` output as positive seconds.
fn parse_duration(stdout: &str) -> Option<f64> {
    stdout.lines()
        .next()?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_seconds() {
        assert_eq!(parse_duration("12.480000\n"), Some(12.48));
    }

    #[test]
    fn rejects_na_and_zero() {
        assert_eq!(parse_duration("N/A\n"), None);
        assert_eq!(parse_duration("0.000000\n"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn missing_ffprobe_surfaces_tool_not_found() {
        let config = MediaConfig {
            ffprobe: "/nonexistent/darkframe-ffprobe".into(),
            ..MediaConfig::default()
        };
        let err = probe_duration(Path::new("talk.mp4"), &config).unwrap_err();
        assert!(matches!(err, MediaError::ToolNotFound(_)));
    }
}
