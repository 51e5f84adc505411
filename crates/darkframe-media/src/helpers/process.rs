// crates/darkframe-media/src/helpers/process.rs
//
// One place that spawns ffmpeg / ffprobe and turns the outcome into a
// MediaError. Output is captured, never inherited: progress is reported
// through callbacks, not by the tool writing to our terminal.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::MediaError;

/// Run `tool` with `args` to completion. Non-zero exit → `ToolFailed` with
/// the last stderr line.
pub(crate) fn run_tool<I, S>(tool: &Path, args: I) -> Result<Output, MediaError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let name = tool_name(tool);
    let output = Command::new(tool)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => MediaError::ToolNotFound(tool.to_path_buf()),
            _ => MediaError::Spawn { tool: name.clone(), source: e },
        })?;

    if !output.status.success() {
        let stderr = last_line(&output.stderr);
        return Err(MediaError::ToolFailed {
            tool:   name,
            stderr: if stderr.is_empty() { output.status.to_string() } else { stderr },
        });
    }
    Ok(output)
}

fn tool_name(tool: &Path) -> String {
    tool.file_stem()
        .unwrap_or(tool.as_os_str())
        .to_string_lossy()
        .to_string()
}

/// Last non-empty line of a tool's stderr, trimmed.
pub(crate) fn last_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_line_skips_trailing_blank_lines() {
        assert_eq!(last_line(b"warning\nreal error\n\n"), "real error");
        assert_eq!(last_line(b""), "");
    }

    #[test]
    fn missing_binary_is_tool_not_found() {
        let err = run_tool(Path::new("/nonexistent/darkframe-ffmpeg"), ["-version"]).unwrap_err();
        assert!(matches!(err, MediaError::ToolNotFound(_)), "{err:?}");
    }

    #[test]
    fn tool_name_drops_directory_and_suffix() {
        assert_eq!(tool_name(Path::new("/opt/ff/bin/ffmpeg.exe")), "ffmpeg");
    }
}
