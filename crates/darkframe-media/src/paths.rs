// crates/darkframe-media/src/paths.rs
// Where Dark Frame looks for a bundled ffmpeg / ffprobe.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Overrides the bundled tools directory outright.
pub const TOOLS_DIR_ENV: &str = "DARKFRAME_TOOLS_DIR";

/// Per-user directory a bundled ffmpeg build is unpacked into, or `None` when
/// the platform's data directory cannot be determined.
pub fn app_tools_dir() -> Option<PathBuf> {
    tools_dir_from(|var| std::env::var_os(var))
}

/// Resolution, with the environment passed in:
///   1. `DARKFRAME_TOOLS_DIR`
///   2. Windows: `%APPDATA%\DarkFrame\ffmpeg`
///      macOS:   `~/Library/Application Support/DarkFrame/ffmpeg`
///      other:   `$XDG_DATA_HOME/darkframe/ffmpeg`, else `~/.local/share/darkframe/ffmpeg`
fn tools_dir_from(env: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    let var = |name: &str| env(name).filter(|v| !v.is_empty()).map(PathBuf::from);

    if let Some(dir) = var(TOOLS_DIR_ENV) {
        return Some(dir);
    }
    if cfg!(target_os = "windows") {
        var("APPDATA").map(|d| d.join("DarkFrame").join("ffmpeg"))
    } else if cfg!(target_os = "macos") {
        var("HOME").map(|h| h.join("Library/Application Support/DarkFrame/ffmpeg"))
    } else {
        var("XDG_DATA_HOME")
            .or_else(|| var("HOME").map(|h| h.join(".local/share")))
            .map(|d| d.join("darkframe").join("ffmpeg"))
    }
}

/// Locate `tool` (e.g. "ffmpeg") under `dir`.
///
/// Bundled builds unpack into a versioned subdirectory like
/// `ffmpeg-7.1-essentials_build/bin/ffmpeg`, so walk one level deep and
/// accept either `<sub>/bin/<tool>` or `<sub>/<tool>`, then `dir/<tool>`.
pub fn find_tool_in(dir: &Path, tool: &str) -> Option<PathBuf> {
    let name = format!("{tool}{}", std::env::consts::EXE_SUFFIX);

    let flat = dir.join(&name);
    if flat.is_file() {
        return Some(flat);
    }
    let entries = std::fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let sub = entry.path();
        for candidate in [sub.join("bin").join(&name), sub.join(&name)] {
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
