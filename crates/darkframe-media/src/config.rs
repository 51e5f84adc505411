// crates/darkframe-media/src/config.rs
//
// Which ffmpeg / ffprobe binaries to run.
//
// Resolution order per tool:
//   1. DARKFRAME_FFMPEG / DARKFRAME_FFPROBE environment variables
//   2. a bundled copy under paths::app_tools_dir() (DARKFRAME_TOOLS_DIR or
//      the per-user data dir)
//   3. the bare name, resolved through PATH at spawn time
// The shell may override either path afterwards (CLI flags).

use std::path::PathBuf;

use crate::paths::{app_tools_dir, find_tool_in};

pub const FFMPEG_ENV:  &str = "DARKFRAME_FFMPEG";
pub const FFPROBE_ENV: &str = "DARKFRAME_FFPROBE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaConfig {
    pub ffmpeg:  PathBuf,
    pub ffprobe: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self { ffmpeg: PathBuf::from("ffmpeg"), ffprobe: PathBuf::from("ffprobe") }
    }
}

impl MediaConfig {
    pub fn from_env() -> Self {
        let tools = app_tools_dir();
        let resolve = |var: &str, tool: &str| {
            std::env::var_os(var)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .or_else(|| tools.as_deref().and_then(|dir| find_tool_in(dir, tool)))
                .unwrap_or_else(|| PathBuf::from(tool))
        };
        let config = Self {
            ffmpeg:  resolve(FFMPEG_ENV, "ffmpeg"),
            ffprobe: resolve(FFPROBE_ENV, "ffprobe"),
        };
        log::debug!("[config] ffmpeg={} ffprobe={}", config.ffmpeg.display(), config.ffprobe.display());
        config
    }

    pub fn with_ffmpeg(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.ffmpeg = p;
        }
        self
    }

    pub fn with_ffprobe(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.ffprobe = p;
        }
        self
    }
}
