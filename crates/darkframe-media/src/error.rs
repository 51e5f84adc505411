// crates/darkframe-media/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failure running or reading an external media tool.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("{} not found; install ffmpeg or set DARKFRAME_FFMPEG / DARKFRAME_FFPROBE", .0.display())]
    ToolNotFound(PathBuf),

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool:   String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed: {stderr}")]
    ToolFailed { tool: String, stderr: String },

    #[error("could not read duration of {}: {msg}", .path.display())]
    Probe { path: PathBuf, msg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Terminal failure of an export attempt. The clip list is never touched.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the timeline is empty")]
    EmptyPlan,

    #[error("an export is already running")]
    Busy,

    #[error("export worker is shutting down")]
    ShuttingDown,

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),
}
