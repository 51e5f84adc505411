// crates/darkframe-media/src/lib.rs
//
// Everything that touches media files: ffmpeg / ffprobe discovery, duration
// probing, and the extract-and-concat export run on a background worker.
// Timeline semantics live in darkframe-core; this crate only consumes an
// ExportPlan.

pub mod config;
pub mod error;
pub mod export;
pub mod paths;
pub mod probe;
pub mod worker;

mod helpers;

pub use config::MediaConfig;
pub use darkframe_core::media_types::ExportEvent;
pub use error::{ExportError, MediaError};
pub use export::{export_timeline, ExportCodec, ExportSpec};
pub use probe::probe_duration;
pub use worker::ExportWorker;
