// crates/darkframe-core/src/lib.rs
//
// Pure editing model: no processes, no threads, no I/O beyond reading a
// transcript file. darkframe-media and darkframe-cli build on top of it.

pub mod clip;
pub mod commands;
pub mod helpers;
pub mod media_types;
pub mod segments;
pub mod session;
pub mod timeline;
pub mod transcript;

pub use clip::{Clip, ClipId, SourceRef};
pub use commands::EditorCommand;
pub use media_types::{ExportEvent, ExportPlan, ExportRange};
pub use segments::{Segment, SourceLookup};
pub use session::{EditSession, PlaybackStep, ViewMode};
pub use timeline::{ClipList, EditOutcome};
