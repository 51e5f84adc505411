// crates/darkframe-core/src/commands.rs
//
// Every edit a shell can make to an EditSession is an EditorCommand.
// The shell builds these from user input; EditSession::apply processes them.
// Adding a new edit = add a variant here + one match arm in session.rs.

use crate::clip::{Clip, ClipId, SourceRef};
use crate::session::ViewMode;

#[derive(Debug, Clone)]
pub enum EditorCommand {
    // ── Playhead / view ──────────────────────────────────────────────────────
    /// Seconds on the current timeline (preview time in Edited mode,
    /// source time in Original mode). Clamped to the timeline length.
    SetPlayhead(f64),
    SetMode(ViewMode),
    ToggleMode,
    Select(Option<ClipId>),

    // ── Clip list ────────────────────────────────────────────────────────────
    /// Split `id` at source time `at`.
    Cut { id: ClipId, at: f64 },
    /// Split whichever clip is under the playhead.
    CutAtPlayhead,
    Delete(ClipId),
    DeleteSelected,
    /// Move a clip on the positional timeline. Clamped to the asset length.
    Drag { id: ClipId, position: f64 },
    /// Replace `old` with 1–3 clips (before / processed / after).
    Splice { old: ClipId, replacements: Vec<Clip> },
    /// Replace source time `start..end` of `old` with a processed render.
    SpliceProcessed { old: ClipId, start: f64, end: f64, processed: SourceRef },
}
