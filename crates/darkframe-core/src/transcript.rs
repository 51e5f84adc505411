// crates/darkframe-core/src/transcript.rs
//
// Transcript-driven cut planning.
//
// Input is a word-timestamp list (the `*_words.json` a transcriber writes:
// `[{ "word": "...", "start": s, "end": s }, ...]`). Output is a list of keep
// ranges in source time, ready for EditSession::from_keep_ranges.
//
// Pipeline: pick word ids (filler detection or explicit) → pad each word
// into a remove range → merge → invert over [0, duration] → drop slivers.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `(start, end)` in seconds of source time.
pub type TimeRange = (f64, f64);

/// Keep ranges shorter than this are dropped after inversion.
pub const MIN_KEEP_SECS: f64 = 0.01;

/// "like" only counts as a filler when spoken this quickly or faster.
const LIKE_MAX_SECS: f64 = 0.35;

const FILLER_PATTERNS: &[&str] = &[
    r"\buh+\b", r"\bum+\b", r"\berm?\b", r"\ber+\b",
    r"\blike\b", r"\bactually\b", r"\bbasically\b", r"\bliterally\b",
    r"\bkinda\b", r"\bsorta\b", r"\bright\b",
    r"\byou know\b", r"\bi mean\b", r"\bkind of\b", r"\bsort of\b",
];

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("read words file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse words file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    #[serde(alias = "text")]
    pub word:  String,
    pub start: f64,
    pub end:   f64,
}

impl Word {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

pub fn load_words(path: &Path) -> Result<Vec<Word>, TranscriptError> {
    let text  = std::fs::read_to_string(path)?;
    let words = serde_json::from_str(&text)?;
    Ok(words)
}

// ── Filler detection ──────────────────────────────────────────────────────────

pub struct FillerDetector {
    re: Regex,
}

impl FillerDetector {
    pub fn new() -> Self {
        let alternation = FILLER_PATTERNS.join("|");
        // Patterns are compile-time constants; a failure here is a typo above.
        let re = Regex::new(&format!("(?i)^(?:{alternation})$"))
            .expect("filler patterns are valid");
        Self { re }
    }

    pub fn is_filler(&self, word: &Word) -> bool {
        let text = word.word.trim();
        if !self.re.is_match(text) {
            return false;
        }
        !(text.eq_ignore_ascii_case("like") && word.duration() > LIKE_MAX_SECS)
    }

    /// Indices of filler words, ascending.
    pub fn detect(&self, words: &[Word]) -> Vec<usize> {
        words.iter()
            .enumerate()
            .filter(|(_, w)| self.is_filler(w))
            .map(|(i, _)| i)
            .collect()
    }
}

impl Default for FillerDetector {
    fn default() -> Self {
        Self::new()
    }
}

// ── Range arithmetic ──────────────────────────────────────────────────────────

/// Padding around each removed word, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutPadding {
    pub before: f64,
    pub after:  f64,
}

impl Default for CutPadding {
    fn default() -> Self {
        Self { before: 0.12, after: 0.15 }
    }
}

/// Padded, merged remove ranges for `ids`. Out-of-range ids are ignored.
pub fn remove_ranges(words: &[Word], ids: &[usize], padding: CutPadding) -> Vec<TimeRange> {
    let ranges = ids.iter()
        .filter_map(|&i| words.get(i))
        .map(|w| ((w.start - padding.before).max(0.0), (w.end + padding.after).max(0.0)))
        .collect();
    merge_ranges(ranges)
}

/// Sort and merge overlapping or touching ranges.
pub fn merge_ranges(mut ranges: Vec<TimeRange>) -> Vec<TimeRange> {
    ranges.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    let mut merged: Vec<TimeRange> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Complement of sorted, merged `removes` over `[0, duration]`.
pub fn invert_ranges(removes: &[TimeRange], duration: f64) -> Vec<TimeRange> {
    let mut keeps  = Vec::with_capacity(removes.len() + 1);
    let mut cursor = 0.0_f64;
    for &(start, end) in removes {
        let start = start.max(0.0);
        let end   = end.min(duration);
        if start > cursor {
            keeps.push((cursor, start));
        }
        cursor = cursor.max(end);
    }
    if cursor < duration {
        keeps.push((cursor, duration));
    }
    keeps.retain(|&(s, e)| e - s > MIN_KEEP_SECS);
    keeps
}

/// Keep ranges after removing `ids` from a source of `duration` seconds.
/// A non-positive `duration` falls back to the last word's end.
pub fn plan_keeps(words: &[Word], ids: &[usize], duration: f64, padding: CutPadding) -> Vec<TimeRange> {
    let duration = if duration > 0.0 {
        duration
    } else {
        words.last().map_or(0.0, |w| w.end)
    };
    let removes = remove_ranges(words, ids, padding);
    invert_ranges(&removes, duration)
}
