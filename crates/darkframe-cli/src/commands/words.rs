// crates/darkframe-cli/src/commands/words.rs
//
// `words`: id listing so users can pick ids for `remove`.

use std::path::Path;

use anyhow::{Context, Result};

use darkframe_core::helpers::time::{format_duration, format_time};
use darkframe_core::transcript::{load_words, FillerDetector, Word};

pub fn run(path: &Path, count: Option<usize>) -> Result<()> {
    let words = load_words(path).with_context(|| format!("loading words from {}", path.display()))?;
    let detector = FillerDetector::new();

    for line in listing(&words, &detector, count) {
        println!("{line}");
    }
    let fillers = detector.detect(&words).len();
    let spoken  = words.last().map_or(0.0, |w| w.end);
    println!("{} words, {fillers} fillers (*), {}", words.len(), format_duration(spoken));
    Ok(())
}

fn listing(words: &[Word], detector: &FillerDetector, count: Option<usize>) -> Vec<String> {
    let shown = count.unwrap_or(words.len()).min(words.len());
    let mut lines: Vec<String> = words.iter()
        .take(shown)
        .enumerate()
        .map(|(id, w)| {
            let mark = if detector.is_filler(w) { '*' } else { ' ' };
            format!("{id:>5} {mark} {}  {}", format_time(w.start), w.word)
        })
        .collect();
    if shown < words.len() {
        lines.push(format!("      ... and {} more words", words.len() - shown));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(word: &str, start: f64, end: f64) -> Word {
        Word { word: word.into(), start, end }
    }

    #[test]
    fn marks_fillers_and_truncates() {
        let words = vec![w("So", 0.0, 0.3), w("um", 0.5, 0.7), w("right", 61.5, 61.8)];
        let lines = listing(&words, &FillerDetector::new(), Some(2));
        assert_eq!(lines, vec![
            "    0   00:00:00  So",
            "    1 * 00:00:15  um",
            "      ... and 1 more words",
        ]);
    }

    #[test]
    fn count_larger_than_transcript_shows_everything() {
        let words = vec![w("hi", 0.0, 0.3)];
        assert_eq!(listing(&words, &FillerDetector::new(), Some(10)).len(), 1);
    }
}
