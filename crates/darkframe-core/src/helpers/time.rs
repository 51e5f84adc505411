// crates/darkframe-core/src/helpers/time.rs
//
// Time formatting shared by the CLI listings and the ffmpeg argument builder.

/// Format seconds as `MM:SS:FF` (minutes, seconds, frames at 30 fps).
///
/// Used for segment listings where frame-level precision matters.
///
/// ```
/// use darkframe_core::helpers::time::format_time;
/// assert_eq!(format_time(0.0),    "00:00:00");
/// assert_eq!(format_time(61.5),   "01:01:15");
/// assert_eq!(format_time(90.5),   "01:30:15");
/// assert_eq!(format_time(-2.0),   "00:00:00");
/// ```
pub fn format_time(s: f64) -> String {
    let s  = s.max(0.0);
    let m  = (s / 60.0) as u32;
    let sc = (s % 60.0) as u32;
    let fr = ((s * 30.0) as u32) % 30;
    format!("{m:02}:{sc:02}:{fr:02}")
}

/// Compact duration for summaries: `4.2s` under a minute, then `M:SS`,
/// then `H:MM:SS`. Negative input reads as zero.
///
/// ```
/// use darkframe_core::helpers::time::format_duration;
/// assert_eq!(format_duration(4.2),    "4.2s");
/// assert_eq!(format_duration(187.0),  "3:07");
/// assert_eq!(format_duration(3875.0), "1:04:35");
/// assert_eq!(format_duration(-1.0),   "0.0s");
/// ```
pub fn format_duration(secs: f64) -> String {
    let secs = secs.max(0.0);
    if secs < 60.0 {
        return format!("{secs:.1}s");
    }
    let total = secs as u64;
    let (h, m, s) = (total / 3600, total / 60 % 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Seconds with millisecond precision, the form ffmpeg's `-ss` / `-to` take.
///
/// ```
/// use darkframe_core::helpers::time::ffmpeg_seconds;
/// assert_eq!(ffmpeg_seconds(4.0),     "4.000");
/// assert_eq!(ffmpeg_seconds(0.12345), "0.123");
/// ```
pub fn ffmpeg_seconds(s: f64) -> String {
    format!("{:.3}", s.max(0.0))
}
