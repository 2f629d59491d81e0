//! Timestamp and transcript rendering helpers.
//!
//! One rule everywhere: `MM:SS` (both zero-padded) under an hour,
//! `H:MM:SS` (hours unpadded) from one hour up. The model is instructed to
//! answer with the same format, so the rendered transcript and the prompt
//! examples must agree.

use crate::transcript::CaptionSegment;

/// Format a position in seconds as `MM:SS` or `H:MM:SS`.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Render a transcript as one `[<timestamp>] <text>` line per segment,
/// newline-joined, in segment order.
pub fn render_transcript(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .map(|segment| format!("[{}] {}", format_timestamp(segment.start), segment.text))
        .collect::<Vec<_>>()
        .join("\n")
}
