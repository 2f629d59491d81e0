//! Transcript retrieval with manual-first fallback and context windowing.

use std::sync::Arc;

use clipchat_core::transcript::CaptionSegment;

use crate::error::{Result, TranscriptError};
use crate::source::CaptionSource;

/// Segments within this many seconds of the requested timestamp make the
/// context window.
pub const WINDOW_SECONDS: f64 = 30.0;

/// When nothing falls inside the window, return this many leading segments
/// instead. Legacy policy: the caller always gets something non-empty when a
/// transcript exists, even if it is unrelated to the timestamp.
pub const FALLBACK_SEGMENTS: usize = 5;

/// Fetches a video's transcript, preferring manually-authored captions.
///
/// One best-effort attempt per source, no retries, no caching.
pub struct TranscriptFetcher {
    source: Arc<dyn CaptionSource>,
}

impl TranscriptFetcher {
    pub fn new(source: Arc<dyn CaptionSource>) -> Self {
        Self { source }
    }

    /// Fetch the transcript for `video_id`, narrowed around `timestamp`
    /// when one is given.
    pub async fn fetch(
        &self,
        video_id: &str,
        timestamp: Option<f64>,
    ) -> Result<Vec<CaptionSegment>> {
        let transcript = match self.source.manual(video_id).await {
            Some(segments) if !segments.is_empty() => segments,
            _ => match self.source.generated(video_id).await {
                Some(segments) if !segments.is_empty() => segments,
                _ => {
                    tracing::info!(video_id, "no captions of either kind found");
                    return Err(TranscriptError::unavailable(
                        "no transcript available for this video",
                    ));
                }
            },
        };

        Ok(match timestamp {
            Some(ts) => context_window(&transcript, ts),
            None => transcript,
        })
    }
}

/// Select the segments whose start time lies within [`WINDOW_SECONDS`] of
/// `timestamp`; fall back to the first [`FALLBACK_SEGMENTS`] segments when
/// none do.
pub fn context_window(transcript: &[CaptionSegment], timestamp: f64) -> Vec<CaptionSegment> {
    let near: Vec<CaptionSegment> = transcript
        .iter()
        .filter(|segment| (segment.start - timestamp).abs() <= WINDOW_SECONDS)
        .cloned()
        .collect();

    if near.is_empty() {
        transcript.iter().take(FALLBACK_SEGMENTS).cloned().collect()
    } else {
        near
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64) -> CaptionSegment {
        CaptionSegment::new(format!("segment at {}", start), start, 4.0)
    }

    #[test]
    fn window_keeps_segments_within_thirty_seconds() {
        let transcript: Vec<_> = (0..10).map(|i| segment(i as f64 * 20.0)).collect();

        let window = context_window(&transcript, 100.0);
        let starts: Vec<f64> = window.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![80.0, 100.0, 120.0]);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let transcript = vec![segment(0.0), segment(30.0), segment(31.0)];
        let window = context_window(&transcript, 0.0);
        let starts: Vec<f64> = window.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0.0, 30.0]);
    }

    #[test]
    fn empty_window_falls_back_to_first_five_segments() {
        let transcript: Vec<_> = (0..8).map(|i| segment(i as f64 * 10.0)).collect();

        let window = context_window(&transcript, 5000.0);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].start, 0.0);
        assert_eq!(window[4].start, 40.0);
    }

    #[test]
    fn short_transcript_fallback_returns_everything() {
        let transcript = vec![segment(0.0), segment(10.0)];
        let window = context_window(&transcript, 5000.0);
        assert_eq!(window.len(), 2);
    }
}
