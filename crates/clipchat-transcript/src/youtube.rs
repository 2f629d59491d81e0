//! Caption source backed by YouTube's caption tracks.

use async_trait::async_trait;
use clipchat_core::transcript::CaptionSegment;
use yt_transcript_rs::YouTubeTranscriptApi;

use crate::error::{Result, TranscriptError};
use crate::source::CaptionSource;

const DEFAULT_LANGUAGES: &[&str] = &["en"];

/// Fetches caption tracks through `yt-transcript-rs`.
///
/// Stateless apart from the underlying HTTP client; one shared instance
/// serves the whole process.
pub struct YouTubeCaptionSource {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YouTubeCaptionSource {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            TranscriptError::unavailable(format!("could not initialize captions client: {}", e))
        })?;

        Ok(Self {
            api,
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Restrict lookups to the given language codes (preference order)
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    fn language_codes(&self) -> Vec<&str> {
        self.languages.iter().map(String::as_str).collect()
    }
}

#[async_trait]
impl CaptionSource for YouTubeCaptionSource {
    async fn manual(&self, video_id: &str) -> Option<Vec<CaptionSegment>> {
        let languages = self.language_codes();

        let list = match self.api.list_transcripts(video_id).await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, video_id, "could not list caption tracks");
                return None;
            }
        };

        let track = match list.find_manually_created_transcript(&languages) {
            Ok(track) => track,
            Err(_) => {
                tracing::debug!(video_id, "no manually-created caption track");
                return None;
            }
        };

        let language = track.language_code.clone();
        match self
            .api
            .fetch_transcript(video_id, &[language.as_str()], false)
            .await
        {
            Ok(fetched) => Some(convert_parts(&fetched)),
            Err(e) => {
                tracing::warn!(error = %e, video_id, "manual caption fetch failed");
                None
            }
        }
    }

    async fn generated(&self, video_id: &str) -> Option<Vec<CaptionSegment>> {
        let languages = self.language_codes();

        // By the time this runs the manual lookup has already failed, so
        // whatever track matches the language preference is the fallback.
        match self.api.fetch_transcript(video_id, &languages, false).await {
            Ok(fetched) => Some(convert_parts(&fetched)),
            Err(e) => {
                tracing::warn!(error = %e, video_id, "generated caption fetch failed");
                None
            }
        }
    }
}

fn convert_parts(fetched: &yt_transcript_rs::FetchedTranscript) -> Vec<CaptionSegment> {
    fetched
        .parts()
        .iter()
        .map(|part| CaptionSegment::new(part.text.clone(), part.start, part.duration))
        .collect()
}
