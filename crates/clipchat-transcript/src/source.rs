use async_trait::async_trait;
use clipchat_core::transcript::CaptionSegment;

/// A source of caption tracks for a video.
///
/// Both methods are best-effort: `None` means "not available here", whatever
/// the underlying cause. The fetcher decides how to combine the two.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Manually-authored captions, if the video has any
    async fn manual(&self, video_id: &str) -> Option<Vec<CaptionSegment>>;

    /// Auto-generated captions, if the video has any
    async fn generated(&self, video_id: &str) -> Option<Vec<CaptionSegment>>;
}
