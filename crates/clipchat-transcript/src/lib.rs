pub mod error;
pub mod fetcher;
pub mod source;
pub mod youtube;

pub use error::{Result, TranscriptError};
pub use fetcher::{context_window, TranscriptFetcher, FALLBACK_SEGMENTS, WINDOW_SECONDS};
pub use source::CaptionSource;
pub use youtube::YouTubeCaptionSource;
