use thiserror::Error;

/// Transcript retrieval error.
///
/// Everything that can go wrong while fetching captions (video not found,
/// captions disabled, network failure, parse failure) collapses into one
/// variant; callers only care that no transcript could be produced and why.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("failed to get transcript: {reason}")]
    Unavailable { reason: String },
}

impl TranscriptError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TranscriptError>;
