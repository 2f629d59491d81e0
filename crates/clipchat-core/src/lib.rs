pub mod chat;
pub mod format;
pub mod transcript;

pub use chat::{ChatOptions, ChatRequest, ChatResponse, ChatUsage, Message, Role};
pub use format::{format_timestamp, render_transcript};
pub use transcript::{CaptionSegment, VideoMetadata};
