use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One unit of transcribed speech: text plus start time and duration in seconds.
///
/// Segments come back from the captions source ordered by start time; that
/// order is meaningful and preserved everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl CaptionSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Video metadata supplied by the caller (the extension), never fetched here.
///
/// The extension sends whatever it scraped off the watch page; unknown fields
/// are kept so the payload round-trips.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl VideoMetadata {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            extra: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_roundtrips_through_json() {
        let json = r#"{"text":"hello","start":12.4,"duration":3.2}"#;
        let segment: CaptionSegment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.text, "hello");
        assert_eq!(segment.start, 12.4);
        assert_eq!(segment.duration, 3.2);
    }

    #[test]
    fn metadata_tolerates_extra_fields() {
        let json = r#"{"title":"t","description":"d","channel":"c"}"#;
        let meta: VideoMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.title, "t");
        assert_eq!(meta.extra["channel"], "c");
    }

    #[test]
    fn metadata_defaults_missing_fields() {
        let meta: VideoMetadata = serde_json::from_str("{}").unwrap();
        assert!(meta.title.is_empty());
        assert!(meta.description.is_empty());
    }
}
