use chrono::{DateTime, Utc};
use clipchat_core::chat::Message;

/// Accumulating message history for one video.
///
/// Seeding (system prompt + transcript context) happens on the first
/// question and exactly once; after that the history only grows by
/// (user, assistant) pairs. There is no terminal state.
#[derive(Debug, Clone)]
pub struct Session {
    pub video_id: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether the system prompt and transcript context were already added
    pub fn is_seeded(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_unseeded() {
        let session = Session::new("abc123");
        assert!(!session.is_seeded());
        assert!(session.is_empty());
    }

    #[test]
    fn any_message_marks_the_session_seeded() {
        let mut session = Session::new("abc123");
        session.push(Message::system("prompt"));
        assert!(session.is_seeded());
        assert_eq!(session.len(), 1);
    }
}
