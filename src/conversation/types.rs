use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{ChatMessage, Role};

/// Number of characters of the first message used as a session title
pub const SESSION_TITLE_CHARS: usize = 30;

/// Title of a session started by `message`
pub fn session_title(message: &str) -> String {
    message.chars().take(SESSION_TITLE_CHARS).collect()
}

/// One user turn to run through the model
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRequest {
    pub user_id: String,
    pub message: String,
    /// Continue this session; a new one is started when absent
    pub session_id: Option<Uuid>,
    /// Accepted and logged, not forwarded to the model
    pub attachment_url: Option<String>,
}

impl ConversationRequest {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
            session_id: None,
            attachment_url: None,
        }
    }

    pub fn in_session(mut self, session_id: Uuid) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn with_attachment(mut self, url: impl Into<String>) -> Self {
        self.attachment_url = Some(url.into());
        self
    }
}

/// The user's message echoed back as sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub role: Role,
    pub content: String,
}

/// Result of a conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationOutcome {
    /// Reply text
    pub response: String,
    pub session_id: Uuid,
    pub user_message: UserMessage,
    /// The reply as persisted
    pub model_message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_session_title_short_message_unchanged() {
        assert_eq!(session_title("Hello world"), "Hello world");
    }

    #[test]
    fn test_session_title_truncates_to_thirty_chars() {
        let message = "abcdefghijklmnopqrstuvwxyz0123456789";
        assert_eq!(session_title(message), "abcdefghijklmnopqrstuvwxyz0123");
    }

    #[test]
    fn test_session_title_counts_chars_not_bytes() {
        let message = "é".repeat(40);
        let title = session_title(&message);
        assert_eq!(title.chars().count(), 30);
        assert_eq!(title, "é".repeat(30));
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let session_id = Uuid::new_v4();
        let outcome = ConversationOutcome {
            response: "Hi!".to_string(),
            session_id,
            user_message: UserMessage {
                role: Role::User,
                content: "Hello".to_string(),
            },
            model_message: ChatMessage {
                id: Uuid::new_v4(),
                session_id,
                user_id: "u1".to_string(),
                role: Role::Model,
                content: "Hi!".to_string(),
                created_at: Utc::now(),
            },
        };

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["response"], "Hi!");
        assert_eq!(value["sessionId"], session_id.to_string());
        assert_eq!(value["userMessage"]["role"], "user");
        assert_eq!(value["userMessage"]["content"], "Hello");
        assert_eq!(value["modelMessage"]["role"], "model");
    }
}
