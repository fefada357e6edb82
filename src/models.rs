// Request and response bodies of the HTTP API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{ChatMessage, Session};

// Request Types
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub attachment_url: Option<String>,
}

// Response Types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMessagesResponse {
    pub session_id: Uuid,
    pub messages: Vec<ChatMessage>,
}

/// Body of every error reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
