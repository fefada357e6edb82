//! Core types for the model gateway

use serde::{Deserialize, Serialize};

/// Request to generate a chat reply
///
/// `history` is the conversation so far, oldest first. `message` is the new user
/// turn; providers append it after the history when building their wire request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Conversation history
    pub history: Vec<Message>,
    /// New user message
    pub message: String,
}

impl GenerateRequest {
    pub fn new(history: Vec<Message>, message: impl Into<String>) -> Self {
        Self {
            history,
            message: message.into(),
        }
    }
}

/// A single turn in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Text of the turn
    pub text: String,
}

impl Message {
    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
        }
    }

    /// Create a model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Model,
            text: text.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Human input
    User,
    /// Model output
    Model,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Model => "model",
        }
    }
}

/// Generated reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Reply text (concatenated text parts)
    pub text: String,
    /// Why generation stopped, when the provider reports it
    pub finish_reason: Option<FinishReason>,
    /// Token accounting, when the provider reports it
    pub usage: Option<UsageMetadata>,
}

/// Reason why generation finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural completion
    Stop,
    /// Hit token limit
    MaxTokens,
    /// Blocked by safety filters
    Safety,
    /// Provider-specific reason
    Other(String),
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Prompt tokens consumed
    pub input_tokens: u32,
    /// Response tokens generated
    pub output_tokens: u32,
    /// Sum of input and output
    pub total_tokens: u32,
}
