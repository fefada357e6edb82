//! Conversation orchestration
//!
//! Ties the chat store and the model gateway together for a single user turn.

pub mod error;
pub mod service;
pub mod types;

pub use error::ConversationError;
pub use service::ConversationService;
pub use types::{session_title, ConversationOutcome, ConversationRequest, UserMessage};
