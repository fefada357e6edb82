use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::store::{
    error::Result,
    types::{ChatMessage, NewMessage, Session},
};

/// Storage for chat sessions and their messages
///
/// Each call commits on its own; no transaction spans several calls.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Create a session owned by `user_id`
    async fn create_session(&self, user_id: &str, title: &str) -> Result<Session>;

    /// Append a message to an existing session
    /// Session `session_id` if it is owned by `user_id`, else `NotFoundError`
    async fn get_session(&self, session_id: Uuid, user_id: &str) -> Result<Session>;

    async fn create_message(&self, message: NewMessage) -> Result<ChatMessage>;

    /// Messages of `session_id` belonging to `user_id`, oldest first
    async fn get_messages(&self, session_id: Uuid, user_id: &str) -> Result<Vec<ChatMessage>>;

    /// Sessions owned by `user_id`, newest first
    async fn list_sessions(&self, user_id: &str) -> Result<Vec<Session>>;
}

#[async_trait]
impl<S: ChatStore + ?Sized> ChatStore for Arc<S> {
    async fn create_session(&self, user_id: &str, title: &str) -> Result<Session> {
        (**self).create_session(user_id, title).await
    }

    async fn get_session(&self, session_id: Uuid, user_id: &str) -> Result<Session> {
        (**self).get_session(session_id, user_id).await
    }

    async fn create_message(&self, message: NewMessage) -> Result<ChatMessage> {
        (**self).create_message(message).await
    }

    async fn get_messages(&self, session_id: Uuid, user_id: &str) -> Result<Vec<ChatMessage>> {
        (**self).get_messages(session_id, user_id).await
    }

    async fn list_sessions(&self, user_id: &str) -> Result<Vec<Session>> {
        (**self).list_sessions(user_id).await
    }
}
