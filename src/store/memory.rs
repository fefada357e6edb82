use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{
    error::{Result, StoreError},
    gateway::ChatStore,
    types::{ChatMessage, NewMessage, Session},
};

/// Process-local chat store
///
/// Keeps insertion order, which doubles as creation order.
#[derive(Debug, Default)]
pub struct InMemoryChatStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    sessions: Vec<Session>,
    messages: Vec<ChatMessage>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn create_session(&self, user_id: &str, title: &str) -> Result<Session> {
        let session = Session {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            created_at: Utc::now(),
        };
        self.state.write().await.sessions.push(session.clone());
        Ok(session)
    }

    async fn get_session(&self, session_id: Uuid, user_id: &str) -> Result<Session> {
        let state = self.state.read().await;
        state
            .sessions
            .iter()
            .find(|s| s.id == session_id && s.user_id == user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFoundError(format!("chat session {}", session_id)))
    }

    async fn create_message(&self, message: NewMessage) -> Result<ChatMessage> {
        let mut state = self.state.write().await;
        if !state.sessions.iter().any(|s| s.id == message.session_id) {
            return Err(StoreError::NotFoundError(format!(
                "chat session {}",
                message.session_id
            )));
        }

        let stored = ChatMessage {
            id: Uuid::new_v4(),
            session_id: message.session_id,
            user_id: message.user_id,
            role: message.role,
            content: message.content,
            created_at: Utc::now(),
        };
        state.messages.push(stored.clone());
        Ok(stored)
    }

    async fn get_messages(&self, session_id: Uuid, user_id: &str) -> Result<Vec<ChatMessage>> {
        let state = self.state.read().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.session_id == session_id && m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_sessions(&self, user_id: &str) -> Result<Vec<Session>> {
        let state = self.state.read().await;
        Ok(state
            .sessions
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }
}
