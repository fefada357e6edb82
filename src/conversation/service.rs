use std::sync::Arc;

use tracing::instrument;

use crate::llm::{GenerateRequest, LlmProvider, Message};
use crate::store::{ChatMessage, ChatStore, NewMessage, Role};

use super::error::ConversationError;
use super::types::{session_title, ConversationOutcome, ConversationRequest, UserMessage};

/// Runs a chat turn: persist the user message, ask the model, persist the reply
#[derive(Clone)]
pub struct ConversationService {
    store: Arc<dyn ChatStore>,
    model: Arc<dyn LlmProvider>,
}

impl ConversationService {
    pub fn new(store: Arc<dyn ChatStore>, model: Arc<dyn LlmProvider>) -> Self {
        Self { store, model }
    }

    pub fn store(&self) -> &Arc<dyn ChatStore> {
        &self.store
    }

    /// Handle one user message
    ///
    /// Steps run strictly in order and stop at the first failure. Nothing written
    /// before a failure is undone, so a failed model call leaves the user message
    /// (and a new session) behind without a reply.
    ///
    /// # Errors
    ///
    /// * `ConversationError::InvalidRequest` - blank user id or message; nothing is written
    /// * `ConversationError::Store` - any store failure, unchanged
    /// * `ConversationError::Model` - any model failure, unchanged
    #[instrument(
        skip(self, request),
        fields(user_id = %request.user_id, session_id = ?request.session_id)
    )]
    pub async fn handle_conversation(
        &self,
        request: ConversationRequest,
    ) -> Result<ConversationOutcome, ConversationError> {
        let ConversationRequest {
            user_id,
            message,
            session_id,
            attachment_url,
        } = request;

        if user_id.trim().is_empty() {
            return Err(ConversationError::InvalidRequest("user id is required".to_string()));
        }
        if message.trim().is_empty() {
            return Err(ConversationError::InvalidRequest("message is required".to_string()));
        }
        if let Some(url) = &attachment_url {
            tracing::debug!(attachment_url = %url, "attachment accepted, not forwarded");
        }

        let session_id = match session_id {
            Some(id) => id,
            None => {
                let session = self
                    .store
                    .create_session(&user_id, &session_title(&message))
                    .await?;
                tracing::info!(session_id = %session.id, "started chat session");
                session.id
            }
        };

        self.store
            .create_message(NewMessage::new(session_id, &user_id, Role::User, &message))
            .await?;

        let history = self.store.get_messages(session_id, &user_id).await?;
        let request = GenerateRequest::new(to_model_history(&history), &message);

        let reply = self.model.generate(request).await?;

        let model_message = self
            .store
            .create_message(NewMessage::new(session_id, &user_id, Role::Model, &reply.text))
            .await?;

        tracing::info!(
            %session_id,
            history_len = history.len(),
            reply_len = reply.text.len(),
            "conversation turn complete"
        );

        Ok(ConversationOutcome {
            response: reply.text,
            session_id,
            user_message: UserMessage {
                role: Role::User,
                content: message,
            },
            model_message,
        })
    }
}

/// Stored messages in the model gateway's role/text shape
pub fn to_model_history(messages: &[ChatMessage]) -> Vec<Message> {
    messages
        .iter()
        .map(|m| match m.role {
            Role::User => Message::user(m.content.as_str()),
            Role::Model => Message::model(m.content.as_str()),
        })
        .collect()
}
