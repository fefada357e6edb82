// Handlers module

pub mod chat;
pub mod rejection;
pub mod sessions;

pub use chat::send_message_handler;
pub use rejection::handle_rejection;
pub use sessions::{list_sessions_handler, session_messages_handler};

use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::conversation::ConversationError;
use crate::llm::LlmError;
use crate::models::ErrorResponse;
use crate::store::StoreError;

/// JSON error reply: `{"error": message}`
pub fn error_reply(status: StatusCode, message: impl Into<String>) -> WithStatus<Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            error: message.into(),
        }),
        status,
    )
}

/// Status code for a failed conversation turn
pub fn status_for(err: &ConversationError) -> StatusCode {
    match err {
        ConversationError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ConversationError::Store(store_err) => status_for_store(store_err),
        ConversationError::Model(LlmError::RateLimitExceeded { .. }) => {
            StatusCode::TOO_MANY_REQUESTS
        }
        ConversationError::Model(_) => StatusCode::BAD_GATEWAY,
    }
}

pub fn status_for_store(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFoundError(_) => StatusCode::NOT_FOUND,
        StoreError::ValidationError(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Caller identity from the `x-user-id` header, set by the upstream auth layer
pub(crate) fn require_user(user_id: Option<String>) -> Result<String, WithStatus<Json>> {
    match user_id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(error_reply(StatusCode::BAD_REQUEST, "missing x-user-id header")),
    }
}
