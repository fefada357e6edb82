// GET /api/chat/sessions handlers

use std::convert::Infallible;
use uuid::Uuid;
use warp::http::StatusCode;

use super::{error_reply, require_user, status_for_store};
use crate::conversation::ConversationService;
use crate::models::{SessionMessagesResponse, SessionsResponse};

pub async fn list_sessions_handler(
    user_id: Option<String>,
    service: ConversationService,
) -> Result<impl warp::Reply, Infallible> {
    let user_id = match require_user(user_id) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };
    tracing::debug!(%user_id, "GET /api/chat/sessions");

    match service.store().list_sessions(&user_id).await {
        Ok(sessions) => Ok(warp::reply::with_status(
            warp::reply::json(&SessionsResponse { sessions }),
            StatusCode::OK,
        )),
        Err(err) => {
            tracing::error!(error = %err, "listing sessions failed");
            Ok(error_reply(status_for_store(&err), err.to_string()))
        }
    }
}

pub async fn session_messages_handler(
    session_id: Uuid,
    user_id: Option<String>,
    service: ConversationService,
) -> Result<impl warp::Reply, Infallible> {
    let user_id = match require_user(user_id) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };
    tracing::debug!(%user_id, %session_id, "GET /api/chat/sessions/{{id}}/messages");

    let store = service.store();
    let messages = match store.get_session(session_id, &user_id).await {
        Ok(_) => store.get_messages(session_id, &user_id).await,
        Err(err) => Err(err),
    };

    match messages {
        Ok(messages) => Ok(warp::reply::with_status(
            warp::reply::json(&SessionMessagesResponse {
                session_id,
                messages,
            }),
            StatusCode::OK,
        )),
        Err(err) => {
            let status = status_for_store(&err);
            if status.is_server_error() {
                tracing::error!(error = %err, "loading session messages failed");
            }
            Ok(error_reply(status, err.to_string()))
        }
    }
}
