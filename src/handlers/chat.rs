// POST /api/chat handler

use std::convert::Infallible;
use warp::http::StatusCode;

use super::{error_reply, require_user, status_for};
use crate::conversation::{ConversationRequest, ConversationService};
use crate::models::SendMessageRequest;

pub async fn send_message_handler(
    user_id: Option<String>,
    request: SendMessageRequest,
    service: ConversationService,
) -> Result<impl warp::Reply, Infallible> {
    let user_id = match require_user(user_id) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };
    tracing::info!(%user_id, session_id = ?request.session_id, "POST /api/chat");

    let conversation = ConversationRequest {
        user_id,
        message: request.message,
        session_id: request.session_id,
        attachment_url: request.attachment_url,
    };

    match service.handle_conversation(conversation).await {
        Ok(outcome) => Ok(warp::reply::with_status(
            warp::reply::json(&outcome),
            StatusCode::OK,
        )),
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                tracing::error!(error = %err, "conversation turn failed");
            } else {
                tracing::warn!(error = %err, "conversation turn rejected");
            }
            Ok(error_reply(status, err.to_string()))
        }
    }
}
