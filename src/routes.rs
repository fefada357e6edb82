// Route definitions

use std::convert::Infallible;

use uuid::Uuid;
use warp::Filter;

use crate::conversation::ConversationService;
use crate::handlers;

const MAX_BODY_BYTES: u64 = 64 * 1024;

pub fn configure_routes(
    service: ConversationService,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let chat = warp::path("api").and(warp::path("chat"));
    let user_id = warp::header::optional::<String>("x-user-id");

    // POST /api/chat
    let send_message = chat
        .and(warp::path::end())
        .and(warp::post())
        .and(user_id)
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_service(service.clone()))
        .and_then(handlers::send_message_handler);

    // GET /api/chat/sessions
    let list_sessions = chat
        .and(warp::path("sessions"))
        .and(warp::path::end())
        .and(warp::get())
        .and(user_id)
        .and(with_service(service.clone()))
        .and_then(handlers::list_sessions_handler);

    // GET /api/chat/sessions/{sessionId}/messages
    let session_messages = chat
        .and(warp::path("sessions"))
        .and(warp::path::param::<Uuid>())
        .and(warp::path("messages"))
        .and(warp::path::end())
        .and(warp::get())
        .and(user_id)
        .and(with_service(service))
        .and_then(handlers::session_messages_handler);

    send_message
        .or(list_sessions)
        .or(session_messages)
        .recover(handlers::handle_rejection)
}

fn with_service(
    service: ConversationService,
) -> impl Filter<Extract = (ConversationService,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}
