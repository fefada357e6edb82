mod common;

use std::sync::Arc;

use chat_relay::conversation::{ConversationOutcome, ConversationService};
use chat_relay::models::{ErrorResponse, SessionMessagesResponse, SessionsResponse};
use chat_relay::routes::configure_routes;
use common::{RecordingStore, ScriptedModel};
use serde_json::json;
use uuid::Uuid;
use warp::http::StatusCode;

fn service() -> ConversationService {
    ConversationService::new(
        Arc::new(RecordingStore::new()),
        Arc::new(ScriptedModel::replying("Hi there")),
    )
}

fn error_of(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorResponse>(body).unwrap().error
}

// ============================================================================
// happy paths
// ============================================================================

#[tokio::test]
async fn test_post_chat_then_read_history() {
    let routes = configure_routes(service());

    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .header("x-user-id", "u1")
        .json(&json!({ "message": "Hello world" }))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let outcome: ConversationOutcome = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(outcome.response, "Hi there");

    let res = warp::test::request()
        .method("GET")
        .path("/api/chat/sessions")
        .header("x-user-id", "u1")
        .reply(&routes)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let sessions: SessionsResponse = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(sessions.sessions.len(), 1);
    assert_eq!(sessions.sessions[0].id, outcome.session_id);

    let res = warp::test::request()
        .method("GET")
        .path(&format!("/api/chat/sessions/{}/messages", outcome.session_id))
        .header("x-user-id", "u1")
        .reply(&routes)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let history: SessionMessagesResponse = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(history.messages.len(), 2);
}

// ============================================================================
// error statuses
// ============================================================================

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/nope")
        .reply(&configure_routes(service()))
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_of(res.body()), "not found");
}

#[tokio::test]
async fn test_wrong_method_is_method_not_allowed() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/chat")
        .header("x-user-id", "u1")
        .reply(&configure_routes(service()))
        .await;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_missing_user_header_is_bad_request() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .json(&json!({ "message": "Hello" }))
        .reply(&configure_routes(service()))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_of(res.body()), "missing x-user-id header");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .header("x-user-id", "u1")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&configure_routes(service()))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_json_content_type_is_unsupported_media_type() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .header("x-user-id", "u1")
        .header("content-type", "text/plain")
        .body(r#"{"message":"Hello"}"#)
        .reply(&configure_routes(service()))
        .await;

    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(error_of(res.body()), "request body must be application/json");
}

#[tokio::test]
async fn test_missing_content_length_is_length_required() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .header("x-user-id", "u1")
        .header("content-type", "application/json")
        .reply(&configure_routes(service()))
        .await;

    assert_eq!(res.status(), StatusCode::LENGTH_REQUIRED);
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .header("x-user-id", "u1")
        .header("content-type", "application/json")
        .body(vec![b'a'; 70 * 1024])
        .reply(&configure_routes(service()))
        .await;

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let routes = configure_routes(service());

    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .header("x-user-id", "u1")
        .json(&json!({ "message": "Hello", "sessionId": Uuid::new_v4() }))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = warp::test::request()
        .method("GET")
        .path(&format!("/api/chat/sessions/{}/messages", Uuid::new_v4()))
        .header("x-user-id", "u1")
        .reply(&routes)
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_other_users_session_is_not_found() {
    let routes = configure_routes(service());

    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .header("x-user-id", "u1")
        .json(&json!({ "message": "private" }))
        .reply(&routes)
        .await;
    let outcome: ConversationOutcome = serde_json::from_slice(res.body()).unwrap();

    let res = warp::test::request()
        .method("GET")
        .path(&format!("/api/chat/sessions/{}/messages", outcome.session_id))
        .header("x-user-id", "u2")
        .reply(&routes)
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
