//! Client for the chat backend's HTTP API
//!
//! Builds JSON and multipart requests against an optional base URL, attaches a
//! bearer token when one is passed, and turns failed responses into an
//! [`ApiError`] carrying the server's message.
//!
//! ```no_run
//! use chat_relay::api_client::{ApiClient, ApiClientConfig, BearerToken, RequestBody};
//! use reqwest::Method;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), chat_relay::api_client::ApiError> {
//! let client = ApiClient::new(ApiClientConfig {
//!     base_url: Some("http://127.0.0.1:3030".to_string()),
//! });
//! let token = BearerToken::new("token");
//!
//! let response = client
//!     .request(
//!         Some(&token),
//!         Method::POST,
//!         "/api/chat",
//!         Some(RequestBody::json(&json!({ "message": "Hello" }))?),
//!     )
//!     .await?;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod url;

pub use client::{
    error_message, ApiClient, ApiClientConfig, BearerToken, ErrorPrefix, RequestBody, UploadFile,
};
pub use error::ApiError;
pub use url::build_url;
