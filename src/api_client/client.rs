use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response};
use serde::Serialize;

use super::error::ApiError;
use super::url::build_url;

/// Bearer credential for one request
///
/// Passed explicitly on every call; the client holds no session state.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Body of an outgoing request
pub enum RequestBody {
    /// Serialized as JSON with `Content-Type: application/json`
    Json(serde_json::Value),
    /// Sent as `multipart/form-data`; reqwest sets the boundary header
    Multipart(Form),
}

impl RequestBody {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        Ok(RequestBody::Json(serde_json::to_value(value)?))
    }
}

/// File sent in the `file` field of an upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    fn into_part(self) -> Result<Part, ApiError> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match self.mime_type {
            Some(mime) => Ok(part.mime_str(&mime)?),
            None => Ok(part),
        }
    }
}

/// Settings for an [`ApiClient`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Absolute API origin; `None` or blank means paths are used as given
    pub base_url: Option<String>,
}

impl ApiClientConfig {
    /// Blank `base_url` is stored as `None`
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.filter(|url| !url.trim().is_empty()),
        }
    }

    /// Read `API_BASE_URL` from the environment
    pub fn from_env() -> Self {
        Self::new(std::env::var("API_BASE_URL").ok())
    }
}

/// Which call failed, for the fallback error message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPrefix {
    Api,
    Upload,
}

impl ErrorPrefix {
    fn as_str(&self) -> &'static str {
        match self {
            ErrorPrefix::Api => "API",
            ErrorPrefix::Upload => "Upload",
        }
    }
}

/// HTTP client for the chat backend's API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Option<String>,
}

impl ApiClient {
    pub fn new(config: ApiClientConfig) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    pub fn with_http_client(http: Client, config: ApiClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url,
        }
    }

    /// Target URL for `path`
    pub fn url(&self, path: &str) -> String {
        build_url(self.base_url.as_deref(), path)
    }

    /// Send a request and return the response if its status is a success
    ///
    /// # Errors
    ///
    /// * `ApiError::Status` - non-success status, carrying the server's message
    /// * `ApiError::Transport` - the request never got a response
    pub async fn request(
        &self,
        auth: Option<&BearerToken>,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "api request");

        let mut builder = self.http.request(method, url);
        if let Some(token) = auth {
            builder = builder.bearer_auth(token.as_str());
        }
        builder = match body {
            Some(RequestBody::Json(value)) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(&value)?),
            Some(RequestBody::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        let response = builder.send().await?;
        ensure_success(response, ErrorPrefix::Api).await
    }

    /// Upload a file as multipart form data
    ///
    /// The file goes in the `file` field; each extra field is added as text.
    /// `method` defaults to `POST`.
    pub async fn upload(
        &self,
        auth: Option<&BearerToken>,
        path: &str,
        file: UploadFile,
        extra_fields: Option<&BTreeMap<String, String>>,
        method: Option<Method>,
    ) -> Result<Response, ApiError> {
        let mut form = Form::new().part("file", file.into_part()?);
        for (key, value) in extra_fields.into_iter().flatten() {
            form = form.text(key.clone(), value.clone());
        }

        let method = method.unwrap_or(Method::POST);
        let url = self.url(path);
        tracing::debug!(%method, %url, "api upload");

        let mut builder = self.http.request(method, url).multipart(form);
        if let Some(token) = auth {
            builder = builder.bearer_auth(token.as_str());
        }

        let response = builder.send().await?;
        ensure_success(response, ErrorPrefix::Upload).await
    }
}

async fn ensure_success(response: Response, prefix: ErrorPrefix) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(
        status.as_u16(),
        status.canonical_reason().unwrap_or(""),
        &body,
        prefix,
    );
    tracing::warn!(status = status.as_u16(), %message, "api request failed");

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Message for a failed response
///
/// A JSON body yields its `error` field, else its `message` field (each only if a
/// non-blank string). A body that is not JSON yields its raw text if non-blank.
/// Otherwise the status line is used, e.g. `API Error: 500 Internal Server Error`.
pub fn error_message(status: u16, status_text: &str, body: &str, prefix: ErrorPrefix) -> String {
    let extracted = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(payload) => ["error", "message"].iter().find_map(|field| {
            payload
                .get(field)
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        }),
        Err(_) => Some(body.to_string()).filter(|text| !text.trim().is_empty()),
    };

    extracted.unwrap_or_else(|| {
        format!("{} Error: {} {}", prefix.as_str(), status, status_text)
            .trim()
            .to_string()
    })
}
