//! Gemini client implementation

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::str::FromStr;
use std::time::Duration;

use crate::llm::auth::{adc::AdcTokenSource, GeminiAuth};
use crate::llm::core::{
    config::GenerationConfig,
    error::LlmError,
    provider::LlmProvider,
    types::{GenerateRequest, GenerateResponse},
};

use super::mapper::{from_gemini_response, to_gemini_request};
use super::types::{ErrorEnvelope, GenerateContentResponse};

const GENERATIVE_LANGUAGE_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini model identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GeminiModel {
    /// Gemini 2.5 Pro
    Gemini25Pro,
    /// Gemini 2.5 Flash
    #[default]
    Gemini25Flash,
    /// Gemini 2.5 Flash Lite
    Gemini25FlashLite,
    /// Any other published model name
    Custom(String),
}

impl GeminiModel {
    /// Get the model identifier string
    pub fn as_str(&self) -> &str {
        match self {
            GeminiModel::Gemini25Pro => "gemini-2.5-pro",
            GeminiModel::Gemini25Flash => "gemini-2.5-flash",
            GeminiModel::Gemini25FlashLite => "gemini-2.5-flash-lite",
            GeminiModel::Custom(name) => name,
        }
    }
}

impl FromStr for GeminiModel {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(LlmError::InvalidRequest("empty model name".to_string()));
        }
        Ok(match name {
            "gemini-2.5-pro" => GeminiModel::Gemini25Pro,
            "gemini-2.5-flash" => GeminiModel::Gemini25Flash,
            "gemini-2.5-flash-lite" => GeminiModel::Gemini25FlashLite,
            other => GeminiModel::Custom(other.to_string()),
        })
    }
}

/// Which Gemini endpoint family to call
#[derive(Clone, PartialEq, Eq)]
pub enum GeminiEndpoint {
    /// Generative Language API authorized with an API key
    ApiKey { api_key: String },
    /// Vertex AI authorized with Application Default Credentials
    Vertex { project_id: String, location: String },
}

impl std::fmt::Debug for GeminiEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeminiEndpoint::ApiKey { .. } => f
                .debug_struct("ApiKey")
                .field("api_key", &"<redacted>")
                .finish(),
            GeminiEndpoint::Vertex {
                project_id,
                location,
            } => f
                .debug_struct("Vertex")
                .field("project_id", project_id)
                .field("location", location)
                .finish(),
        }
    }
}

/// Settings for a [`GeminiClient`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub endpoint: GeminiEndpoint,
    pub model: GeminiModel,
    pub generation: GenerationConfig,
    pub system_instruction: Option<String>,
    /// Replaces the endpoint's base URL (everything before `/models/...`)
    pub base_url_override: Option<String>,
}

impl GeminiConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(GeminiEndpoint::ApiKey {
            api_key: api_key.into(),
        })
    }

    pub fn new(endpoint: GeminiEndpoint) -> Self {
        Self {
            endpoint,
            model: GeminiModel::default(),
            generation: GenerationConfig::default(),
            system_instruction: None,
            base_url_override: None,
        }
    }

    pub fn with_model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    fn base_url(&self) -> String {
        if let Some(base) = &self.base_url_override {
            return base.trim_end_matches('/').to_string();
        }
        match &self.endpoint {
            GeminiEndpoint::ApiKey { .. } => GENERATIVE_LANGUAGE_BASE.to_string(),
            GeminiEndpoint::Vertex {
                project_id,
                location,
            } => format!(
                "https://{}-aiplatform.googleapis.com/v1/projects/{}/locations/{}/publishers/google",
                location, project_id, location
            ),
        }
    }

    /// Full `generateContent` URL for the configured model
    pub fn endpoint_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url(), self.model.as_str())
    }
}

/// Client for Gemini's `generateContent`
pub struct GeminiClient {
    http_client: Client,
    auth: GeminiAuth,
    url: String,
    generation: GenerationConfig,
    system_instruction: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or, for Vertex, if
    /// no Application Default Credentials can be found.
    pub async fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        let auth = match &config.endpoint {
            GeminiEndpoint::ApiKey { api_key } => GeminiAuth::ApiKey(api_key.clone()),
            GeminiEndpoint::Vertex { .. } => GeminiAuth::Adc(AdcTokenSource::discover().await?),
        };

        let url = config.endpoint_url();
        tracing::debug!(url = %url, model = config.model.as_str(), "gemini client ready");

        Ok(Self {
            http_client,
            auth,
            url,
            generation: config.generation,
            system_instruction: config.system_instruction,
        })
    }

    async fn check_status(response: Response) -> Result<Response, LlmError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body = response.text().await.unwrap_or_default();

        Err(map_error_status(status, retry_after, body))
    }
}

/// Classify a failed `generateContent` call
fn map_error_status(status: StatusCode, retry_after: Option<Duration>, body: String) -> LlmError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return LlmError::RateLimitExceeded { retry_after };
    }

    let envelope = serde_json::from_str::<ErrorEnvelope>(&body).ok();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let message = envelope.map(|e| e.error.message).unwrap_or(body);
        return LlmError::AuthenticationError(message);
    }

    match envelope {
        Some(envelope) if !envelope.error.message.is_empty() => LlmError::ProviderError {
            code: if envelope.error.status.is_empty() {
                status.as_u16().to_string()
            } else {
                envelope.error.status
            },
            message: envelope.error.message,
        },
        _ => LlmError::HttpError {
            status: status.as_u16(),
            body,
        },
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let turns = request.history.len() + 1;
        let gemini_request =
            to_gemini_request(request, &self.generation, self.system_instruction.as_deref());

        let builder = self.http_client.post(&self.url).json(&gemini_request);
        let response = self.auth.authorize(builder).await?.send().await?;
        let response = Self::check_status(response).await?;

        let body: GenerateContentResponse = response.json().await?;
        let reply = from_gemini_response(body)?;

        tracing::debug!(
            turns,
            reply_len = reply.text.len(),
            total_tokens = reply.usage.map(|u| u.total_tokens),
            "gemini reply received"
        );

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_model_round_trip_names() {
        assert_eq!(GeminiModel::Gemini25Pro.as_str(), "gemini-2.5-pro");
        assert_eq!(
            "gemini-2.5-flash-lite".parse::<GeminiModel>().unwrap(),
            GeminiModel::Gemini25FlashLite
        );
        assert_eq!(
            "gemini-pro".parse::<GeminiModel>().unwrap(),
            GeminiModel::Custom("gemini-pro".to_string())
        );
        assert!("  ".parse::<GeminiModel>().is_err());
    }

    #[test]
    fn test_api_key_endpoint_url() {
        let config = GeminiConfig::with_api_key("key");
        assert_eq!(
            config.endpoint_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_vertex_endpoint_url() {
        let config = GeminiConfig::new(GeminiEndpoint::Vertex {
            project_id: "my-project".to_string(),
            location: "us-central1".to_string(),
        })
        .with_model(GeminiModel::Gemini25Pro);

        let url = config.endpoint_url();
        assert!(url.starts_with("https://us-central1-aiplatform.googleapis.com/v1/projects/my-project/"));
        assert!(url.ends_with("/publishers/google/models/gemini-2.5-pro:generateContent"));
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let config = GeminiConfig::with_api_key("key").with_base_url("http://127.0.0.1:9000/");
        assert_eq!(
            config.endpoint_url(),
            "http://127.0.0.1:9000/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_map_error_status() {
        let err = map_error_status(
            StatusCode::TOO_MANY_REQUESTS,
            Some(Duration::from_secs(7)),
            String::new(),
        );
        assert!(matches!(
            err,
            LlmError::RateLimitExceeded { retry_after: Some(d) } if d == Duration::from_secs(7)
        ));

        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        let err = map_error_status(StatusCode::BAD_REQUEST, None, body.to_string());
        assert!(matches!(
            err,
            LlmError::ProviderError { ref code, ref message }
                if code == "INVALID_ARGUMENT" && message == "API key not valid"
        ));

        let err = map_error_status(StatusCode::FORBIDDEN, None, "denied".to_string());
        assert!(matches!(err, LlmError::AuthenticationError(m) if m == "denied"));

        let err = map_error_status(StatusCode::BAD_GATEWAY, None, "upstream".to_string());
        assert!(matches!(err, LlmError::HttpError { status: 502, .. }));
    }
}
