//! Credentials for the Gemini endpoints

pub mod adc;

use reqwest::RequestBuilder;

use crate::llm::core::error::LlmError;
use adc::AdcTokenSource;

/// How requests to Gemini are authorized
pub enum GeminiAuth {
    /// Generative Language API key, sent as `x-goog-api-key`
    ApiKey(String),
    /// Vertex AI bearer token from Application Default Credentials
    Adc(AdcTokenSource),
}

impl GeminiAuth {
    /// Attach credentials to an outgoing request
    pub async fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, LlmError> {
        match self {
            GeminiAuth::ApiKey(key) => Ok(builder.header("x-goog-api-key", key)),
            GeminiAuth::Adc(source) => {
                let token = source.access_token().await?;
                Ok(builder.bearer_auth(token))
            }
        }
    }
}

impl std::fmt::Debug for GeminiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeminiAuth::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            GeminiAuth::Adc(_) => f.write_str("Adc"),
        }
    }
}
