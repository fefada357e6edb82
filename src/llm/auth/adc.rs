//! Application Default Credentials for Vertex AI

use gcp_auth::AuthenticationManager as GcpAuthManager;

use crate::llm::core::error::LlmError;

const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Access-token source backed by `gcp_auth`
///
/// Credentials are discovered the standard way (`GOOGLE_APPLICATION_CREDENTIALS`,
/// gcloud user credentials, or the metadata server). Tokens are cached and refreshed
/// by `gcp_auth`.
pub struct AdcTokenSource {
    inner: GcpAuthManager,
}

impl AdcTokenSource {
    /// Discover credentials
    ///
    /// # Errors
    /// Returns an error if no valid credentials can be found.
    pub async fn discover() -> Result<Self, LlmError> {
        let inner = GcpAuthManager::new()
            .await
            .map_err(|e| {
                LlmError::AuthenticationError(format!("Failed to initialize ADC: {}", e))
            })?;

        Ok(Self { inner })
    }

    /// Access token for the cloud-platform scope
    pub async fn access_token(&self) -> Result<String, LlmError> {
        let token = self
            .inner
            .get_token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .map_err(|e| LlmError::AuthenticationError(format!("Failed to get token: {}", e)))?;

        Ok(token.as_str().to_string())
    }
}
