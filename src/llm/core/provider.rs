//! Provider trait for model gateways

use async_trait::async_trait;
use std::sync::Arc;

use super::{
    error::LlmError,
    types::{GenerateRequest, GenerateResponse},
};

/// Interface every model gateway implementation satisfies
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a reply for `request.message`, given `request.history`
    ///
    /// One round trip per call. Failures are returned as-is; implementations do
    /// not retry.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;
}

#[async_trait]
impl<P: LlmProvider + ?Sized> LlmProvider for Arc<P> {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        (**self).generate(request).await
    }
}
