use thiserror::Error;

use crate::llm::LlmError;
use crate::store::StoreError;

/// Failure of a conversation turn
///
/// Store and model failures are passed through untouched.
#[derive(Debug, Error)]
pub enum ConversationError {
    /// Rejected before any side effect
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Model(#[from] LlmError),
}
