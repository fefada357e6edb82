//! Model gateway
//!
//! A provider-neutral request/response shape for chat replies, and a Gemini
//! implementation of it.

pub mod auth;
pub mod core;
pub mod gemini;

// Re-export commonly used types
pub use core::{
    config::GenerationConfig,
    error::LlmError,
    provider::LlmProvider,
    types::{FinishReason, GenerateRequest, GenerateResponse, Message, MessageRole, UsageMetadata},
};
