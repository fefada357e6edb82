//! Gemini provider implementation
//!
//! Talks to either the Generative Language API (API key) or Vertex AI
//! (Application Default Credentials) and implements [`LlmProvider`].
//!
//! [`LlmProvider`]: crate::llm::LlmProvider

pub mod client;
pub mod mapper;
pub mod types;

pub use client::{GeminiClient, GeminiConfig, GeminiEndpoint, GeminiModel};
