//! Mapping between gateway types and Gemini types

use crate::llm::core::{
    config::GenerationConfig,
    error::LlmError,
    types::{FinishReason, GenerateRequest, GenerateResponse, Message, UsageMetadata},
};

use super::types::{
    Content, GeminiGenerationConfig, GenerateContentRequest, GenerateContentResponse, Part,
    SystemInstruction,
};

/// Finish reasons for which the candidate carries no usable text
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "LANGUAGE",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// Build the wire request: history first, then the new message as a user turn
pub fn to_gemini_request(
    request: GenerateRequest,
    config: &GenerationConfig,
    system: Option<&str>,
) -> GenerateContentRequest {
    let mut contents: Vec<Content> = request.history.into_iter().map(to_gemini_content).collect();
    contents.push(to_gemini_content(Message::user(request.message)));

    GenerateContentRequest {
        contents,
        system_instruction: system.map(|s| SystemInstruction {
            parts: vec![Part::text(s)],
        }),
        generation_config: (!config.is_empty()).then(|| to_gemini_generation_config(config)),
    }
}

fn to_gemini_content(message: Message) -> Content {
    Content {
        role: message.role.as_str().to_string(),
        parts: vec![Part::text(message.text)],
    }
}

fn to_gemini_generation_config(config: &GenerationConfig) -> GeminiGenerationConfig {
    GeminiGenerationConfig {
        max_output_tokens: config.max_tokens,
        temperature: config.temperature,
        top_p: config.top_p,
        top_k: config.top_k,
    }
}

/// Extract the reply from a `generateContent` response
///
/// The reply is the concatenation of the first candidate's text parts.
pub fn from_gemini_response(
    response: GenerateContentResponse,
) -> Result<GenerateResponse, LlmError> {
    let usage = response.usage_metadata.as_ref().map(|u| UsageMetadata {
        input_tokens: u.prompt_token_count,
        output_tokens: u.candidates_token_count,
        total_tokens: u.total_token_count,
    });

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(LlmError::Blocked { reason });
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if BLOCKING_FINISH_REASONS.contains(&reason) {
            return Err(LlmError::Blocked {
                reason: reason.to_string(),
            });
        }
    }

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(GenerateResponse {
        text,
        finish_reason: candidate.finish_reason.as_deref().map(map_finish_reason),
        usage,
    })
}

fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::MaxTokens,
        "SAFETY" => FinishReason::Safety,
        other => FinishReason::Other(other.to_string()),
    }
}
