//! Request and response bodies of the HTTP API.

use crate::services::text::Completion;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Could not validate API key")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Customer support message to classify.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TicketRequest {
    #[validate(length(min = 10, max = 1000))]
    #[schema(example = "My order #12345 hasn't arrived and it's been two weeks")]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateRequest {
    #[validate(length(min = 1, max = 8000))]
    #[schema(example = "Write a friendly reply confirming a refund")]
    pub prompt: String,
    #[validate(range(min = 1, max = 4096))]
    pub max_tokens: Option<u32>,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AnalyzeRequest {
    #[validate(length(min = 1, max = 8000))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SummarizeRequest {
    #[validate(length(min = 1, max = 8000))]
    pub text: String,
    /// Upper bound on summary length (default 3).
    #[validate(range(min = 1, max = 10))]
    pub max_sentences: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    pub text: String,
    pub model: String,
    #[schema(example = "complete")]
    pub finish_reason: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummarizeResponse {
    pub summary: String,
    pub model: String,
    pub usage: TokenUsage,
}

impl From<&Completion> for TokenUsage {
    fn from(completion: &Completion) -> Self {
        TokenUsage {
            input_tokens: completion.input_tokens,
            output_tokens: completion.output_tokens,
        }
    }
}

impl From<Completion> for GenerateResponse {
    fn from(completion: Completion) -> Self {
        GenerateResponse {
            usage: TokenUsage::from(&completion),
            finish_reason: completion.finish_reason.as_str().to_string(),
            text: completion.text,
            model: completion.model,
        }
    }
}

impl From<Completion> for SummarizeResponse {
    fn from(completion: Completion) -> Self {
        SummarizeResponse {
            usage: TokenUsage::from(&completion),
            summary: completion.text,
            model: completion.model,
        }
    }
}
