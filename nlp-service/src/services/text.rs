//! Text operations on top of a [`TextProvider`].
//!
//! Each operation makes exactly one upstream call. Structured operations ask
//! for strict JSON, then deserialize and check it locally; anything that does
//! not fit the target type is reported as malformed output.

use crate::models::{StructuredOutput, TextAnalysis, TicketClassification};
use crate::services::metrics;
use crate::services::providers::{
    FinishReason, GenerationParams, OutputSchema, ProviderError, ProviderResponse, TextProvider,
};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

const TICKET_SYSTEM_PROMPT: &str = "\
You triage customer support tickets for an e-commerce platform.
Classify the ticket into exactly one category, rate its urgency and the customer's sentiment, \
list concrete details (order numbers, product names, account identifiers) as key_information, \
and propose one short, actionable next step as suggested_action.
Base every field only on the ticket text. Lower the confidence score when the ticket is ambiguous.";

const ANALYZE_SYSTEM_PROMPT: &str = "\
Analyze the user's text. Report its overall sentiment, its main topics (most prominent first), \
the ISO 639-1 code of its dominant language, and a one-sentence summary.";

const SUMMARIZE_SYSTEM_PROMPT: &str = "\
Summarize the user's text faithfully. Do not add information that is not in the text.";

#[derive(Debug, Error)]
pub enum TextServiceError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Provider returned no content")]
    EmptyOutput,

    #[error("Provider output does not match the {schema} schema: {reason}")]
    MalformedOutput {
        schema: &'static str,
        reason: String,
    },
}

impl From<TextServiceError> for AppError {
    fn from(err: TextServiceError) -> Self {
        match err {
            TextServiceError::Provider(ProviderError::Timeout) => {
                AppError::GatewayTimeout("Upstream model did not respond in time".to_string())
            }
            TextServiceError::Provider(ProviderError::NotConfigured(_)) => {
                AppError::ServiceUnavailable
            }
            TextServiceError::Provider(ProviderError::RateLimited) => {
                AppError::BadGateway("Upstream model rate limited the request".to_string())
            }
            TextServiceError::Provider(ProviderError::ContentFiltered) => {
                AppError::BadGateway("Upstream model refused the content".to_string())
            }
            TextServiceError::Provider(_) => {
                AppError::BadGateway("Upstream model request failed".to_string())
            }
            TextServiceError::EmptyOutput | TextServiceError::MalformedOutput { .. } => {
                AppError::BadGateway(
                    "Upstream model returned output that does not match the expected schema"
                        .to_string(),
                )
            }
        }
    }
}

/// Free-text completion with usage accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub model: String,
    pub finish_reason: FinishReason,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Clone)]
pub struct TextService {
    provider: Arc<dyn TextProvider>,
}

impl TextService {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    /// Classify a support ticket into the fixed category set.
    pub async fn classify_ticket(
        &self,
        text: &str,
    ) -> Result<TicketClassification, TextServiceError> {
        self.structured("classify_ticket", TICKET_SYSTEM_PROMPT, text)
            .await
    }

    pub async fn analyze(&self, text: &str) -> Result<TextAnalysis, TextServiceError> {
        self.structured("analyze", ANALYZE_SYSTEM_PROMPT, text).await
    }

    pub async fn summarize(
        &self,
        text: &str,
        max_sentences: u8,
    ) -> Result<Completion, TextServiceError> {
        let system = format!(
            "{} Use at most {} sentence(s).",
            SUMMARIZE_SYSTEM_PROMPT, max_sentences
        );
        let params = GenerationParams {
            temperature: Some(0.2),
            ..Default::default()
        };

        let response = self.call("summarize", Some(&system), text, &params).await?;
        completion(response)
    }

    pub async fn generate(
        &self,
        prompt: &str,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<Completion, TextServiceError> {
        let params = GenerationParams {
            temperature,
            max_tokens,
            output_schema: None,
        };

        let response = self.call("generate", None, prompt, &params).await?;
        completion(response)
    }

    async fn structured<T: StructuredOutput>(
        &self,
        operation: &'static str,
        system: &str,
        text: &str,
    ) -> Result<T, TextServiceError> {
        let params = GenerationParams {
            temperature: Some(0.0),
            max_tokens: None,
            output_schema: Some(OutputSchema {
                name: T::SCHEMA_NAME.to_string(),
                schema: T::json_schema(),
            }),
        };

        let response = self.call(operation, Some(system), text, &params).await?;
        let raw = response
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or(TextServiceError::EmptyOutput)?;

        let parsed: T = serde_json::from_str(&raw).map_err(|e| {
            tracing::warn!(operation, error = %e, "Structured output failed to parse");
            TextServiceError::MalformedOutput {
                schema: T::SCHEMA_NAME,
                reason: e.to_string(),
            }
        })?;

        parsed.check().map_err(|reason| {
            tracing::warn!(operation, %reason, "Structured output failed validation");
            TextServiceError::MalformedOutput {
                schema: T::SCHEMA_NAME,
                reason,
            }
        })?;

        Ok(parsed)
    }

    async fn call(
        &self,
        operation: &'static str,
        system: Option<&str>,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, TextServiceError> {
        let start = Instant::now();
        let result = self.provider.generate(system, prompt, params).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(response) => {
                metrics::record_provider_call(operation, "ok", elapsed);
                metrics::record_tokens(operation, response.input_tokens, response.output_tokens);
                tracing::debug!(
                    operation,
                    model = %response.model,
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Provider call completed"
                );
            }
            Err(e) => {
                metrics::record_provider_call(operation, error_kind(e), elapsed);
                tracing::error!(operation, error = %e, "Provider call failed");
            }
        }

        Ok(result?)
    }
}

fn completion(response: ProviderResponse) -> Result<Completion, TextServiceError> {
    let text = response
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or(TextServiceError::EmptyOutput)?;

    Ok(Completion {
        text,
        model: response.model,
        finish_reason: response.finish_reason,
        input_tokens: response.input_tokens,
        output_tokens: response.output_tokens,
    })
}

fn error_kind(error: &ProviderError) -> &'static str {
    match error {
        ProviderError::NotConfigured(_) => "not_configured",
        ProviderError::ApiError(_) => "api_error",
        ProviderError::Unauthorized(_) => "unauthorized",
        ProviderError::InvalidRequest(_) => "invalid_request",
        ProviderError::RateLimited => "rate_limited",
        ProviderError::ContentFiltered => "content_filtered",
        ProviderError::Timeout => "timeout",
        ProviderError::NetworkError(_) => "network_error",
        ProviderError::InvalidResponse(_) => "invalid_response",
    }
}
