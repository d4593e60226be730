use crate::dtos::{
    AnalyzeRequest, GenerateRequest, GenerateResponse, SummarizeRequest, SummarizeResponse,
};
use crate::models::TextAnalysis;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

const DEFAULT_SUMMARY_SENTENCES: u8 = 3;

/// Free-form text generation
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated text", body = GenerateResponse),
        (status = 403, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Upstream model failure", body = ErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "Text"
)]
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    req.validate()?;

    let completion = state
        .text_service
        .generate(&req.prompt, req.max_tokens, req.temperature)
        .await?;

    Ok(Json(completion.into()))
}

/// Sentiment, topics and language of a text
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Structured analysis", body = TextAnalysis),
        (status = 403, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Upstream model failure", body = ErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "Text"
)]
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<TextAnalysis>, AppError> {
    req.validate()?;

    let analysis = state.text_service.analyze(&req.text).await?;

    Ok(Json(analysis))
}

/// Summarize a text
#[utoipa::path(
    post,
    path = "/summarize",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary", body = SummarizeResponse),
        (status = 403, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Upstream model failure", body = ErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "Text"
)]
pub async fn summarize(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    req.validate()?;

    let completion = state
        .text_service
        .summarize(
            &req.text,
            req.max_sentences.unwrap_or(DEFAULT_SUMMARY_SENTENCES),
        )
        .await?;

    Ok(Json(completion.into()))
}
