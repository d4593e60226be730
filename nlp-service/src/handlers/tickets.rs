use crate::dtos::TicketRequest;
use crate::models::TicketClassification;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

/// Classify a customer support ticket
#[utoipa::path(
    post,
    path = "/classify_ticket",
    request_body = TicketRequest,
    responses(
        (status = 200, description = "Ticket classified", body = TicketClassification),
        (status = 403, description = "Missing or invalid API key", body = ErrorResponse),
        (status = 422, description = "Invalid ticket text", body = ErrorResponse),
        (status = 502, description = "Upstream model failure", body = ErrorResponse),
        (status = 504, description = "Upstream model timeout", body = ErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "Tickets"
)]
pub async fn classify_ticket(
    State(state): State<AppState>,
    Json(req): Json<TicketRequest>,
) -> Result<Json<TicketClassification>, AppError> {
    req.validate()?;

    let result = state.text_service.classify_ticket(&req.text).await?;

    tracing::info!(
        category = %result.category,
        urgency = result.urgency.as_str(),
        confidence = result.confidence,
        "Ticket classified"
    );

    Ok(Json(result))
}
