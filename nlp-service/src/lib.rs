pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use service_core::middleware::API_KEY_HEADER;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

pub use startup::{build_router, AppState, Application};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::tickets::classify_ticket,
        handlers::text::analyze,
        handlers::text::summarize,
        handlers::text::generate,
    ),
    components(
        schemas(
            dtos::ErrorResponse,
            dtos::TicketRequest,
            dtos::AnalyzeRequest,
            dtos::SummarizeRequest,
            dtos::SummarizeResponse,
            dtos::GenerateRequest,
            dtos::GenerateResponse,
            dtos::TokenUsage,
            models::TicketClassification,
            models::TicketCategory,
            models::TicketUrgency,
            models::CustomerSentiment,
            models::TextAnalysis,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Tickets", description = "Customer support ticket classification"),
        (name = "Text", description = "Generation, analysis and summarization"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}
