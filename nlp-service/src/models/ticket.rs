//! Customer support ticket classification.

use super::{enum_schema, StructuredOutput};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

/// Support queue a ticket is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    OrderIssue,
    AccountAccess,
    ProductInquiry,
    TechnicalSupport,
    Billing,
    Other,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 6] = [
        TicketCategory::OrderIssue,
        TicketCategory::AccountAccess,
        TicketCategory::ProductInquiry,
        TicketCategory::TechnicalSupport,
        TicketCategory::Billing,
        TicketCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::OrderIssue => "order_issue",
            TicketCategory::AccountAccess => "account_access",
            TicketCategory::ProductInquiry => "product_inquiry",
            TicketCategory::TechnicalSupport => "technical_support",
            TicketCategory::Billing => "billing",
            TicketCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TicketUrgency {
    Low,
    Medium,
    High,
    Critical,
}

impl TicketUrgency {
    pub const ALL: [TicketUrgency; 4] = [
        TicketUrgency::Low,
        TicketUrgency::Medium,
        TicketUrgency::High,
        TicketUrgency::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketUrgency::Low => "low",
            TicketUrgency::Medium => "medium",
            TicketUrgency::High => "high",
            TicketUrgency::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CustomerSentiment {
    Angry,
    Frustrated,
    Neutral,
    Satisfied,
}

impl CustomerSentiment {
    pub const ALL: [CustomerSentiment; 4] = [
        CustomerSentiment::Angry,
        CustomerSentiment::Frustrated,
        CustomerSentiment::Neutral,
        CustomerSentiment::Satisfied,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerSentiment::Angry => "angry",
            CustomerSentiment::Frustrated => "frustrated",
            CustomerSentiment::Neutral => "neutral",
            CustomerSentiment::Satisfied => "satisfied",
        }
    }
}

/// Structured triage result for one ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TicketClassification {
    pub category: TicketCategory,
    pub urgency: TicketUrgency,
    pub sentiment: CustomerSentiment,
    /// Model's self-reported confidence in the classification.
    #[validate(range(min = 0.0, max = 1.0))]
    #[schema(minimum = 0.0, maximum = 1.0, example = 0.92)]
    pub confidence: f64,
    /// Order numbers, product names and similar details lifted from the ticket.
    pub key_information: Vec<String>,
    #[schema(example = "Look up the order status and share the tracking link")]
    pub suggested_action: String,
}

impl StructuredOutput for TicketClassification {
    const SCHEMA_NAME: &'static str = "ticket_classification";

    fn json_schema() -> serde_json::Value {
        let categories: Vec<&str> = TicketCategory::ALL.iter().map(|c| c.as_str()).collect();
        let urgencies: Vec<&str> = TicketUrgency::ALL.iter().map(|u| u.as_str()).collect();
        let sentiments: Vec<&str> = CustomerSentiment::ALL.iter().map(|s| s.as_str()).collect();

        json!({
            "type": "object",
            "properties": {
                "category": enum_schema(&categories),
                "urgency": enum_schema(&urgencies),
                "sentiment": enum_schema(&sentiments),
                "confidence": { "type": "number" },
                "key_information": { "type": "array", "items": { "type": "string" } },
                "suggested_action": { "type": "string" }
            },
            "required": [
                "category",
                "urgency",
                "sentiment",
                "confidence",
                "key_information",
                "suggested_action"
            ],
            "additionalProperties": false
        })
    }

    fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }
}
