//! Domain models returned by the structured-output operations.

pub mod analysis;
pub mod ticket;

pub use analysis::TextAnalysis;
pub use ticket::{CustomerSentiment, TicketCategory, TicketClassification, TicketUrgency};

use serde::de::DeserializeOwned;

/// A type the model is asked to produce as strict JSON.
///
/// `json_schema` is sent upstream to constrain decoding; `check` runs after
/// deserialization for constraints the upstream schema dialect cannot express.
pub trait StructuredOutput: DeserializeOwned {
    /// Schema name reported to the provider.
    const SCHEMA_NAME: &'static str;

    fn json_schema() -> serde_json::Value;

    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

/// JSON-schema `enum` of the wire names of a closed set of values.
pub(crate) fn enum_schema(values: &[&str]) -> serde_json::Value {
    serde_json::json!({ "type": "string", "enum": values })
}
