//! General-purpose text analysis.

use super::{enum_schema, CustomerSentiment, StructuredOutput};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextAnalysis {
    /// Same scale as ticket classification.
    pub sentiment: CustomerSentiment,
    /// Main subjects of the text, most prominent first.
    pub topics: Vec<String>,
    /// ISO 639-1 code of the dominant language.
    #[schema(example = "en")]
    pub language: String,
    /// One-sentence gist.
    pub summary: String,
}

impl StructuredOutput for TextAnalysis {
    const SCHEMA_NAME: &'static str = "text_analysis";

    fn json_schema() -> serde_json::Value {
        let sentiments: Vec<&str> = CustomerSentiment::ALL.iter().map(|s| s.as_str()).collect();

        json!({
            "type": "object",
            "properties": {
                "sentiment": enum_schema(&sentiments),
                "topics": { "type": "array", "items": { "type": "string" } },
                "language": { "type": "string" },
                "summary": { "type": "string" }
            },
            "required": ["sentiment", "topics", "language", "summary"],
            "additionalProperties": false
        })
    }

    fn check(&self) -> Result<(), String> {
        if self.language.trim().is_empty() {
            return Err("language must not be empty".to_string());
        }
        Ok(())
    }
}
