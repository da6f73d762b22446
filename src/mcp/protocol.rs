//! MCP protocol response helpers.

use rmcp::model::CallToolResult;
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

/// Output format for tool responses.
#[derive(Debug, Clone, Copy, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON format (default).
    #[default]
    Json,
    /// TOON (Token-Oriented Object Notation) - 40-60% fewer tokens.
    Toon,
}

/// Tool response wrapper carrying the payload and its output format.
///
/// The payload serializes directly, without wrapping.
pub struct Response<T>(pub T, pub Option<OutputFormat>);

impl<T: Serialize> Serialize for Response<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T: Serialize> From<Response<T>> for Result<CallToolResult, rmcp::model::ErrorData> {
    fn from(response: Response<T>) -> Self {
        match response.1.unwrap_or_default() {
            OutputFormat::Json => Ok(CallToolResult::success(vec![rmcp::model::Content::json(
                serde_json::to_value(&response.0).unwrap(),
            )
            .unwrap()])),
            OutputFormat::Toon => {
                let toon_str = serde_toon::to_string(&response.0)
                    .unwrap_or_else(|e| format!("TOON serialization error: {}", e));
                Ok(CallToolResult::success(vec![rmcp::model::Content::text(
                    toon_str,
                )]))
            }
        }
    }
}
