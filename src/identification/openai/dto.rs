//! OpenAI chat-completions Data Transfer Objects
//!
//! Request and response shapes for `POST /v1/chat/completions`, plus the
//! JSON object the model is instructed to answer with.
//! DO NOT use these types outside the openai module - convert to domain types.
//!
//! API Reference: https://platform.openai.com/docs/api-reference/chat/create

use serde::{Deserialize, Deserializer, Serialize};

/// Chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

/// One message in the conversation
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

/// Plain text, or a list of text/image parts for multimodal input
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// Image reference; we always send a `data:` URL
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Null when the model refuses or calls a tool
    pub content: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

/// The JSON object the model is asked to produce.
///
/// Key names are part of the prompt contract and must not change. Models
/// sometimes answer an ISBN as a bare number, so scalar values are accepted
/// and turned into text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CoverFields {
    #[serde(deserialize_with = "scalar_as_string")]
    pub titulo: Option<String>,
    #[serde(deserialize_with = "scalar_as_string")]
    pub autor: Option<String>,
    #[serde(deserialize_with = "scalar_as_string")]
    pub isbn: Option<String>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        // Null, arrays and objects carry no usable field
        _ => None,
    })
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
