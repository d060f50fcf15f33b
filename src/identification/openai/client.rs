//! OpenAI HTTP client for cover reading
//!
//! Sends one chat-completions request per cover with the image inlined as a
//! base64 `data:` URL. Generation is deterministic (temperature 0) and the
//! system prompt forbids inventing data.

use base64::Engine;

use super::{adapter, dto};
use crate::identification::domain::{CandidateFields, ServiceError};

/// Default API root (the `/chat/completions` path is appended)
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Vision-capable model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

const SYSTEM_PROMPT: &str = r#"You are an assistant for a library cataloguing system.
Your task is to read the cover of a book (if there is one) and return structured data.
IMPORTANT:
- If you are not sure about a field, leave it empty.
- DO NOT invent data.
- Respond only with valid JSON, no extra text.

Exact structure:
{
  "titulo": string,
  "autor": string,
  "isbn": string
}"#;

const USER_PROMPT: &str = "Analyze this image and return the book's details if possible.";

/// OpenAI API client
pub struct OpenAiClient {
    api_key: String,
    model: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Create a new client with the given API key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Create a client against an OpenAI-compatible endpoint
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            api_key: api_key.into(),
            model: model.into(),
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Read candidate title, author and ISBN from a cover image
    pub async fn extract_from_cover(&self, image: &[u8]) -> Result<CandidateFields, ServiceError> {
        let response = self.send_chat_request(&self.build_request(image)).await?;
        let content = adapter::message_content(response)?;
        adapter::to_candidate_fields(&content)
    }

    fn build_request(&self, image: &[u8]) -> dto::ChatRequest {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);

        dto::ChatRequest {
            model: self.model.clone(),
            temperature: 0.0,
            messages: vec![
                dto::ChatMessage {
                    role: "system".to_string(),
                    content: dto::MessageContent::Text(SYSTEM_PROMPT.to_string()),
                },
                dto::ChatMessage {
                    role: "user".to_string(),
                    content: dto::MessageContent::Parts(vec![
                        dto::ContentPart::Text {
                            text: USER_PROMPT.to_string(),
                        },
                        dto::ContentPart::ImageUrl {
                            image_url: dto::ImageUrl {
                                url: format!("data:image/jpeg;base64,{}", encoded),
                            },
                        },
                    ]),
                },
            ],
        }
    }

    /// Send the HTTP request and parse the response envelope
    async fn send_chat_request(
        &self,
        request: &dto::ChatRequest,
    ) -> Result<dto::ChatResponse, ServiceError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model = %self.model, "Sending cover to inference service");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<dto::ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<dto::ChatResponse>()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }
}
