//! OpenAI chat-completions integration
//!
//! Reads title, author and ISBN off a cover photograph using a multimodal
//! model. The answer is untrusted and only used to query the catalog.
//!
//! API docs: https://platform.openai.com/docs/api-reference/chat

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_candidate_fields;
pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiClient};
