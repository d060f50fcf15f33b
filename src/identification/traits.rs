//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.

use async_trait::async_trait;

use super::domain::{CandidateFields, LookupOutcome, LookupQuery, ServiceError};

/// Trait for reading bibliographic fields off a cover image.
#[async_trait]
pub trait CoverInferenceApi: Send + Sync {
    /// Extract candidate title, author and ISBN from raw image bytes.
    async fn extract_from_cover(&self, image: &[u8]) -> Result<CandidateFields, ServiceError>;
}

/// Trait for bibliographic catalog lookup.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Run a query and return the first match, if any.
    async fn search(&self, query: &LookupQuery) -> LookupOutcome;
}

// Implement traits for real clients

#[async_trait]
impl CoverInferenceApi for super::openai::OpenAiClient {
    async fn extract_from_cover(&self, image: &[u8]) -> Result<CandidateFields, ServiceError> {
        self.extract_from_cover(image).await
    }
}

#[async_trait]
impl CatalogApi for super::googlebooks::GoogleBooksClient {
    async fn search(&self, query: &LookupQuery) -> LookupOutcome {
        self.search(query).await
    }
}
