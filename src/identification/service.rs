//! Identification service - orchestrates book identification from a cover
//!
//! This is the high-level API for identifying a book:
//! 1. Read candidate fields off the cover (inference service)
//! 2. Look the candidates up in the catalog (Google Books)
//! 3. Merge both, preferring non-empty catalog values
//! 4. Reject the result if nothing identifying survived

use std::time::Duration;

use crate::identification::{
    domain::{CandidateFields, CatalogRecord, IdentificationError, LookupQuery, ReconciledRecord},
    googlebooks::{self, GoogleBooksClient},
    openai::{self, OpenAiClient},
    traits::{CatalogApi, CoverInferenceApi},
};

/// Configuration for the identification service.
///
/// The API key is resolved by the caller (see [`crate::config`]); the service
/// never reads the environment itself.
#[derive(Debug, Clone)]
pub struct IdentificationConfig {
    /// OpenAI API key
    pub openai_api_key: String,
    /// Vision-capable chat model
    pub model: String,
    /// OpenAI-compatible API root
    pub inference_base_url: String,
    /// Google Books volumes endpoint
    pub catalog_base_url: String,
    /// Upper bound on a single catalog request
    pub lookup_timeout: Duration,
    /// Results requested per catalog search (only the first is used)
    pub max_results: u32,
}

impl Default for IdentificationConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            model: openai::DEFAULT_MODEL.to_string(),
            inference_base_url: openai::DEFAULT_BASE_URL.to_string(),
            catalog_base_url: googlebooks::DEFAULT_BASE_URL.to_string(),
            lookup_timeout: Duration::from_secs(10),
            max_results: 5,
        }
    }
}

/// Service for identifying books from cover photographs.
///
/// Holds no per-request state, so one instance can serve concurrent callers.
pub struct IdentificationService<I = OpenAiClient, C = GoogleBooksClient> {
    inference: I,
    catalog: C,
}

impl IdentificationService {
    /// Create a service backed by the real OpenAI and Google Books clients
    pub fn new(config: IdentificationConfig) -> Self {
        Self {
            inference: OpenAiClient::with_base_url(
                config.openai_api_key,
                config.model,
                config.inference_base_url,
            ),
            catalog: GoogleBooksClient::new(
                config.catalog_base_url,
                config.lookup_timeout,
                config.max_results,
            ),
        }
    }
}

impl<I: CoverInferenceApi, C: CatalogApi> IdentificationService<I, C> {
    /// Create a service from any client implementations
    pub fn with_clients(inference: I, catalog: C) -> Self {
        Self { inference, catalog }
    }

    /// Identify a book from the raw bytes of a cover photograph.
    ///
    /// Only two outcomes are errors: the cover could not be read at all, or
    /// neither source produced a title, author or ISBN. Catalog failures are
    /// logged and otherwise ignored.
    pub async fn identify(&self, image: &[u8]) -> Result<ReconciledRecord, IdentificationError> {
        let candidates = match self.inference.extract_from_cover(image).await {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!("Could not read cover: {}", e);
                return Err(IdentificationError::CoverNotInterpretable);
            }
        };
        tracing::debug!(?candidates, "Cover read");

        let catalog = match LookupQuery::from_candidates(&candidates) {
            Some(query) => self.catalog.search(&query).await.into_record(),
            None => {
                tracing::debug!("Nothing usable on the cover, skipping catalog lookup");
                None
            }
        };

        let record = reconcile(&candidates, catalog.as_ref());

        if !record.is_identified() {
            return Err(IdentificationError::BookNotIdentified);
        }

        tracing::info!(
            title = %record.title,
            isbn = %record.isbn,
            catalog_match = catalog.is_some(),
            "Book identified"
        );
        Ok(record)
    }
}

/// Merge inference output with an optional catalog match.
///
/// Title, author and ISBN take the catalog value when it is non-empty and
/// fall back to the inference value otherwise. Publisher, year and cover URL
/// only ever come from the catalog.
pub fn reconcile(candidates: &CandidateFields, catalog: Option<&CatalogRecord>) -> ReconciledRecord {
    let Some(catalog) = catalog else {
        return ReconciledRecord {
            title: candidates.title.clone(),
            author: candidates.author.clone(),
            isbn: candidates.isbn.clone(),
            ..Default::default()
        };
    };

    let prefer = |from_catalog: &str, from_cover: &str| {
        if from_catalog.is_empty() {
            from_cover.to_string()
        } else {
            from_catalog.to_string()
        }
    };

    ReconciledRecord {
        title: prefer(&catalog.title, &candidates.title),
        author: prefer(&catalog.author, &candidates.author),
        isbn: prefer(&catalog.isbn, &candidates.isbn),
        publisher: catalog.publisher.clone(),
        year: catalog.year,
        cover_url: catalog.cover_url.clone(),
    }
}

/// Quick helper to identify a single cover without keeping a service around
pub async fn identify_cover(
    image: &[u8],
    config: IdentificationConfig,
) -> Result<ReconciledRecord, IdentificationError> {
    IdentificationService::new(config).identify(image).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identification::domain::ServiceError;
    use crate::identification::traits::mocks::{MockCatalog, MockInference};

    fn clean_code() -> CatalogRecord {
        CatalogRecord {
            title: "Clean Code".to_string(),
            author: "Robert C. Martin".to_string(),
            isbn: "9780132350884".to_string(),
            publisher: "Prentice Hall".to_string(),
            year: 2008,
            cover_url: "http://books.google.com/thumb".to_string(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = IdentificationConfig::default();
        assert!(config.openai_api_key.is_empty());
        assert_eq!(config.lookup_timeout, Duration::from_secs(10));
        assert_eq!(config.max_results, 5);
    }

    #[tokio::test]
    async fn test_unreadable_cover_skips_catalog() {
        let service = IdentificationService::with_clients(
            MockInference::with_error(ServiceError::Parse("not json".to_string())),
            MockCatalog::with_match(clean_code()),
        );

        let result = service.identify(b"jpeg").await;

        assert_eq!(result, Err(IdentificationError::CoverNotInterpretable));
        assert!(service.catalog.queries().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_on_inference_is_fatal() {
        let service = IdentificationService::with_clients(
            MockInference::with_error(ServiceError::Network("connection reset".to_string())),
            MockCatalog::no_match(),
        );

        assert_eq!(
            service.identify(b"jpeg").await,
            Err(IdentificationError::CoverNotInterpretable)
        );
    }

    #[tokio::test]
    async fn test_catalog_title_wins() {
        let service = IdentificationService::with_clients(
            MockInference::reading("Clean Cod", "", "9780132350884"),
            MockCatalog::with_match(clean_code()),
        );

        let record = service.identify(b"jpeg").await.unwrap();

        assert_eq!(record.title, "Clean Code");
        assert_eq!(record.author, "Robert C. Martin");
        assert_eq!(record.publisher, "Prentice Hall");
        assert_eq!(record.year, 2008);
        assert_eq!(record.cover_url, "http://books.google.com/thumb");
        assert_eq!(
            service.catalog.queries(),
            vec![LookupQuery::Isbn("9780132350884".to_string())]
        );
        assert_eq!(service.inference.calls(), 1);
    }

    #[tokio::test]
    async fn test_title_only_without_match() {
        let service = IdentificationService::with_clients(
            MockInference::reading("Foo", "", ""),
            MockCatalog::no_match(),
        );

        let record = service.identify(b"jpeg").await.unwrap();

        assert_eq!(
            record,
            ReconciledRecord {
                title: "Foo".to_string(),
                ..Default::default()
            }
        );
        assert_eq!(
            service.catalog.queries(),
            vec![LookupQuery::Title("Foo".to_string())]
        );
    }

    #[tokio::test]
    async fn test_blank_cover_is_not_identified() {
        let service = IdentificationService::with_clients(
            MockInference::reading("", "", ""),
            MockCatalog::with_match(clean_code()),
        );

        let result = service.identify(b"jpeg").await;

        assert_eq!(result, Err(IdentificationError::BookNotIdentified));
        assert!(service.catalog.queries().is_empty());
    }

    #[tokio::test]
    async fn test_author_only_is_identified_without_lookup() {
        let service = IdentificationService::with_clients(
            MockInference::reading("", "Ursula K. Le Guin", ""),
            MockCatalog::with_match(clean_code()),
        );

        let record = service.identify(b"jpeg").await.unwrap();

        assert_eq!(record.author, "Ursula K. Le Guin");
        assert!(service.catalog.queries().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_failure_falls_back_to_cover() {
        let service = IdentificationService::with_clients(
            MockInference::reading("Dune", "Frank Herbert", ""),
            MockCatalog::with_error(ServiceError::Network("timed out".to_string())),
        );

        let record = service.identify(b"jpeg").await.unwrap();

        assert_eq!(record.title, "Dune");
        assert_eq!(record.author, "Frank Herbert");
        assert_eq!(record.year, 0);
        assert_eq!(
            service.catalog.queries(),
            vec![LookupQuery::TitleAuthor {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
            }]
        );
    }

    #[test]
    fn test_reconcile_keeps_cover_values_over_empty_catalog_fields() {
        let candidates = CandidateFields {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441172719".to_string(),
        };
        let catalog = CatalogRecord {
            title: "Dune".to_string(),
            publisher: "Ace".to_string(),
            year: 1990,
            ..Default::default()
        };

        let record = reconcile(&candidates, Some(&catalog));

        assert_eq!(record.author, "Frank Herbert");
        assert_eq!(record.isbn, "9780441172719");
        assert_eq!(record.publisher, "Ace");
        assert_eq!(record.year, 1990);
    }

    #[test]
    fn test_reconcile_without_catalog_leaves_publisher_empty() {
        let candidates = CandidateFields {
            title: "Dune".to_string(),
            ..Default::default()
        };

        let record = reconcile(&candidates, None);

        assert_eq!(record.publisher, "");
        assert_eq!(record.year, 0);
        assert_eq!(record.cover_url, "");
    }
}
