//! Google Books HTTP client
//!
//! Handles communication with the Google Books `volumes` search endpoint.
//! See: https://developers.google.com/books/docs/v1/using#PerformingSearch
//!
//! Every failure here is reported as [`LookupOutcome::Failed`] rather than an
//! error: a missing catalog match must never stop identification.

use std::time::Duration;

use super::{adapter, dto};
use crate::identification::domain::{LookupOutcome, LookupQuery, ServiceError};

/// Default endpoint for volume searches
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Google Books API client
pub struct GoogleBooksClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    max_results: u32,
}

impl GoogleBooksClient {
    /// Create a new client
    ///
    /// `timeout` bounds every request so a slow catalog cannot stall identification.
    pub fn new(base_url: impl Into<String>, timeout: Duration, max_results: u32) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into(),
            timeout,
            max_results,
        }
    }

    /// Look up a book from whatever identifying fields are available.
    ///
    /// Returns [`LookupOutcome::NotFound`] without touching the network when
    /// neither an ISBN nor a title is given.
    pub async fn lookup(
        &self,
        isbn: Option<&str>,
        title: Option<&str>,
        author: Option<&str>,
    ) -> LookupOutcome {
        match LookupQuery::build(isbn, title, author) {
            Some(query) => self.search(&query).await,
            None => LookupOutcome::NotFound,
        }
    }

    /// Run a prepared query against the catalog
    pub async fn search(&self, query: &LookupQuery) -> LookupOutcome {
        match self.send_search_request(query).await {
            Ok(response) => adapter::to_outcome(response, query),
            Err(e) => LookupOutcome::Failed(e),
        }
    }

    /// Full request URL for a query
    fn search_url(&self, query: &LookupQuery) -> String {
        format!(
            "{}?q={}&maxResults={}",
            self.base_url,
            urlencoding::encode(&query.to_search_term()),
            self.max_results
        )
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(
        &self,
        query: &LookupQuery,
    ) -> Result<dto::VolumesResponse, ServiceError> {
        let url = self.search_url(query);
        tracing::debug!(q = %query.to_search_term(), "Searching catalog");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        response
            .json::<dto::VolumesResponse>()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }
}

impl Default for GoogleBooksClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Duration::from_secs(10), 5)
    }
}
