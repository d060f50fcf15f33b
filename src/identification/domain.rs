//! Internal domain models for book identification.
//!
//! These types are OUR types - they don't change when external APIs change.
//! All external API responses get converted into these types via adapters.

/// Bibliographic guesses read off a cover by the inference service.
///
/// Unverified and possibly hallucinated. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFields {
    pub title: String,
    pub author: String,
    pub isbn: String,
}

/// Best match returned by the metadata catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRecord {
    pub title: String,
    /// All authors, joined with ", "
    pub author: String,
    pub isbn: String,
    pub publisher: String,
    /// Publication year (0 if unknown)
    pub year: i32,
    pub cover_url: String,
}

/// Final merged output of the identification pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciledRecord {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publisher: String,
    pub year: i32,
    pub cover_url: String,
}

impl ReconciledRecord {
    /// A record counts as identified when title, author or isbn is known.
    pub fn is_identified(&self) -> bool {
        !self.title.is_empty() || !self.author.is_empty() || !self.isbn.is_empty()
    }
}

/// Query sent to the metadata catalog, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupQuery {
    Isbn(String),
    TitleAuthor { title: String, author: String },
    Title(String),
}

impl LookupQuery {
    /// Pick the most specific query the inputs allow.
    ///
    /// Empty strings count as absent. Returns `None` when nothing usable was
    /// given, in which case no lookup should be made at all.
    pub fn build(isbn: Option<&str>, title: Option<&str>, author: Option<&str>) -> Option<Self> {
        let present = |s: Option<&str>| s.filter(|v| !v.is_empty()).map(str::to_string);

        match (present(isbn), present(title), present(author)) {
            (Some(isbn), _, _) => Some(Self::Isbn(isbn)),
            (None, Some(title), Some(author)) => Some(Self::TitleAuthor { title, author }),
            (None, Some(title), None) => Some(Self::Title(title)),
            _ => None,
        }
    }

    /// Build a query from inference output
    pub fn from_candidates(fields: &CandidateFields) -> Option<Self> {
        Self::build(
            Some(fields.isbn.as_str()),
            Some(fields.title.as_str()),
            Some(fields.author.as_str()),
        )
    }

    /// Render the catalog's `q` search parameter
    pub fn to_search_term(&self) -> String {
        match self {
            Self::Isbn(isbn) => format!("isbn:{}", isbn),
            Self::TitleAuthor { title, author } => {
                format!("intitle:\"{}\" inauthor:\"{}\"", title, author)
            }
            Self::Title(title) => format!("intitle:\"{}\"", title),
        }
    }

    /// ISBN the query was built from, used when the match carries none
    pub fn isbn(&self) -> Option<&str> {
        match self {
            Self::Isbn(isbn) => Some(isbn),
            _ => None,
        }
    }
}

/// Result of a catalog lookup, keeping failure causes apart for logging.
#[derive(Debug)]
pub enum LookupOutcome {
    Found(CatalogRecord),
    NotFound,
    Failed(ServiceError),
}

impl LookupOutcome {
    /// Collapse to the view the reconciliation engine works with.
    ///
    /// Failures are logged and treated exactly like "no match".
    pub fn into_record(self) -> Option<CatalogRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound => None,
            Self::Failed(e) => {
                tracing::warn!("Catalog lookup failed, continuing without it: {}", e);
                None
            }
        }
    }
}

/// Errors raised while talking to an external service.
///
/// None of these reach callers of the pipeline; they are absorbed at the
/// component boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Terminal failures of one identification run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentificationError {
    #[error("cover not interpretable")]
    CoverNotInterpretable,

    #[error("book not identified, no reliable data found")]
    BookNotIdentified,
}
