//! Book identification - reads a cover photograph and cross-references it
//! against a bibliographic catalog.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`openai/dto.rs`, `googlebooks/dto.rs`) - Exact API request/response shapes
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - HTTP clients for external APIs
//! - **Traits** - Seams for swapping clients out in tests
//! - **Service** - Orchestration and reconciliation of the two sources
//!
//! # Usage
//!
//! ```ignore
//! use identification::{IdentificationService, IdentificationConfig};
//!
//! let config = IdentificationConfig {
//!     openai_api_key: "your-api-key".to_string(),
//!     ..Default::default()
//! };
//! let service = IdentificationService::new(config);
//!
//! let record = service.identify(&std::fs::read("cover.jpg")?).await?;
//! println!("{} by {}", record.title, record.author);
//! ```

pub mod domain;
pub mod googlebooks;
pub mod isbn;
pub mod openai;
pub mod service;
pub mod traits;

pub use domain::{
    CandidateFields, CatalogRecord, IdentificationError, LookupOutcome, LookupQuery,
    ReconciledRecord, ServiceError,
};
pub use service::{IdentificationConfig, IdentificationService, identify_cover, reconcile};
