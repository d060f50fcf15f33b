//! Google Books API integration
//!
//! Cross-references inference output against the Google Books catalog to get
//! authoritative title, author, ISBN, publisher and year.
//!
//! API docs: https://developers.google.com/books/docs/v1/using

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_catalog_record;
pub use client::{DEFAULT_BASE_URL, GoogleBooksClient};
