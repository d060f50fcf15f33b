//! Core data models for the library catalog.
//!
//! Defines the persisted entities: [`Book`] and [`User`], plus the input
//! shapes used to create and edit books.
//!
//! # Database Schema
//!
//! The models map to the following tables:
//! - `books` - Catalog entries keyed by ISBN
//! - `users` - Accounts with bcrypt password hashes

use sqlx::FromRow;

use crate::identification::{ReconciledRecord, isbn};

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    /// Normalized ISBN (primary key)
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    /// Publication year
    pub year: Option<i64>,
    pub publisher: Option<String>,
}

/// A library user.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Lowercased, unique
    pub username: String,
    /// bcrypt hash
    pub password_hash: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Editable fields of a book (everything but the ISBN)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub publisher: String,
}

/// A book ready to be inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub isbn: String,
    pub fields: BookFields,
}

impl From<ReconciledRecord> for NewBook {
    /// Shape an identification result for the catalog.
    ///
    /// The ISBN is normalized; it is empty if the identified one was invalid.
    fn from(record: ReconciledRecord) -> Self {
        Self {
            isbn: isbn::normalize(&record.isbn),
            fields: BookFields {
                title: record.title,
                author: record.author,
                year: i64::from(record.year),
                publisher: record.publisher,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_from_identified_record() {
        let record = ReconciledRecord {
            title: "Clean Code".to_string(),
            author: "Robert C. Martin".to_string(),
            isbn: "978-0-13-235088-4".to_string(),
            publisher: "Prentice Hall".to_string(),
            year: 2008,
            cover_url: "http://books.google.com/thumb".to_string(),
        };

        let book = NewBook::from(record);

        assert_eq!(book.isbn, "9780132350884");
        assert_eq!(book.fields.title, "Clean Code");
        assert_eq!(book.fields.year, 2008);
    }

    #[test]
    fn test_invalid_isbn_becomes_empty() {
        let record = ReconciledRecord {
            title: "Foo".to_string(),
            isbn: "12345".to_string(),
            ..Default::default()
        };
        assert_eq!(NewBook::from(record).isbn, "");
    }
}
