//! Test utilities and fixtures for book-minder tests.
//!
//! This module provides common test helpers, fixtures, and
//! database utilities to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{temp_db, mock_new_book};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     insert_book(&pool, &mock_new_book("0132350882", "Clean Code")).await.unwrap();
//! }
//! ```

use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::model::{BookFields, NewBook};

/// Creates a temporary database for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// and the default admin is seeded, exactly as in production.
///
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");

    let pool = crate::db::init_db(&crate::db::db_url(&db_path))
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// Creates a NewBook with sensible defaults for the given ISBN and title.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let book = NewBook {
///     fields: BookFields { year: 1965, ..mock_new_book("x", "Dune").fields },
///     ..mock_new_book("9780441172719", "Dune")
/// };
/// ```
pub fn mock_new_book(isbn: &str, title: &str) -> NewBook {
    NewBook {
        isbn: isbn.to_string(),
        fields: BookFields {
            title: title.to_string(),
            author: "Test Author".to_string(),
            year: 2008,
            publisher: "Test Publisher".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_valid_pool() {
        let (pool, _dir) = temp_db().await;

        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
            .fetch_one(&pool)
            .await
            .expect("Query should succeed");

        assert_eq!(result.0, 0);
    }

    #[test]
    fn test_mock_new_book_defaults() {
        let book = mock_new_book("0132350882", "Clean Code");
        assert_eq!(book.isbn, "0132350882");
        assert_eq!(book.fields.title, "Clean Code");
        assert_eq!(book.fields.year, 2008);
    }
}
