//! Book catalog persistence.
//!
//! Books are keyed by ISBN. Callers are expected to pass ISBNs already run
//! through [`crate::identification::isbn::normalize`].

use sqlx::sqlite::SqlitePool;

use crate::model::{Book, BookFields, NewBook};

/// Errors from book store operations
#[derive(Debug, thiserror::Error)]
pub enum BookStoreError {
    #[error("A book with ISBN {0} already exists")]
    DuplicateIsbn(String),

    #[error("No book found with ISBN {0}")]
    NotFound(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Insert a new book.
///
/// Fails with [`BookStoreError::DuplicateIsbn`] if the ISBN is already
/// catalogued; existing rows are never overwritten.
pub async fn insert_book(pool: &SqlitePool, book: &NewBook) -> Result<(), BookStoreError> {
    if book.isbn.is_empty() {
        return Err(BookStoreError::MissingField("isbn"));
    }
    if book.fields.title.is_empty() {
        return Err(BookStoreError::MissingField("title"));
    }

    let result = sqlx::query(
        "INSERT INTO books (isbn, title, author, year, publisher) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&book.isbn)
    .bind(&book.fields.title)
    .bind(&book.fields.author)
    .bind(book.fields.year)
    .bind(&book.fields.publisher)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            tracing::info!(isbn = %book.isbn, title = %book.fields.title, "Book registered");
            Ok(())
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(BookStoreError::DuplicateIsbn(book.isbn.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Get a book by ISBN.
pub async fn find_book(pool: &SqlitePool, isbn: &str) -> Result<Option<Book>, BookStoreError> {
    let book = sqlx::query_as::<_, Book>(
        "SELECT isbn, title, author, year, publisher FROM books WHERE isbn = ?",
    )
    .bind(isbn)
    .fetch_optional(pool)
    .await?;

    Ok(book)
}

/// Replace every field of an existing book.
///
/// Fails with [`BookStoreError::NotFound`] if no book has this ISBN.
pub async fn update_book(
    pool: &SqlitePool,
    isbn: &str,
    fields: &BookFields,
) -> Result<(), BookStoreError> {
    if fields.title.is_empty() {
        return Err(BookStoreError::MissingField("title"));
    }

    let result = sqlx::query(
        r#"
        UPDATE books
        SET title = ?, author = ?, year = ?, publisher = ?
        WHERE isbn = ?
        "#,
    )
    .bind(&fields.title)
    .bind(&fields.author)
    .bind(fields.year)
    .bind(&fields.publisher)
    .bind(isbn)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BookStoreError::NotFound(isbn.to_string()));
    }
    Ok(())
}

/// Delete a book by ISBN.
///
/// Fails with [`BookStoreError::NotFound`] if no book has this ISBN.
pub async fn delete_book(pool: &SqlitePool, isbn: &str) -> Result<(), BookStoreError> {
    let result = sqlx::query("DELETE FROM books WHERE isbn = ?")
        .bind(isbn)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BookStoreError::NotFound(isbn.to_string()));
    }
    Ok(())
}

/// Get all books, sorted by title.
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<Book>, BookStoreError> {
    let books = sqlx::query_as::<_, Book>(
        "SELECT isbn, title, author, year, publisher FROM books ORDER BY title ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(books)
}
