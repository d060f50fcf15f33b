//! Database module for book and user persistence.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! Provides async operations for:
//! - Book CRUD keyed by ISBN ([`books`])
//! - User registration and credential checks ([`users`])
//!
//! # Example
//!
//! ```ignore
//! use book_minder::db::{init_db, list_books};
//!
//! let pool = init_db("sqlite:biblioteca.db").await?;
//! let books = list_books(&pool).await?;
//! ```

pub mod books;
pub mod users;

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub use books::{BookStoreError, delete_book, find_book, insert_book, list_books, update_book};
pub use users::{UserStoreError, create_user, ensure_default_admin, list_users, verify_user};

/// Build a SQLite database URL from a file path.
///
/// # Returns
///
/// A SQLite connection URL string (e.g., "sqlite:biblioteca.db")
pub fn db_url(path: &std::path::Path) -> String {
    format!("sqlite:{}", path.display())
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool with up to 5 connections, runs all pending migrations and makes
/// sure a default admin account exists.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
/// - The default admin cannot be created
pub async fn init_db(db_url: &str) -> crate::error::Result<SqlitePool> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(sqlx::Error::from)?;

    ensure_default_admin(&pool).await?;

    Ok(pool)
}
