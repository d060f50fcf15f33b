//! User accounts and credential checks.
//!
//! Usernames are trimmed and lowercased before storage, so uniqueness is
//! case-insensitive. Passwords are stored as bcrypt hashes.

use sqlx::sqlite::SqlitePool;

use crate::model::User;

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

// Minimum cost keeps the test suite fast
const HASH_COST: u32 = if cfg!(test) { 4 } else { bcrypt::DEFAULT_COST };

const DEFAULT_ADMIN: (&str, &str) = ("admin", "admin123");

/// Errors from credential store operations
#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Username must be at least 3 characters")]
    UsernameTooShort,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("User already exists")]
    UserExists,

    /// Shared by every failed login so callers can't enumerate usernames
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Register a new user.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<(), UserStoreError> {
    let username = username.trim().to_lowercase();
    let password = password.trim();

    if username.is_empty() || password.is_empty() {
        return Err(UserStoreError::MissingCredentials);
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(UserStoreError::UsernameTooShort);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(UserStoreError::PasswordTooShort);
    }

    let existing: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE username = ?")
        .bind(&username)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(UserStoreError::UserExists);
    }

    let password_hash = bcrypt::hash(password, HASH_COST)?;
    match insert_user(pool, &username, &password_hash).await {
        Ok(()) => {
            tracing::info!(%username, "User registered");
            Ok(())
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(UserStoreError::UserExists),
        Err(e) => Err(e.into()),
    }
}

/// Check a username/password pair against the stored hash.
pub async fn verify_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<(), UserStoreError> {
    let username = username.trim().to_lowercase();
    let password = password.trim();

    if username.is_empty() || password.is_empty() {
        return Err(UserStoreError::InvalidCredentials);
    }

    let row: Option<(String,)> = sqlx::query_as("SELECT password_hash FROM users WHERE username = ?")
        .bind(&username)
        .fetch_optional(pool)
        .await?;

    // A malformed stored hash is treated like a wrong password
    match row {
        Some((stored,)) if bcrypt::verify(password, &stored).unwrap_or(false) => Ok(()),
        _ => Err(UserStoreError::InvalidCredentials),
    }
}

/// Get all users, oldest first.
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, UserStoreError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, created_at FROM users ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(users)
}

/// Create the default admin account when no users exist yet.
///
/// Returns true if the account was created.
pub async fn ensure_default_admin(pool: &SqlitePool) -> Result<bool, UserStoreError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(false);
    }

    let (username, password) = DEFAULT_ADMIN;
    insert_user(pool, username, &bcrypt::hash(password, HASH_COST)?).await?;
    tracing::warn!("Created default '{}' account; change its password", username);
    Ok(true)
}

async fn insert_user(pool: &SqlitePool, username: &str, password_hash: &str) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)")
        .bind(username)
        .bind(password_hash)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(pool)
        .await?;
    Ok(())
}
