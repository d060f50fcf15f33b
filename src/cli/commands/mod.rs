//! CLI command definitions and dispatch.
//!
//! Each group of subcommands is implemented in its own submodule:
//! - `identify`: Cover identification and ISBN normalization
//! - `books`: Book catalog management
//! - `users`: Account registration and credential checks
//! - `settings`: Inspecting the configuration

mod books;
mod identify;
mod settings;
mod users;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::{config, db};

pub use books::{cmd_book_add, cmd_book_delete, cmd_book_list, cmd_book_show, cmd_book_update};
pub use identify::{cmd_identify, cmd_isbn};
pub use settings::{cmd_config_init, cmd_config_path, cmd_config_show};
pub use users::{cmd_user_add, cmd_user_list, cmd_user_verify};

/// Book Minder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database path (overrides the config file)
    #[arg(long, global = true, env = "BIBLIO_DB_PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Identify a book from a photo of its cover
    Identify {
        /// Path to the cover image (JPEG)
        image: PathBuf,
        /// OpenAI API key (or set OPENAI_API_KEY env var)
        #[arg(short, long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        /// Add the identified book to the catalog
        #[arg(long)]
        save: bool,
    },
    /// Normalize an ISBN (digits and X only, 10 or 13 characters)
    Isbn {
        /// Raw ISBN text, e.g. "978-0-13-235088-4"
        raw: String,
    },
    /// Manage the book catalog
    Books {
        #[command(subcommand)]
        action: BookCommand,
    },
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UserCommand,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

/// Book catalog subcommands
#[derive(Subcommand)]
pub enum BookCommand {
    /// Register a new book
    Add {
        isbn: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value_t = 0)]
        year: i64,
        #[arg(long, default_value = "")]
        publisher: String,
    },
    /// Show a single book
    Show { isbn: String },
    /// Replace a book's details
    Update {
        isbn: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value_t = 0)]
        year: i64,
        #[arg(long, default_value = "")]
        publisher: String,
    },
    /// Remove a book
    Delete { isbn: String },
    /// List all books by title
    List,
}

/// User account subcommands
#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a new user
    Add { username: String, password: String },
    /// Check a username and password
    Verify { username: String, password: String },
    /// List registered users
    List,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (API key redacted)
    Show,
    /// Print the config file location
    Path,
    /// Write a default config file
    Init,
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = config::load();
    let db_path = config.db_path(cli.db.as_deref());

    match &cli.command {
        Commands::Identify {
            image,
            api_key,
            save,
        } => cmd_identify(&rt, &config, image, api_key.as_deref(), *save, &db_path),
        Commands::Isbn { raw } => cmd_isbn(raw),
        Commands::Books { action } => match action {
            BookCommand::Add {
                isbn,
                title,
                author,
                year,
                publisher,
            } => cmd_book_add(&rt, &db_path, isbn, book_fields(title, author, *year, publisher)),
            BookCommand::Show { isbn } => cmd_book_show(&rt, &db_path, isbn),
            BookCommand::Update {
                isbn,
                title,
                author,
                year,
                publisher,
            } => cmd_book_update(&rt, &db_path, isbn, book_fields(title, author, *year, publisher)),
            BookCommand::Delete { isbn } => cmd_book_delete(&rt, &db_path, isbn),
            BookCommand::List => cmd_book_list(&rt, &db_path),
        },
        Commands::Users { action } => match action {
            UserCommand::Add { username, password } => {
                cmd_user_add(&rt, &db_path, username, password)
            }
            UserCommand::Verify { username, password } => {
                cmd_user_verify(&rt, &db_path, username, password)
            }
            UserCommand::List => cmd_user_list(&rt, &db_path),
        },
        Commands::Config { action } => match action {
            ConfigCommand::Show => cmd_config_show(&config, &db_path),
            ConfigCommand::Path => cmd_config_path(),
            ConfigCommand::Init => cmd_config_init(),
        },
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

fn book_fields(title: &str, author: &str, year: i64, publisher: &str) -> crate::model::BookFields {
    crate::model::BookFields {
        title: title.trim().to_string(),
        author: author.trim().to_string(),
        year,
        publisher: publisher.trim().to_string(),
    }
}

/// Open (and if needed create) the library database
pub(crate) async fn open_db(path: &std::path::Path) -> anyhow::Result<sqlx::SqlitePool> {
    let pool = db::init_db(&db::db_url(path)).await?;
    tracing::debug!(db = %path.display(), "Database connected");
    Ok(pool)
}

/// Normalize an ISBN argument, rejecting anything that isn't a valid shape
pub(crate) fn require_isbn(raw: &str) -> anyhow::Result<String> {
    let isbn = crate::identification::isbn::normalize(raw);
    if isbn.is_empty() {
        anyhow::bail!("Invalid ISBN {:?}: expected 10 or 13 digits (X allowed)", raw);
    }
    Ok(isbn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_identify() {
        let cli = Cli::try_parse_from(["book-minder", "identify", "cover.jpg", "--save", "--api-key", "k"])
            .unwrap();
        match cli.command {
            Commands::Identify { image, api_key, save } => {
                assert_eq!(image, PathBuf::from("cover.jpg"));
                assert_eq!(api_key.as_deref(), Some("k"));
                assert!(save);
            }
            _ => panic!("expected identify"),
        }
    }

    #[test]
    fn test_parse_book_add_defaults() {
        let cli = Cli::try_parse_from([
            "book-minder",
            "--db",
            "test.db",
            "books",
            "add",
            "0132350882",
            "--title",
            "Clean Code",
        ])
        .unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("test.db")));
        match cli.command {
            Commands::Books {
                action: BookCommand::Add { year, author, .. },
            } => {
                assert_eq!(year, 0);
                assert_eq!(author, "");
            }
            _ => panic!("expected books add"),
        }
    }

    #[test]
    fn test_require_isbn() {
        assert_eq!(require_isbn("0-13-235088-2").unwrap(), "0132350882");
        assert!(require_isbn("12345").is_err());
    }
}
