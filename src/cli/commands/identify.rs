//! Cover identification and ISBN commands.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::db;
use crate::error::ResultExt;
use crate::identification::{self, ReconciledRecord};
use crate::model::NewBook;

use super::{open_db, require_isbn};

/// Identify a book from a cover photo, optionally adding it to the catalog
pub fn cmd_identify(
    rt: &Runtime,
    config: &Config,
    image: &Path,
    api_key: Option<&str>,
    save: bool,
    db_path: &Path,
) -> anyhow::Result<()> {
    // Fail before touching the image if the service can't be reached anyway
    let api_key = config.resolve_api_key(api_key)?;

    if !image.is_file() {
        return Err(crate::error::Error::not_found(image).into());
    }

    rt.block_on(async {
        let bytes = tokio::fs::read(image)
            .await
            .with_context(format!("Failed to read {}", image.display()))?;

        println!("Identifying: {:?}", image);
        println!();

        let record = match identification::identify_cover(&bytes, config.identification(api_key)).await {
            Ok(record) => record,
            Err(e) => {
                println!("✗ {}", e);
                anyhow::bail!("identification failed: {}", e);
            }
        };

        print_record(&record);

        if save {
            println!();
            let book = NewBook::from(record);
            if book.isbn.is_empty() {
                anyhow::bail!("Cannot save: no valid ISBN was identified");
            }
            let pool = open_db(db_path).await?;
            db::insert_book(&pool, &book).await?;
            println!("✓ Book registered ({})", book.isbn);
        }

        Ok(())
    })
}

/// Print the normalized form of an ISBN
pub fn cmd_isbn(raw: &str) -> anyhow::Result<()> {
    println!("{}", require_isbn(raw)?);
    Ok(())
}

fn print_record(record: &ReconciledRecord) {
    println!("✓ Book identified");
    println!();
    let rows = [
        ("Title", record.title.as_str()),
        ("Author", record.author.as_str()),
        ("ISBN", record.isbn.as_str()),
        ("Publisher", record.publisher.as_str()),
        ("Cover", record.cover_url.as_str()),
    ];
    for (label, value) in rows {
        if !value.is_empty() {
            println!("  {:<10} {}", format!("{}:", label), value);
        }
    }
    if record.year > 0 {
        println!("  {:<10} {}", "Year:", record.year);
    }
}
