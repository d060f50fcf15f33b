//! Book catalog commands.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::db;
use crate::model::{Book, BookFields, NewBook};

use super::{open_db, require_isbn};

/// Register a new book
pub fn cmd_book_add(rt: &Runtime, db_path: &Path, isbn: &str, fields: BookFields) -> anyhow::Result<()> {
    let isbn = require_isbn(isbn)?;
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        db::insert_book(&pool, &NewBook { isbn, fields }).await?;
        println!("✓ Book registered.");
        Ok(())
    })
}

/// Show a single book
pub fn cmd_book_show(rt: &Runtime, db_path: &Path, isbn: &str) -> anyhow::Result<()> {
    let isbn = require_isbn(isbn)?;
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        match db::find_book(&pool, &isbn).await? {
            Some(book) => print_book(&book),
            None => println!("✗ No book found with ISBN {}", isbn),
        }
        Ok(())
    })
}

/// Replace a book's details
pub fn cmd_book_update(
    rt: &Runtime,
    db_path: &Path,
    isbn: &str,
    fields: BookFields,
) -> anyhow::Result<()> {
    let isbn = require_isbn(isbn)?;
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        db::update_book(&pool, &isbn, &fields).await?;
        println!("✓ Book updated.");
        Ok(())
    })
}

/// Remove a book
pub fn cmd_book_delete(rt: &Runtime, db_path: &Path, isbn: &str) -> anyhow::Result<()> {
    let isbn = require_isbn(isbn)?;
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        db::delete_book(&pool, &isbn).await?;
        println!("✓ Book deleted.");
        Ok(())
    })
}

/// List all books sorted by title
pub fn cmd_book_list(rt: &Runtime, db_path: &Path) -> anyhow::Result<()> {
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        let books = db::list_books(&pool).await?;

        if books.is_empty() {
            println!("No books in the catalog.");
            return Ok(());
        }

        for book in &books {
            println!(
                "{:<13}  {}  ({})",
                book.isbn,
                book.title,
                book.author.as_deref().filter(|a| !a.is_empty()).unwrap_or("Unknown Author")
            );
        }
        println!("\n{} book(s)", books.len());
        Ok(())
    })
}

fn print_book(book: &Book) {
    println!("  ISBN:      {}", book.isbn);
    println!("  Title:     {}", book.title);
    if let Some(author) = book.author.as_deref().filter(|a| !a.is_empty()) {
        println!("  Author:    {}", author);
    }
    if let Some(year) = book.year.filter(|y| *y > 0) {
        println!("  Year:      {}", year);
    }
    if let Some(publisher) = book.publisher.as_deref().filter(|p| !p.is_empty()) {
        println!("  Publisher: {}", publisher);
    }
}
