//! User account commands.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::db;

use super::open_db;

/// Register a new user
pub fn cmd_user_add(rt: &Runtime, db_path: &Path, username: &str, password: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        db::create_user(&pool, username, password).await?;
        println!("✓ User registered.");
        Ok(())
    })
}

/// Check a username and password
pub fn cmd_user_verify(
    rt: &Runtime,
    db_path: &Path,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        db::verify_user(&pool, username, password).await?;
        println!("✓ OK");
        Ok(())
    })
}

/// List registered users
pub fn cmd_user_list(rt: &Runtime, db_path: &Path) -> anyhow::Result<()> {
    rt.block_on(async {
        let pool = open_db(db_path).await?;
        let users = db::list_users(&pool).await?;

        for user in &users {
            println!("{:<24} created {}", user.username, user.created_at);
        }
        println!("\n{} user(s)", users.len());
        Ok(())
    })
}
