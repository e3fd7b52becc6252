//! Database initialization and status

use anyhow::{bail, Context, Result};
use depobank_persistence::Database;
use std::path::Path;

/// Initialize the database with the schema
pub async fn init_database(db_path: &Path, force: bool) -> Result<()> {
    if force && db_path.exists() {
        std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        println!("🗑️  Removed existing database");
    }

    let db = Database::open(db_path)
        .await
        .context("Failed to initialize database")?;
    db.close().await;
    Ok(())
}

/// Connect to an existing database
pub async fn connect(db_path: &Path) -> Result<Database> {
    if !db_path.exists() {
        bail!(
            "database not found at {:?} - run 'depobank init' first",
            db_path
        );
    }

    Database::open(db_path)
        .await
        .context("Failed to connect to database")
}

/// Show database status
pub async fn show_status(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("❌ Database not found at {:?}", db_path);
        println!("   Run 'depobank init' to create the database");
        return Ok(());
    }

    let db = Database::open(db_path).await?;

    println!("📊 Database Status");
    println!("   Path: {:?}", db_path);
    println!();

    let customer_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
        .fetch_one(db.pool())
        .await
        .unwrap_or((0,));

    let plan_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM plans")
        .fetch_one(db.pool())
        .await
        .unwrap_or((0,));

    let account_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
        .fetch_one(db.pool())
        .await
        .unwrap_or((0,));

    let tx_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions")
        .fetch_one(db.pool())
        .await
        .unwrap_or((0,));

    println!("   Customers:    {}", customer_count.0);
    println!("   Plans:        {}", plan_count.0);
    println!("   Accounts:     {}", account_count.0);
    println!("   Transactions: {}", tx_count.0);

    db.close().await;
    Ok(())
}
