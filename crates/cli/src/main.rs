//! Depobank CLI - savings ledger operations from the command line
//!
//! Usage:
//! ```bash
//! depobank init
//! depobank customer add "Alice"
//! depobank plan add "Gold 12M" 6
//! depobank account open "Deposito Gold" --customer 1 --plan 1
//! depobank deposit 1 1000000
//! depobank withdraw 1 2024-03-15
//! depobank history 1
//! ```

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod commands;
mod db;

use commands::{account, customer, ledger, plan};

/// Depobank - a savings-account ledger over SQLite
#[derive(Parser)]
#[command(name = "depobank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file path
    #[arg(long, default_value = "data/depobank.db", global = true)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Customer management
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },

    /// Deposit plan (interest-rate tier) management
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Account management
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Deposit funds into an account
    Deposit {
        /// Account ID
        account_id: i64,
        /// Amount to deposit
        amount: Decimal,
        /// Timestamp for the ledger record (RFC 3339), defaults to now
        #[arg(long)]
        date: Option<DateTime<Utc>>,
        /// Print the receipt as JSON
        #[arg(long)]
        json: bool,
    },

    /// Withdraw and close an account out, paying accrued interest
    Withdraw {
        /// Account ID
        account_id: i64,
        /// Withdrawal date (YYYY-MM-DD)
        date: NaiveDate,
        /// Print the receipt as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show an account's transaction history, newest first
    History {
        /// Account ID
        account_id: i64,
        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize the database with the schema
    Init {
        /// Force re-initialization (drops existing data)
        #[arg(long)]
        force: bool,
    },

    /// Show database status
    Status,
}

#[derive(Subcommand)]
pub enum CustomerAction {
    /// Register a new customer
    Add {
        /// Customer name
        name: String,
    },
    /// List all customers
    List,
    /// Show one customer
    Show {
        /// Customer ID
        id: i64,
    },
    /// Rename a customer
    Update {
        /// Customer ID
        id: i64,
        /// New name
        name: String,
    },
    /// Remove a customer
    Remove {
        /// Customer ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum PlanAction {
    /// Create a new plan
    Add {
        /// Plan name
        name: String,
        /// Annual yield in percent (e.g. 6 for 6% p.a.)
        yearly_return: Decimal,
    },
    /// List all plans
    List,
    /// Show one plan
    Show {
        /// Plan ID
        id: i64,
    },
    /// Edit name and annual yield (applies to open accounts)
    Update {
        /// Plan ID
        id: i64,
        /// New name
        name: String,
        /// New annual yield in percent
        yearly_return: Decimal,
    },
    /// Remove a plan
    Remove {
        /// Plan ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Open a new account
    Open {
        /// Free-text packet label for this account
        packet: String,
        /// Owning customer ID
        #[arg(long)]
        customer: i64,
        /// Plan ID the account accrues against
        #[arg(long)]
        plan: i64,
        /// Initial balance, defaults to 0
        #[arg(long)]
        balance: Option<Decimal>,
        /// Opening date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        opened: Option<NaiveDate>,
    },
    /// List all accounts with customer and plan info
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one account
    Show {
        /// Account ID
        id: i64,
    },
    /// Edit packet, references and opening date
    Update {
        /// Account ID
        id: i64,
        /// New packet label
        packet: String,
        /// Owning customer ID
        #[arg(long)]
        customer: i64,
        /// Plan ID
        #[arg(long)]
        plan: i64,
        /// New opening date (YYYY-MM-DD), keeps current when omitted
        #[arg(long)]
        opened: Option<NaiveDate>,
    },
    /// Remove an account (history is kept)
    Close {
        /// Account ID
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Ensure the data directory exists
    if let Some(parent) = cli.db.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    match cli.command {
        Commands::Init { force } => {
            db::init_database(&cli.db, force).await?;
            println!("✅ Database initialized at {:?}", cli.db);
        }

        Commands::Status => {
            db::show_status(&cli.db).await?;
        }

        Commands::Customer { action } => {
            customer::handle(&cli.db, action).await?;
        }

        Commands::Plan { action } => {
            plan::handle(&cli.db, action).await?;
        }

        Commands::Account { action } => {
            account::handle(&cli.db, action).await?;
        }

        Commands::Deposit {
            account_id,
            amount,
            date,
            json,
        } => {
            ledger::deposit(&cli.db, account_id, amount, date, json).await?;
        }

        Commands::Withdraw {
            account_id,
            date,
            json,
        } => {
            ledger::withdraw(&cli.db, account_id, date, json).await?;
        }

        Commands::History { account_id, json } => {
            ledger::history(&cli.db, account_id, json).await?;
        }
    }

    Ok(())
}
