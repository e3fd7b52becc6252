//! Customer management commands

use anyhow::Result;
use depobank_ledger::CustomerService;
use std::path::Path;

use crate::db;
use crate::CustomerAction;

/// Handle customer subcommands
pub async fn handle(db_path: &Path, action: CustomerAction) -> Result<()> {
    let database = db::connect(db_path).await?;
    let customers = CustomerService::new(database.pool());

    match action {
        CustomerAction::Add { name } => {
            let customer = customers.add(&name).await?;
            println!("✅ Customer created: {}", customer);
        }
        CustomerAction::List => {
            let all = customers.list().await?;
            if all.is_empty() {
                println!("No customers yet");
            }
            for customer in all {
                println!("   #{:<4} {}", customer.id, customer.name);
            }
        }
        CustomerAction::Show { id } => {
            let customer = customers.get(id).await?;
            println!("{}", customer);
        }
        CustomerAction::Update { id, name } => {
            let customer = customers.rename(id, &name).await?;
            println!("✅ Customer updated: {}", customer);
        }
        CustomerAction::Remove { id } => {
            customers.remove(id).await?;
            println!("✅ Customer #{} removed", id);
        }
    }

    database.close().await;
    Ok(())
}
