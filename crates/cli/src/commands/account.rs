//! Account management commands

use anyhow::Result;
use depobank_ledger::AccountService;
use std::path::Path;

use crate::db;
use crate::AccountAction;

/// Handle account subcommands
pub async fn handle(db_path: &Path, action: AccountAction) -> Result<()> {
    let database = db::connect(db_path).await?;
    let accounts = AccountService::new(database.pool());

    match action {
        AccountAction::Open {
            packet,
            customer,
            plan,
            balance,
            opened,
        } => {
            let account = accounts.open(&packet, customer, plan, balance, opened).await?;
            println!("✅ Account opened!");
            println!("   ID:       {}", account.id);
            println!("   Packet:   {}", account.packet);
            println!("   Balance:  {}", account.balance);
            println!("   Opened:   {}", account.opened_at);
        }
        AccountAction::List { json } => {
            let all = accounts.list().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else {
                if all.is_empty() {
                    println!("No accounts yet");
                }
                for entry in all {
                    println!(
                        "   #{:<4} {:<24} {:<20} {:<20} balance {:>16}  opened {}",
                        entry.account.id,
                        entry.account.packet,
                        entry.customer_name,
                        entry.plan_name,
                        entry.account.balance,
                        entry.account.opened_at,
                    );
                }
            }
        }
        AccountAction::Show { id } => {
            let entry = accounts.get(id).await?;
            println!("Account #{}", entry.account.id);
            println!("   Packet:   {}", entry.account.packet);
            println!("   Customer: {} (#{})", entry.customer_name, entry.account.customer_id);
            println!(
                "   Plan:     {} (#{}, {}% p.a.)",
                entry.plan_name, entry.account.plan_id, entry.yearly_return
            );
            println!("   Balance:  {}", entry.account.balance);
            println!("   Opened:   {}", entry.account.opened_at);
        }
        AccountAction::Update {
            id,
            packet,
            customer,
            plan,
            opened,
        } => {
            let account = accounts.update(id, &packet, customer, plan, opened).await?;
            println!("✅ Account updated: {}", account);
        }
        AccountAction::Close { id } => {
            accounts.close(id).await?;
            println!("✅ Account #{} removed (history kept)", id);
        }
    }

    database.close().await;
    Ok(())
}
