//! Deposit plan management commands

use anyhow::Result;
use depobank_ledger::PlanService;
use std::path::Path;

use crate::db;
use crate::PlanAction;

/// Handle plan subcommands
pub async fn handle(db_path: &Path, action: PlanAction) -> Result<()> {
    let database = db::connect(db_path).await?;
    let plans = PlanService::new(database.pool());

    match action {
        PlanAction::Add {
            name,
            yearly_return,
        } => {
            let plan = plans.add(&name, yearly_return).await?;
            println!("✅ Plan created: {}", plan);
        }
        PlanAction::List => {
            let all = plans.list().await?;
            if all.is_empty() {
                println!("No plans yet");
            }
            for plan in all {
                println!("   #{:<4} {:<24} {}% p.a.", plan.id, plan.name, plan.yearly_return);
            }
        }
        PlanAction::Show { id } => {
            let plan = plans.get(id).await?;
            println!("{}", plan);
        }
        PlanAction::Update {
            id,
            name,
            yearly_return,
        } => {
            let plan = plans.update(id, &name, yearly_return).await?;
            println!("✅ Plan updated: {}", plan);
            println!("   Open accounts accrue the new yield from their opening date");
        }
        PlanAction::Remove { id } => {
            plans.remove(id).await?;
            println!("✅ Plan #{} removed", id);
        }
    }

    database.close().await;
    Ok(())
}
