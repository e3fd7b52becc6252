//! Database schema definitions
//!
//! Row types for sqlx mapping from SQLite tables, plus conversions into
//! the core domain types. Monetary columns are stored as TEXT and parsed
//! into `Decimal` on the way out, so no precision is lost to floating
//! point at any layer.

use chrono::{DateTime, NaiveDate, Utc};
use depobank_core::{Account, Customer, Plan, TransactionKind, TransactionRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{PersistenceError, PersistenceResult};

/// Row type for the `customers` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CustomerRow {
    pub id: i64,
    pub name: String,
}

/// Row type for the `plans` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct PlanRow {
    pub id: i64,
    pub name: String,
    pub yearly_return: String, // Decimal stored as TEXT
}

/// Row type for the `accounts` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: i64,
    pub packet: String,
    pub customer_id: i64,
    pub plan_id: i64,
    pub balance: String, // Decimal stored as TEXT
    pub opened_at: NaiveDate,
}

/// Row type for the account listing join: account columns plus the
/// customer name and the plan's name and annual yield.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AccountDetailRow {
    pub id: i64,
    pub packet: String,
    pub customer_id: i64,
    pub plan_id: i64,
    pub balance: String,
    pub opened_at: NaiveDate,
    pub customer_name: String,
    pub plan_name: String,
    pub yearly_return: String,
}

/// Row type for the `transactions` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: i64,
    pub account_id: i64,
    pub tx_type: String,
    pub amount: String, // Decimal stored as TEXT
    pub created_at: DateTime<Utc>,
}

/// Parse a TEXT decimal column, reporting the column on failure.
pub(crate) fn parse_decimal(field: &str, value: &str) -> PersistenceResult<Decimal> {
    Decimal::from_str(value).map_err(|_| PersistenceError::invalid_decimal(field, value))
}

// === Conversion implementations ===

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer::new(row.id, row.name)
    }
}

impl TryFrom<PlanRow> for Plan {
    type Error = PersistenceError;

    fn try_from(row: PlanRow) -> PersistenceResult<Self> {
        let yearly_return = parse_decimal("plans.yearly_return", &row.yearly_return)?;
        Ok(Plan::new(row.id, row.name, yearly_return))
    }
}

impl TryFrom<AccountRow> for Account {
    type Error = PersistenceError;

    fn try_from(row: AccountRow) -> PersistenceResult<Self> {
        Ok(Account {
            id: row.id,
            packet: row.packet,
            customer_id: row.customer_id,
            plan_id: row.plan_id,
            balance: parse_decimal("accounts.balance", &row.balance)?,
            opened_at: row.opened_at,
        })
    }
}

impl AccountDetailRow {
    /// The account portion of the joined row.
    pub fn account(&self) -> PersistenceResult<Account> {
        Ok(Account {
            id: self.id,
            packet: self.packet.clone(),
            customer_id: self.customer_id,
            plan_id: self.plan_id,
            balance: parse_decimal("accounts.balance", &self.balance)?,
            opened_at: self.opened_at,
        })
    }

    /// The plan's annual yield carried by the join.
    pub fn yearly_return(&self) -> PersistenceResult<Decimal> {
        parse_decimal("plans.yearly_return", &self.yearly_return)
    }
}

impl TryFrom<TransactionRow> for TransactionRecord {
    type Error = PersistenceError;

    fn try_from(row: TransactionRow) -> PersistenceResult<Self> {
        let kind = TransactionKind::parse(&row.tx_type).ok_or_else(|| {
            PersistenceError::InvalidEnumValue {
                field: "transactions.tx_type".to_string(),
                value: row.tx_type.clone(),
            }
        })?;

        Ok(TransactionRecord {
            id: row.id,
            account_id: row.account_id,
            kind,
            amount: parse_decimal("transactions.amount", &row.amount)?,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plan_row_conversion() {
        let row = PlanRow {
            id: 1,
            name: "Gold 12M".to_string(),
            yearly_return: "6.25".to_string(),
        };
        let plan = Plan::try_from(row).unwrap();
        assert_eq!(plan.yearly_return, dec!(6.25));
    }

    #[test]
    fn test_bad_decimal_reports_column() {
        let row = PlanRow {
            id: 1,
            name: "Broken".to_string(),
            yearly_return: "six".to_string(),
        };
        let err = Plan::try_from(row).unwrap_err();
        assert!(err.to_string().contains("plans.yearly_return"));
    }

    #[test]
    fn test_transaction_row_conversion() {
        let row = TransactionRow {
            id: 9,
            account_id: 3,
            tx_type: "WITHDRAW".to_string(),
            amount: "1015000".to_string(),
            created_at: Utc::now(),
        };
        let record = TransactionRecord::try_from(row).unwrap();
        assert_eq!(record.kind, TransactionKind::Withdraw);
        assert_eq!(record.amount, dec!(1015000));
    }

    #[test]
    fn test_unknown_tx_type_rejected() {
        let row = TransactionRow {
            id: 9,
            account_id: 3,
            tx_type: "TRANSFER".to_string(),
            amount: "1".to_string(),
            created_at: Utc::now(),
        };
        assert!(TransactionRecord::try_from(row).is_err());
    }
}
