//! # Interest Module
//!
//! Pure interest math for withdrawals: the month-counting rule and the
//! simple (non-compounding) interest formula. No state, no I/O, no
//! rounding - presentation rounding is the caller's concern.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Months in a year, as Decimal for exact division.
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Percent divisor.
const PERCENT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Result of an interest calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestBreakdown {
    /// Monthly fractional rate: `yearly_return / 12 / 100`
    pub monthly_return: Decimal,
    /// Accrued interest: `balance * months * monthly_return`
    pub interest: Decimal,
    /// Payout: `balance + interest`
    pub ending_balance: Decimal,
}

/// Simple monthly-prorated interest, linear in elapsed months.
///
/// `yearly_return` is an annual percentage (6 means 6% p.a.). With
/// `months = 0` the interest is exactly zero and the ending balance
/// equals the starting balance. Negative month counts never reach this
/// function; the engine clamps via [`elapsed_months`] first.
pub fn calculate_interest(
    balance: Decimal,
    yearly_return: Decimal,
    months: u32,
) -> InterestBreakdown {
    let monthly_return = yearly_return / MONTHS_PER_YEAR / PERCENT;
    let interest = balance * Decimal::from(months) * monthly_return;
    let ending_balance = balance + interest;

    InterestBreakdown {
        monthly_return,
        interest,
        ending_balance,
    }
}

/// Whole months elapsed between an account's opening date and a
/// withdrawal date.
///
/// Rule: calendar month delta, plus one when the withdrawal's day of
/// month has reached the opening day (a partially-elapsed final month
/// counts as complete once the day threshold is hit). Clamped at zero
/// for withdrawals dated before the opening. Deliberately coarse - this
/// is not true calendar-month arithmetic, and the day-match behavior
/// (same date counts as one full month) is part of the contract.
pub fn elapsed_months(opened_at: NaiveDate, withdrawal_date: NaiveDate) -> u32 {
    let mut months = (withdrawal_date.year() - opened_at.year()) * 12
        + (withdrawal_date.month() as i32 - opened_at.month() as i32);

    if withdrawal_date.day() >= opened_at.day() {
        months += 1;
    }

    months.max(0) as u32
}
