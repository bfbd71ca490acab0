use rust_decimal::Decimal;

use super::{Transaction, YearMonth};
use crate::error::LedgerError;

/// Income, expenses and the resulting balance over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
}

impl Totals {
    pub fn from_transactions<'a, I>(txns: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals = Self::default();
        for txn in txns {
            if txn.is_income() {
                totals.income = checked_add(totals.income, txn.amount)?;
            } else {
                totals.expenses = checked_add(totals.expenses, txn.amount)?;
            }
            totals.transaction_count += 1;
        }
        totals.balance = totals
            .income
            .checked_sub(totals.expenses)
            .ok_or(LedgerError::Overflow)?;
        Ok(totals)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: YearMonth,
    pub totals: Totals,
}

/// `a + b`, or [`LedgerError::Overflow`] instead of panicking.
pub fn checked_add(a: Decimal, b: Decimal) -> Result<Decimal, LedgerError> {
    a.checked_add(b).ok_or(LedgerError::Overflow)
}
