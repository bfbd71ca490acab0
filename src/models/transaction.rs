use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn all() -> &'static [TransactionType] {
        &[Self::Income, Self::Expense]
    }

    /// Capitalised label for headings ("Income", "Expense").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::validation(format!(
                "Unknown transaction type: '{other}' (expected income or expense)"
            ))),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub date: NaiveDate,
    /// Always a positive magnitude; direction comes from `kind`.
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        category: String,
        description: Option<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: None,
            date,
            amount,
            category,
            description,
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Amount with the direction applied: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}
