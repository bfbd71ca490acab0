use rust_decimal::Decimal;

use super::YearMonth;

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLimit {
    pub id: Option<i64>,
    pub category: String,
    pub limit_amount: Decimal,
    pub month: YearMonth,
}

impl BudgetLimit {
    pub fn new(category: String, limit_amount: Decimal, month: YearMonth) -> Self {
        Self {
            id: None,
            category,
            limit_amount,
            month,
        }
    }
}

/// A budget limit that was overspent in its month.
#[derive(Debug, Clone, PartialEq)]
pub struct Overage {
    pub category: String,
    pub limit_amount: Decimal,
    pub actual_amount: Decimal,
    /// `actual_amount - limit_amount`, always positive.
    pub overage: Decimal,
}
