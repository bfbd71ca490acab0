mod budget;
mod category;
mod month;
mod summary;
mod transaction;

pub use budget::{BudgetLimit, Overage};
pub use category::RecommendedCategories;
pub use month::YearMonth;
pub use summary::{checked_add, MonthlySummary, Totals};
pub use transaction::{Transaction, TransactionType};

#[cfg(test)]
mod tests;
