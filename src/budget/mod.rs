//! Balance, summaries and budget-limit checks computed from the ledger.
//!
//! [`BudgetManager`] holds no state of its own: every figure is recomputed
//! from the database on each call. Validation happens here first so the
//! storage layer is never asked to persist bad input.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::db::{Database, TransactionFilter};
use crate::error::{LedgerError, Result};
use crate::models::*;

pub(crate) struct BudgetManager<'a> {
    db: &'a Database,
    categories: RecommendedCategories,
}

impl<'a> BudgetManager<'a> {
    pub(crate) fn new(db: &'a Database, categories: RecommendedCategories) -> Self {
        Self { db, categories }
    }

    // ── Recording ─────────────────────────────────────────────

    /// Record income. `date` defaults to today.
    pub(crate) fn add_income(
        &self,
        category: &str,
        amount: Decimal,
        description: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<i64> {
        let _span = tracing::info_span!("add_income", category, %amount).entered();
        logged(self.add_transaction(TransactionType::Income, category, amount, description, date))
    }

    /// Record an expense. `date` defaults to today.
    pub(crate) fn add_expense(
        &self,
        category: &str,
        amount: Decimal,
        description: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<i64> {
        let _span = tracing::info_span!("add_expense", category, %amount).entered();
        logged(self.add_transaction(TransactionType::Expense, category, amount, description, date))
    }

    fn add_transaction(
        &self,
        kind: TransactionType,
        category: &str,
        amount: Decimal,
        description: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<i64> {
        validate_amount(amount, "Amount")?;
        let category = self.resolve_category(kind, category)?;
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);
        let date = date.unwrap_or_else(|| Local::now().date_naive());

        let txn = Transaction::new(date, amount, category, description, kind);
        self.db.insert_transaction(&txn)
    }

    /// Trim the name and snap it to the recommended spelling when one matches.
    /// Unrecognised names are kept as typed.
    fn resolve_category(&self, kind: TransactionType, category: &str) -> Result<String> {
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::validation("Category cannot be empty"));
        }
        match self.categories.find(kind, category) {
            Some(canonical) => Ok(canonical.to_string()),
            None => {
                tracing::warn!(%kind, category, "category is not in the recommended list");
                Ok(category.to_string())
            }
        }
    }

    pub(crate) fn valid_categories(&self, kind: TransactionType) -> &[String] {
        self.categories.for_kind(kind)
    }

    // ── Reports ───────────────────────────────────────────────

    pub(crate) fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let _span = tracing::info_span!("list_transactions", ?filter).entered();
        logged(self.db.list_transactions(filter))
    }

    pub(crate) fn get_balance(&self) -> Result<Totals> {
        let _span = tracing::info_span!("get_balance").entered();
        logged(
            self.db
                .list_transactions(&TransactionFilter::default())
                .and_then(|txns| Totals::from_transactions(&txns)),
        )
    }

    pub(crate) fn get_monthly_summary(&self, month: YearMonth) -> Result<MonthlySummary> {
        let _span = tracing::info_span!("get_monthly_summary", %month).entered();
        logged(
            self.db
                .list_transactions(&TransactionFilter::default().month(month))
                .and_then(|txns| {
                    Ok(MonthlySummary {
                        month,
                        totals: Totals::from_transactions(&txns)?,
                    })
                }),
        )
    }

    /// Sum of amounts per category. Categories with no matching
    /// transactions do not appear.
    pub(crate) fn get_category_breakdown(
        &self,
        kind: Option<TransactionType>,
    ) -> Result<BTreeMap<String, Decimal>> {
        let _span = tracing::info_span!("get_category_breakdown", kind = ?kind).entered();
        let filter = TransactionFilter {
            kind,
            ..Default::default()
        };
        logged(self.db.list_transactions(&filter).and_then(|txns| sum_by_category(&txns)))
    }

    // ── Budget limits ─────────────────────────────────────────

    pub(crate) fn set_budget_limit(
        &self,
        category: &str,
        limit_amount: Decimal,
        month: YearMonth,
    ) -> Result<i64> {
        let _span =
            tracing::info_span!("set_budget_limit", category, %limit_amount, %month).entered();
        logged(self.store_budget_limit(category, limit_amount, month))
    }

    fn store_budget_limit(
        &self,
        category: &str,
        limit_amount: Decimal,
        month: YearMonth,
    ) -> Result<i64> {
        validate_amount(limit_amount, "Budget limit")?;
        let category = self.resolve_category(TransactionType::Expense, category)?;
        self.db
            .set_budget_limit(&BudgetLimit::new(category, limit_amount, month))
    }

    /// Every limit in `month` (default: the current month) whose category
    /// spent more than the limit, in limit order. Empty means everything is
    /// within budget.
    pub(crate) fn check_budget_exceeded(&self, month: Option<YearMonth>) -> Result<Vec<Overage>> {
        let month = month.unwrap_or_else(YearMonth::current);
        let _span = tracing::info_span!("check_budget_exceeded", %month).entered();
        let result = self.find_overages(month);
        if let Ok(overages) = &result {
            for o in overages {
                tracing::warn!(
                    category = %o.category,
                    limit = %o.limit_amount,
                    actual = %o.actual_amount,
                    "budget exceeded"
                );
            }
        }
        logged(result)
    }

    fn find_overages(&self, month: YearMonth) -> Result<Vec<Overage>> {
        let limits = self.db.get_budget_limits(Some(month))?;
        if limits.is_empty() {
            return Ok(Vec::new());
        }

        let expenses = self.db.list_transactions(
            &TransactionFilter::default()
                .kind(TransactionType::Expense)
                .month(month),
        )?;
        let spent = sum_by_category(&expenses)?;

        Ok(limits
            .into_iter()
            .filter_map(|limit| {
                let actual = spent.get(&limit.category).copied().unwrap_or_default();
                (actual > limit.limit_amount).then(|| Overage {
                    overage: actual - limit.limit_amount,
                    actual_amount: actual,
                    limit_amount: limit.limit_amount,
                    category: limit.category,
                })
            })
            .collect())
    }
}

/// Sum of amounts per category, in category order.
pub(crate) fn sum_by_category(txns: &[Transaction]) -> Result<BTreeMap<String, Decimal>> {
    let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in txns {
        let sum = sums.entry(txn.category.clone()).or_default();
        *sum = checked_add(*sum, txn.amount)?;
    }
    Ok(sums)
}

/// Largest single amount accepted: one trillion.
pub(crate) const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Amounts must be positive, at most [`MAX_AMOUNT`] and expressible in cents.
fn validate_amount(amount: Decimal, what: &str) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!("{what} must be positive")));
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(LedgerError::validation(format!(
            "{what} cannot exceed {MAX_AMOUNT}"
        )));
    }
    if amount.normalize().scale() > 2 {
        return Err(LedgerError::validation(format!(
            "{what} cannot have more than 2 decimal places"
        )));
    }
    Ok(())
}

/// Emit the outcome of an operation inside its span.
fn logged<T>(result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => tracing::info!(outcome = "ok", "operation completed"),
        Err(e) if e.is_validation() => {
            tracing::warn!(outcome = "rejected", error = %e, "operation rejected")
        }
        Err(e) => tracing::error!(outcome = "failed", error = %e, "operation failed"),
    }
    result
}
