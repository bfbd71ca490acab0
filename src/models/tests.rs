#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::LedgerError;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn make_txn(amount: Decimal, kind: TransactionType) -> Transaction {
    Transaction::new(date("2024-01-15"), amount, "Food".into(), None, kind)
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_income() {
    let txn = make_txn(dec!(100.00), TransactionType::Income);
    assert!(txn.is_income());
    assert_eq!(txn.signed_amount(), dec!(100.00));
}

#[test]
fn test_expense() {
    let txn = make_txn(dec!(50.00), TransactionType::Expense);
    assert!(!txn.is_income());
    assert_eq!(txn.signed_amount(), dec!(-50.00));
}

#[test]
fn test_transaction_new_defaults() {
    let txn = make_txn(dec!(1), TransactionType::Income);
    assert!(txn.id.is_none());
    assert!(txn.description.is_none());
    assert_eq!(txn.category, "Food");
}

// ── TransactionType ───────────────────────────────────────────

#[test]
fn test_transaction_type_parse() {
    assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
    assert_eq!("EXPENSE".parse::<TransactionType>().unwrap(), TransactionType::Expense);
    assert_eq!(" Income ".parse::<TransactionType>().unwrap(), TransactionType::Income);
    assert!("transfer".parse::<TransactionType>().unwrap_err().is_validation());
}

#[test]
fn test_transaction_type_roundtrip() {
    for t in TransactionType::all() {
        let s = t.as_str();
        let back: TransactionType = s.parse().unwrap();
        assert_eq!(*t, back, "Roundtrip failed for {s}");
    }
}

#[test]
fn test_transaction_type_display() {
    assert_eq!(format!("{}", TransactionType::Income), "income");
    assert_eq!(TransactionType::Expense.label(), "Expense");
}

// ── YearMonth ─────────────────────────────────────────────────

#[test]
fn test_year_month_parse_and_display() {
    let m: YearMonth = "2024-01".parse().unwrap();
    assert_eq!(m, YearMonth::new(2024, 1).unwrap());
    assert_eq!(m.to_string(), "2024-01");
}

#[test]
fn test_year_month_rejects_malformed() {
    for bad in ["", "2024", "2024-1", "24-01", "2024-13", "2024-00", "2024/01", "2024-01-15", "abcd-ef"] {
        let err = bad.parse::<YearMonth>().unwrap_err();
        assert!(err.is_validation(), "expected validation error for {bad:?}");
    }
}

#[test]
fn test_year_month_new_bounds() {
    assert!(YearMonth::new(2024, 12).is_ok());
    assert!(YearMonth::new(2024, 13).unwrap_err().is_validation());
    assert!(YearMonth::new(0, 1).unwrap_err().is_validation());
}

#[test]
fn test_year_month_of_and_ordering() {
    let m = YearMonth::of(date("2023-12-25"));
    assert_eq!(m.to_string(), "2023-12");
    assert!(m < "2024-01".parse::<YearMonth>().unwrap());
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_totals_empty_is_zero() {
    let totals = Totals::from_transactions(&Vec::<Transaction>::new()).unwrap();
    assert_eq!(totals.income, Decimal::ZERO);
    assert_eq!(totals.expenses, Decimal::ZERO);
    assert_eq!(totals.balance, Decimal::ZERO);
    assert_eq!(totals.transaction_count, 0);
}

#[test]
fn test_totals_exact_decimal_sum() {
    // 0.1 + 0.2 drifts in binary floating point
    let txns = vec![
        make_txn(dec!(0.10), TransactionType::Income),
        make_txn(dec!(0.20), TransactionType::Income),
        make_txn(dec!(0.30), TransactionType::Expense),
    ];
    let totals = Totals::from_transactions(&txns).unwrap();
    assert_eq!(totals.income, dec!(0.30));
    assert_eq!(totals.expenses, dec!(0.30));
    assert_eq!(totals.balance, Decimal::ZERO);
    assert_eq!(totals.transaction_count, 3);
}

#[test]
fn test_totals_overflow_is_an_error() {
    let txns = vec![
        make_txn(Decimal::MAX, TransactionType::Income),
        make_txn(Decimal::MAX, TransactionType::Income),
    ];
    let err = Totals::from_transactions(&txns).unwrap_err();
    assert!(matches!(err, LedgerError::Overflow));

    let txns = vec![
        make_txn(Decimal::MAX, TransactionType::Expense),
        make_txn(Decimal::MAX, TransactionType::Expense),
    ];
    assert!(Totals::from_transactions(&txns).is_err());
}

// ── BudgetLimit ───────────────────────────────────────────────

#[test]
fn test_budget_limit_new() {
    let limit = BudgetLimit::new("Food".into(), dec!(400), "2024-01".parse().unwrap());
    assert!(limit.id.is_none());
    assert_eq!(limit.category, "Food");
    assert_eq!(limit.month.to_string(), "2024-01");
    assert_eq!(limit.limit_amount, dec!(400));
}

// ── RecommendedCategories ─────────────────────────────────────

#[test]
fn test_recommended_defaults() {
    let cats = RecommendedCategories::default();
    assert!(cats.for_kind(TransactionType::Income).iter().any(|c| c == "Salary"));
    assert!(cats.for_kind(TransactionType::Expense).iter().any(|c| c == "Food"));
    assert_eq!(cats.for_kind(TransactionType::Expense).len(), 7);
}

#[test]
fn test_recommended_find_is_case_insensitive() {
    let cats = RecommendedCategories::default();
    assert_eq!(cats.find(TransactionType::Expense, "food"), Some("Food"));
    assert_eq!(cats.find(TransactionType::Income, "SALARY"), Some("Salary"));
    assert_eq!(cats.find(TransactionType::Income, "Food"), None);
    assert_eq!(cats.find(TransactionType::Expense, "Groceries"), None);
}
