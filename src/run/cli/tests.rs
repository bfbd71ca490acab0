#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::db::Database;
use crate::models::RecommendedCategories;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn run(db: &Database, list: &[&str]) -> (Result<()>, String) {
    let manager = BudgetManager::new(db, RecommendedCategories::default());
    let mut out = Vec::new();
    let result = run_command(&args(list), &manager, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn seeded() -> Database {
    let db = Database::open_in_memory().unwrap();
    let m = BudgetManager::new(&db, RecommendedCategories::default());
    let d = |s: &str| Some(s.parse().unwrap());
    m.add_income("Salary", dec!(3000), Some("Pay"), d("2024-01-31")).unwrap();
    m.add_expense("Food", dec!(420.75), Some("Groceries"), d("2024-01-10")).unwrap();
    m.add_expense("Transport", dec!(60), None, d("2024-01-12")).unwrap();
    m.add_expense("Food", dec!(35), None, d("2024-02-02")).unwrap();
    m.set_budget_limit("Food", dec!(400), "2024-01".parse().unwrap()).unwrap();
    db
}

#[test]
fn test_flag_value_and_positional() {
    let a = args(&["out.csv", "--month", "2024-01"]);
    assert_eq!(flag_value(&a, "--month").unwrap(), Some("2024-01"));
    assert_eq!(flag_value(&a, "--type").unwrap(), None);
    assert_eq!(positional(&a), Some("out.csv"));

    let b = args(&["--month", "2024-01", "out.csv"]);
    assert_eq!(positional(&b), Some("out.csv"));
    assert_eq!(positional(&args(&["--month", "2024-01"])), None);
}

#[test]
fn test_balance() {
    let db = seeded();
    let (result, out) = run(&db, &["balance"]);
    result.unwrap();
    assert!(out.contains("Total Income:     $3,000.00"));
    assert!(out.contains("Total Expenses:   $515.75"));
    assert!(out.contains("Balance:          $2,484.25"));
}

#[test]
fn test_summary_for_month() {
    let db = seeded();
    let (result, out) = run(&db, &["summary", "2024-01"]);
    result.unwrap();
    assert!(out.contains("Budget Tracker — 2024-01"));
    assert!(out.contains("Expenses:   $480.75"));
    assert!(out.contains("Txns:       3"));
    assert!(out.contains("Spending by Category:"));
    assert!(out.contains("$420.75"));
    assert!(!out.contains("$35.00"));
}

#[test]
fn test_summary_rejects_bad_month() {
    let db = seeded();
    let (result, _) = run(&db, &["summary", "Jan"]);
    assert!(result.is_err());
}

#[test]
fn test_check_reports_overage() {
    let db = seeded();
    let (result, out) = run(&db, &["check", "2024-01"]);
    result.unwrap();
    assert!(out.contains("Food"));
    assert!(out.contains("$400.00"));
    assert!(out.contains("$420.75"));
    assert!(out.contains("$20.75"));

    let (result, out) = run(&db, &["check", "2024-02"]);
    result.unwrap();
    assert!(out.contains("All budgets are within limits for 2024-02"));
}

#[test]
fn test_list_with_filters() {
    let db = seeded();
    let (result, out) = run(&db, &["list", "--type", "expense", "--category", "Food"]);
    result.unwrap();
    assert!(out.contains("Groceries"));
    assert!(out.contains("-$420.75"));
    assert!(out.contains("-$35.00"));
    assert!(!out.contains("Salary"));
    assert!(!out.contains("Transport"));

    let (result, out) = run(&db, &["list", "--month", "2030-01"]);
    result.unwrap();
    assert!(out.contains("No transactions"));
}

#[test]
fn test_list_rejects_bad_type() {
    let db = seeded();
    let (result, _) = run(&db, &["list", "--type", "transfer"]);
    assert!(result.is_err());
}

#[test]
fn test_export_writes_file() {
    let db = seeded();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jan.csv");
    let path_str = path.to_str().unwrap();

    let (result, out) = run(&db, &["export", path_str, "--month", "2024-01"]);
    result.unwrap();
    assert!(out.contains("Exported 3 transactions"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(text.contains("income,Salary,3000"));
}

#[test]
fn test_version_and_help() {
    let db = Database::open_in_memory().unwrap();
    let (result, out) = run(&db, &["--version"]);
    result.unwrap();
    assert!(out.starts_with("budget-tracker "));

    let (result, out) = run(&db, &["help"]);
    result.unwrap();
    assert!(out.contains("Usage: budget-tracker [command]"));
}

#[test]
fn test_unknown_command_fails() {
    let db = Database::open_in_memory().unwrap();
    let (result, out) = run(&db, &["frobnicate"]);
    assert!(result.unwrap_err().to_string().contains("Unknown command: frobnicate"));
    assert!(out.contains("Usage:"));
}

#[test]
fn test_shellexpand() {
    assert_eq!(shellexpand("/tmp/x.csv"), "/tmp/x.csv");
    assert!(!shellexpand("~/x.csv").starts_with('~'));
}

#[test]
fn test_list_date_range() {
    let db = seeded();
    let (result, out) = run(&db, &["list", "--from", "2024-01-11", "--to", "2024-02-02"]);
    result.unwrap();
    assert!(out.contains("Transport"));
    assert!(out.contains("Salary"));
    assert!(out.contains("-$35.00"));
    assert!(!out.contains("Groceries"));

    let (result, _) = run(&db, &["list", "--from", "2024-01-11"]);
    assert!(result.unwrap_err().to_string().contains("used together"));
}

#[test]
fn test_flag_without_value_rejected() {
    let a = args(&["--category", "--month", "2024-01"]);
    let err = flag_value(&a, "--category").unwrap_err();
    assert!(err.to_string().contains("--category needs a value"));
    assert_eq!(flag_value(&a, "--month").unwrap(), Some("2024-01"));
    assert!(flag_value(&args(&["--month"]), "--month").is_err());

    let db = seeded();
    let (result, out) = run(&db, &["list", "--category", "--month", "2024-01"]);
    assert!(result.is_err());
    assert!(!out.contains("No transactions"));
}
