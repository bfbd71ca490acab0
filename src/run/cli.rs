use anyhow::Result;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::budget::{sum_by_category, BudgetManager};
use crate::db::TransactionFilter;
use crate::models::{TransactionType, YearMonth};
use crate::ui::util::{format_amount, parse_month_or_current, parse_optional_date, truncate};

pub(crate) fn as_cli(args: &[String], manager: &BudgetManager<'_>) -> Result<()> {
    let stdout = io::stdout();
    run_command(args.get(1..).unwrap_or(&[]), manager, &mut stdout.lock())
}

pub(crate) fn run_command<W: Write>(
    args: &[String],
    manager: &BudgetManager<'_>,
    out: &mut W,
) -> Result<()> {
    let Some(command) = args.first() else {
        print_usage(out)?;
        return Ok(());
    };
    let rest = &args[1..];

    match command.as_str() {
        "balance" | "b" => cli_balance(manager, out),
        "summary" | "s" => cli_summary(rest, manager, out),
        "check" | "c" => cli_check(rest, manager, out),
        "list" | "ls" => cli_list(rest, manager, out),
        "export" => cli_export(rest, manager, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "budget-tracker {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage<W: Write>(out: &mut W) -> Result<()> {
    let lines = [
        "Budget Tracker - local personal finance ledger",
        "",
        "Usage: budget-tracker [command]",
        "",
        "Commands:",
        "  (none)                        Launch the interactive menu",
        "  balance                       Print total income, expenses and balance",
        "  summary [YYYY-MM]             Print a monthly summary (default: current month)",
        "  check [YYYY-MM]               Report budget limits that were exceeded",
        "  list                          List transactions",
        "    --month <YYYY-MM>           Only this month",
        "    --type <income|expense>     Only this type",
        "    --category <name>           Only this category",
        "    --from <YYYY-MM-DD>         From this date (with --to)",
        "    --to <YYYY-MM-DD>           Up to this date, inclusive",
        "  export [path]                 Export transactions to CSV",
        "    --month <YYYY-MM>           Only this month (default: all)",
        "  --help, -h                    Show this help",
        "  --version, -V                 Show version",
    ];
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Value following `--name`, if the flag is present. A flag with no value,
/// or followed directly by another flag, is an error.
fn flag_value<'a>(args: &'a [String], name: &str) -> Result<Option<&'a str>> {
    let Some(pos) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    match args.get(pos + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => anyhow::bail!("{name} needs a value"),
    }
}

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
            continue;
        }
        return Some(arg.as_str());
    }
    None
}

fn cli_balance<W: Write>(manager: &BudgetManager<'_>, out: &mut W) -> Result<()> {
    let totals = manager.get_balance()?;
    writeln!(out, "Total Income:     {}", format_amount(totals.income))?;
    writeln!(out, "Total Expenses:   {}", format_amount(totals.expenses))?;
    writeln!(out, "Balance:          {}", format_amount(totals.balance))?;
    Ok(())
}

fn cli_summary<W: Write>(args: &[String], manager: &BudgetManager<'_>, out: &mut W) -> Result<()> {
    let month = parse_month_or_current(positional(args).unwrap_or(""))?;
    let summary = manager.get_monthly_summary(month)?;
    let totals = summary.totals;

    let expenses = manager.list_transactions(
        &TransactionFilter::default()
            .kind(TransactionType::Expense)
            .month(month),
    )?;
    let spending = sum_by_category(&expenses)?;

    writeln!(out, "Budget Tracker — {month}")?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Income:     {}", format_amount(totals.income))?;
    writeln!(out, "  Expenses:   {}", format_amount(totals.expenses))?;
    writeln!(out, "  Balance:    {}", format_amount(totals.balance))?;
    writeln!(out, "  Txns:       {}", totals.transaction_count)?;

    if !spending.is_empty() {
        writeln!(out)?;
        writeln!(out, "Spending by Category:")?;
        for (name, amount) in &spending {
            writeln!(out, "  {name:<24} {}", format_amount(*amount))?;
        }
    }
    Ok(())
}

fn cli_check<W: Write>(args: &[String], manager: &BudgetManager<'_>, out: &mut W) -> Result<()> {
    let month = parse_month_or_current(positional(args).unwrap_or(""))?;
    let exceeded = manager.check_budget_exceeded(Some(month))?;

    if exceeded.is_empty() {
        writeln!(out, "All budgets are within limits for {month}")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<20} {:>14} {:>14} {:>14}",
        "Category", "Limit", "Spent", "Over"
    )?;
    writeln!(out, "{}", "─".repeat(65))?;
    for o in &exceeded {
        writeln!(
            out,
            "{:<20} {:>14} {:>14} {:>14}",
            truncate(&o.category, 20),
            format_amount(o.limit_amount),
            format_amount(o.actual_amount),
            format_amount(o.overage),
        )?;
    }
    Ok(())
}

fn cli_list<W: Write>(args: &[String], manager: &BudgetManager<'_>, out: &mut W) -> Result<()> {
    let filter = filter_from_args(args)?;
    let txns = manager.list_transactions(&filter)?;
    if txns.is_empty() {
        writeln!(out, "No transactions")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<5} {:<10} {:<8} {:<16} {:>12}  Description",
        "ID", "Date", "Type", "Category", "Amount"
    )?;
    writeln!(out, "{}", "─".repeat(70))?;
    for txn in &txns {
        writeln!(
            out,
            "{:<5} {:<10} {:<8} {:<16} {:>12}  {}",
            txn.id.unwrap_or(0),
            txn.date,
            txn.kind,
            truncate(&txn.category, 16),
            format_amount(txn.signed_amount()),
            truncate(txn.description.as_deref().unwrap_or(""), 30),
        )?;
    }
    Ok(())
}

fn filter_from_args(args: &[String]) -> Result<TransactionFilter> {
    let mut filter = TransactionFilter::default();
    if let Some(m) = flag_value(args, "--month")? {
        filter = filter.month(m.parse::<YearMonth>()?);
    }
    if let Some(t) = flag_value(args, "--type")? {
        filter = filter.kind(t.parse::<TransactionType>()?);
    }
    if let Some(c) = flag_value(args, "--category")? {
        filter = filter.category(c);
    }
    match (flag_value(args, "--from")?, flag_value(args, "--to")?) {
        (Some(from), Some(to)) => {
            let (Some(start), Some(end)) = (parse_optional_date(from)?, parse_optional_date(to)?)
            else {
                anyhow::bail!("--from and --to need a date (YYYY-MM-DD)");
            };
            filter = filter.between(start, end);
        }
        (None, None) => {}
        _ => anyhow::bail!("--from and --to must be used together"),
    }
    Ok(filter)
}

fn cli_export<W: Write>(args: &[String], manager: &BudgetManager<'_>, out: &mut W) -> Result<()> {
    let month = flag_value(args, "--month")?
        .map(|m| m.parse::<YearMonth>())
        .transpose()?;

    let output_path = positional(args)
        .map(shellexpand)
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            let suffix = month.map(|m| format!("-{m}")).unwrap_or_default();
            format!("{home}/budget-export{suffix}.csv")
        });

    let filter = TransactionFilter {
        month,
        ..Default::default()
    };
    let txns = manager.list_transactions(&filter)?;
    let count = crate::export::export_to_csv(&PathBuf::from(&output_path), &txns)?;
    tracing::info!(count, path = %output_path, "transactions exported");

    if count == 0 {
        writeln!(out, "No transactions to export")?;
    } else {
        writeln!(out, "Exported {count} transactions to {output_path}")?;
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests;
