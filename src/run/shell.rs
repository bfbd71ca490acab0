use anyhow::Result;
use std::io::{self, BufRead, Write};

use crate::budget::BudgetManager;
use crate::error::LedgerError;
use crate::models::{checked_add, TransactionType};
use crate::ui::util::{
    format_amount, parse_amount, parse_month_or_current, parse_optional_date, share_percent,
};

const RULE_WIDTH: usize = 50;

/// Run the interactive menu on stdin/stdout until the user picks Exit.
pub(crate) fn as_shell(manager: &BudgetManager<'_>) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(manager, stdin.lock(), stdout.lock()).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    AddIncome,
    AddExpense,
    ViewBalance,
    MonthlySummary,
    CategoryBreakdown,
    SetBudgetLimit,
    CheckBudget,
    Exit,
}

impl MenuChoice {
    fn all() -> &'static [MenuChoice] {
        &[
            Self::AddIncome,
            Self::AddExpense,
            Self::ViewBalance,
            Self::MonthlySummary,
            Self::CategoryBreakdown,
            Self::SetBudgetLimit,
            Self::CheckBudget,
            Self::Exit,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::AddIncome => "Add Income",
            Self::AddExpense => "Add Expense",
            Self::ViewBalance => "View Balance",
            Self::MonthlySummary => "View Monthly Summary",
            Self::CategoryBreakdown => "View Category Breakdown",
            Self::SetBudgetLimit => "Set Budget Limit",
            Self::CheckBudget => "Check Budget Exceeded",
            Self::Exit => "Exit",
        }
    }

    /// Menu entries are numbered from 1.
    fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::all().get(n.checked_sub(1)?).copied()
    }
}

pub(crate) struct Shell<'a, R, W> {
    manager: &'a BudgetManager<'a>,
    input: R,
    output: W,
    eof: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub(crate) fn new(manager: &'a BudgetManager<'a>, input: R, output: W) -> Self {
        Self {
            manager,
            input,
            output,
            eof: false,
        }
    }

    pub(crate) fn run(&mut self) -> Result<()> {
        tracing::info!("shell started");

        loop {
            self.print_menu()?;
            let line = self.prompt("\nEnter your choice (1-8): ")?;
            if self.eof && line.is_empty() {
                break;
            }

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "✗ Invalid choice. Please try again.")?;
                continue;
            };

            let outcome = match choice {
                MenuChoice::AddIncome => self.add_transaction(TransactionType::Income),
                MenuChoice::AddExpense => self.add_transaction(TransactionType::Expense),
                MenuChoice::ViewBalance => self.view_balance(),
                MenuChoice::MonthlySummary => self.view_monthly_summary(),
                MenuChoice::CategoryBreakdown => self.view_category_breakdown(),
                MenuChoice::SetBudgetLimit => self.set_budget_limit(),
                MenuChoice::CheckBudget => self.check_budget_exceeded(),
                MenuChoice::Exit => {
                    writeln!(self.output, "\n✓ Thank you for using Budget Tracker!")?;
                    break;
                }
            };

            if let Err(err) = outcome {
                // Ledger errors are reported and the menu comes back;
                // anything else (a broken terminal) ends the session.
                let err = err.downcast::<LedgerError>()?;
                self.report(&err)?;
            }

            if self.eof {
                break;
            }
        }

        tracing::info!("shell closed");
        Ok(())
    }

    // ── Actions ───────────────────────────────────────────────

    fn add_transaction(&mut self, kind: TransactionType) -> Result<()> {
        writeln!(self.output, "\n--- Add {} ---", kind.label())?;
        writeln!(
            self.output,
            "Valid categories: {}",
            self.manager.valid_categories(kind).join(", ")
        )?;

        let category = self.prompt("Enter category: ")?;
        let amount = parse_amount(&self.prompt("Enter amount: ")?)?;
        let description = self.prompt("Enter description: ")?;
        let date =
            parse_optional_date(&self.prompt("Enter date (YYYY-MM-DD) or press Enter for today: ")?)?;

        match kind {
            TransactionType::Income => {
                self.manager
                    .add_income(&category, amount, Some(&description), date)?;
            }
            TransactionType::Expense => {
                self.manager
                    .add_expense(&category, amount, Some(&description), date)?;
            }
        }
        writeln!(self.output, "✓ {} added successfully!", kind.label())?;
        Ok(())
    }

    fn view_balance(&mut self) -> Result<()> {
        let totals = self.manager.get_balance()?;

        self.print_header("Current Balance")?;
        writeln!(self.output, "Total Income:     {}", format_amount(totals.income))?;
        writeln!(self.output, "Total Expenses:   {}", format_amount(totals.expenses))?;
        writeln!(self.output, "Balance:          {}", format_amount(totals.balance))?;
        Ok(())
    }

    fn view_monthly_summary(&mut self) -> Result<()> {
        let month = parse_month_or_current(
            &self.prompt("Enter month (YYYY-MM) or press Enter for current: ")?,
        )?;
        let summary = self.manager.get_monthly_summary(month)?;
        let totals = summary.totals;

        self.print_header(&format!("Monthly Summary - {}", summary.month))?;
        writeln!(self.output, "Income:           {}", format_amount(totals.income))?;
        writeln!(self.output, "Expenses:         {}", format_amount(totals.expenses))?;
        writeln!(self.output, "Balance:          {}", format_amount(totals.balance))?;
        writeln!(self.output, "Transactions:     {}", totals.transaction_count)?;
        Ok(())
    }

    fn view_category_breakdown(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Category Breakdown ---")?;
        let kinds = TransactionType::all();
        for (i, kind) in kinds.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, kind.label())?;
        }
        writeln!(self.output, "{}. All", kinds.len() + 1)?;

        let answer = self.prompt("Select type: ")?;
        let kind = match answer.parse::<usize>() {
            Ok(n) if (1..=kinds.len()).contains(&n) => Some(kinds[n - 1]),
            Ok(n) if n == kinds.len() + 1 => None,
            _ => return Err(LedgerError::validation(format!("Invalid choice: '{answer}'")).into()),
        };
        let title = kind.map_or("All", |k| k.label());

        let breakdown = self.manager.get_category_breakdown(kind)?;

        self.print_header(&format!("Category Breakdown - {title}"))?;
        if breakdown.is_empty() {
            writeln!(self.output, "No transactions found")?;
            return Ok(());
        }

        let total = breakdown
            .values()
            .try_fold(rust_decimal::Decimal::ZERO, |acc, v| checked_add(acc, *v))?;
        let mut rows: Vec<_> = breakdown.into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        for (category, amount) in &rows {
            writeln!(
                self.output,
                "{category:<20} {:>14} ({:>5}%)",
                format_amount(*amount),
                share_percent(*amount, total)
            )?;
        }
        writeln!(self.output, "\n{:<20} {:>14}", "Total", format_amount(total))?;
        Ok(())
    }

    fn set_budget_limit(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Set Budget Limit ---")?;
        let category = self.prompt("Enter expense category: ")?;
        let limit = parse_amount(&self.prompt("Enter budget limit: ")?)?;
        let month = parse_month_or_current(
            &self.prompt("Enter month (YYYY-MM) or press Enter for current: ")?,
        )?;

        self.manager.set_budget_limit(&category, limit, month)?;
        writeln!(
            self.output,
            "✓ Budget limit set: {} {} for {month}",
            category.trim(),
            format_amount(limit)
        )?;
        Ok(())
    }

    fn check_budget_exceeded(&mut self) -> Result<()> {
        let month = parse_month_or_current(
            &self.prompt("Enter month (YYYY-MM) or press Enter for current: ")?,
        )?;
        let exceeded = self.manager.check_budget_exceeded(Some(month))?;

        self.print_header(&format!("Budget Check - {month}"))?;
        if exceeded.is_empty() {
            writeln!(self.output, "✓ All budgets are within limits!")?;
            return Ok(());
        }

        writeln!(self.output, "⚠ Budget Exceeded:")?;
        for item in &exceeded {
            writeln!(self.output, "\n  Category: {}", item.category)?;
            writeln!(self.output, "  Limit:    {}", format_amount(item.limit_amount))?;
            writeln!(self.output, "  Spent:    {}", format_amount(item.actual_amount))?;
            writeln!(self.output, "  Exceeded: {}", format_amount(item.overage))?;
        }
        Ok(())
    }

    // ── Plumbing ──────────────────────────────────────────────

    fn report(&mut self, err: &LedgerError) -> Result<()> {
        if err.is_validation() {
            tracing::warn!(error = %err, "input rejected");
            writeln!(self.output, "✗ Error: {err}")?;
        } else {
            tracing::error!(error = %err, "operation failed");
            writeln!(self.output, "✗ An error occurred: {err}")?;
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        self.print_header("PERSONAL BUDGET TRACKER")?;
        writeln!(self.output)?;
        for (i, choice) in MenuChoice::all().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, choice.label())?;
        }
        Ok(())
    }

    fn print_header(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "\n{}", "=".repeat(RULE_WIDTH))?;
        writeln!(self.output, "  {text}")?;
        writeln!(self.output, "{}", "=".repeat(RULE_WIDTH))?;
        Ok(())
    }

    /// Print `label` and read one trimmed line. End of input yields an
    /// empty string and marks the session finished.
    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.eof = true;
        }
        Ok(line.trim().to_string())
    }
}
