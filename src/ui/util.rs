use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::models::YearMonth;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// `part` as a percentage of `total`, one decimal place. Zero when `total` is zero.
pub(crate) fn share_percent(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (part / total * Decimal::ONE_HUNDRED).round_dp(1)
}

/// Parse a typed amount. Accepts a leading `$` and thousand separators.
/// Sign and range checks are left to the budget manager.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal, LedgerError> {
    let trimmed = input.trim();
    let cleaned: String = trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned)
        .map_err(|_| LedgerError::validation(format!("Invalid amount: '{trimmed}'")))
}

/// Parse a `YYYY-MM-DD` date; blank input means "today" and yields `None`.
pub(crate) fn parse_optional_date(input: &str) -> Result<Option<NaiveDate>, LedgerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| LedgerError::validation(format!("Invalid date '{trimmed}' (expected YYYY-MM-DD)")))
}

/// Parse a `YYYY-MM` month; blank input means the current month.
pub(crate) fn parse_month_or_current(input: &str) -> Result<YearMonth, LedgerError> {
    if input.trim().is_empty() {
        Ok(YearMonth::current())
    } else {
        input.parse()
    }
}
