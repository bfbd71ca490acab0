mod schema;

use chrono::NaiveDate;
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::{LedgerError, Result};
use crate::models::*;

/// Optional constraints for [`Database::list_transactions`]; every set field must match.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransactionFilter {
    pub(crate) kind: Option<TransactionType>,
    pub(crate) category: Option<String>,
    pub(crate) month: Option<YearMonth>,
    /// Inclusive on both ends.
    pub(crate) date_range: Option<(NaiveDate, NaiveDate)>,
}

impl TransactionFilter {
    pub(crate) fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub(crate) fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub(crate) fn month(mut self, month: YearMonth) -> Self {
        self.month = Some(month);
        self
    }

    pub(crate) fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let mut db = Self { conn };
        db.initialize()?;
        tracing::info!(path = %path.display(), "database initialized");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create the tables if they are missing and apply pending migrations.
    /// Safe to call on every startup.
    pub(crate) fn initialize(&mut self) -> Result<()> {
        let current: i32 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;

        let tx = self.conn.transaction()?;
        if current == 0 {
            tx.execute_batch(schema::SCHEMA_V1)?;
        } else {
            for &(from_version, sql) in schema::MIGRATIONS {
                if current <= from_version {
                    tx.execute_batch(sql)?;
                }
            }
        }
        if current < schema::CURRENT_VERSION {
            tx.pragma_update(None, "user_version", schema::CURRENT_VERSION)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Flush and close the connection.
    pub(crate) fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| LedgerError::Storage(e))
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        if txn.amount <= Decimal::ZERO {
            return Err(LedgerError::validation(format!(
                "Transaction amount must be positive, got {}",
                txn.amount
            )));
        }
        self.conn.execute(
            "INSERT INTO transactions (date, amount, category, description, type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                txn.date.to_string(),
                txn.amount.to_string(),
                txn.category,
                txn.description,
                txn.kind.as_str(),
                txn.created_at.to_rfc3339(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, kind = txn.kind.as_str(), category = %txn.category, "transaction stored");
        Ok(id)
    }

    pub(crate) fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut sql = String::from(
            "SELECT id, date, amount, category, description, type, created_at
             FROM transactions WHERE 1=1",
        );
        let mut param_values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(kind) = filter.kind {
            sql.push_str(&format!(" AND type = ?{}", param_values.len() + 1));
            param_values.push(Box::new(kind.as_str()));
        }
        if let Some(category) = &filter.category {
            sql.push_str(&format!(" AND category = ?{}", param_values.len() + 1));
            param_values.push(Box::new(category.clone()));
        }
        if let Some(month) = filter.month {
            sql.push_str(&format!(" AND date LIKE ?{}", param_values.len() + 1));
            param_values.push(Box::new(format!("{month}-%")));
        }
        if let Some((start, end)) = filter.date_range {
            if start > end {
                return Err(LedgerError::validation(format!(
                    "Invalid date range: {start} is after {end}"
                )));
            }
            let n = param_values.len();
            sql.push_str(&format!(" AND date BETWEEN ?{} AND ?{}", n + 1, n + 2));
            param_values.push(Box::new(start.to_string()));
            param_values.push(Box::new(end.to_string()));
        }

        sql.push_str(" ORDER BY id ASC");

        let params_ref: Vec<&dyn ToSql> = param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_ref.as_slice(), transaction_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    // ── Budget limits ─────────────────────────────────────────

    /// Insert a limit, replacing the amount of any existing limit for the
    /// same category and month. Returns the row id.
    pub(crate) fn set_budget_limit(&self, limit: &BudgetLimit) -> Result<i64> {
        if limit.limit_amount <= Decimal::ZERO {
            return Err(LedgerError::validation(format!(
                "Budget limit must be positive, got {}",
                limit.limit_amount
            )));
        }
        let month = limit.month.to_string();
        self.conn.execute(
            "INSERT INTO budget_limits (category, limit_amount, month)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(category, month) DO UPDATE SET limit_amount = excluded.limit_amount",
            params![limit.category, limit.limit_amount.to_string(), month],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM budget_limits WHERE category = ?1 AND month = ?2",
            params![limit.category, month],
            |row| row.get(0),
        )?;
        tracing::debug!(id, category = %limit.category, %month, "budget limit stored");
        Ok(id)
    }

    pub(crate) fn get_budget_limits(&self, month: Option<YearMonth>) -> Result<Vec<BudgetLimit>> {
        let (sql, param_values): (&str, Vec<Box<dyn ToSql>>) = if let Some(m) = month {
            (
                "SELECT id, category, limit_amount, month FROM budget_limits
                 WHERE month = ?1 ORDER BY month, category",
                vec![Box::new(m.to_string())],
            )
        } else {
            (
                "SELECT id, category, limit_amount, month FROM budget_limits
                 ORDER BY month, category",
                vec![],
            )
        };

        let params_ref: Vec<&dyn ToSql> = param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params_ref.as_slice(), |row| {
            Ok(BudgetLimit {
                id: Some(row.get(0)?),
                category: row.get(1)?,
                limit_amount: parse_column(row, 2)?,
                month: parse_column(row, 3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: Some(row.get(0)?),
        date: parse_column(row, 1)?,
        amount: parse_column(row, 2)?,
        category: row.get(3)?,
        description: row.get(4)?,
        kind: parse_column(row, 5)?,
        created_at: parse_column(row, 6)?,
    })
}

/// Read a TEXT column and parse it, surfacing bad data as a conversion error.
fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.get(idx)?;
    text.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
