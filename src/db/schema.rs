pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    date         TEXT NOT NULL,
    amount       TEXT NOT NULL,
    category     TEXT NOT NULL,
    description  TEXT,
    type         TEXT NOT NULL CHECK (type IN ('income', 'expense')),
    created_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);

CREATE TABLE IF NOT EXISTS budget_limits (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    category      TEXT NOT NULL,
    limit_amount  TEXT NOT NULL,
    month         TEXT NOT NULL,
    UNIQUE(category, month)
);
"#;

/// Stored in `PRAGMA user_version` so the file keeps exactly two tables.
pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
