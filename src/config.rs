//! Where the ledger lives on disk and which categories are suggested.
//!
//! The data directory resolves in this order:
//!
//! 1. `BUDGET_TRACKER_DATA_DIR` (explicit override)
//! 2. The platform data directory from [`directories::ProjectDirs`]
//!
//! `BUDGET_TRACKER_INCOME_CATEGORIES` and `BUDGET_TRACKER_EXPENSE_CATEGORIES`
//! replace the recommended category lists with comma-separated names.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::models::{RecommendedCategories, TransactionType};

pub(crate) const DATA_DIR_ENV: &str = "BUDGET_TRACKER_DATA_DIR";
pub(crate) const INCOME_CATEGORIES_ENV: &str = "BUDGET_TRACKER_INCOME_CATEGORIES";
pub(crate) const EXPENSE_CATEGORIES_ENV: &str = "BUDGET_TRACKER_EXPENSE_CATEGORIES";

const DATABASE_FILE: &str = "budget.db";
const LOG_FILE: &str = "budget_app.log";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    data_dir: PathBuf,
    pub(crate) categories: RecommendedCategories,
}

impl Config {
    /// Resolve configuration from the environment.
    pub(crate) fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup` instead of the process environment.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = match lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            Some(custom) => PathBuf::from(custom),
            None => default_data_dir()?,
        };

        let defaults = RecommendedCategories::default();
        let income = lookup(INCOME_CATEGORIES_ENV)
            .map(|v| split_list(&v))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| defaults.for_kind(TransactionType::Income).to_vec());
        let expense = lookup(EXPENSE_CATEGORIES_ENV)
            .map(|v| split_list(&v))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| defaults.for_kind(TransactionType::Expense).to_vec());

        Ok(Self {
            data_dir,
            categories: RecommendedCategories::new(income, expense),
        })
    }

    /// Configuration rooted at `data_dir` with default categories.
    #[cfg(test)]
    pub(crate) fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            categories: RecommendedCategories::default(),
        }
    }

    pub(crate) fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    /// Create the data directory if it does not exist yet.
    pub(crate) fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budget-tracker", "BudgetTracker")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
