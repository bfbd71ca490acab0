mod budget;
mod config;
mod db;
mod error;
mod export;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};

use budget::BudgetManager;
use config::Config;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::load()?;
    config.ensure_data_dir()?;
    let _log_guard = logging::init(&config.log_path())?;

    let db_path = config.database_path();
    let db = db::Database::open(&db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
    tracing::info!(
        path = %db_path.display(),
        transactions = db.transaction_count()?,
        "budget tracker started"
    );

    let outcome = {
        let manager = BudgetManager::new(&db, config.categories.clone());
        match args.len() {
            0 | 1 => run::as_shell(&manager),
            _ => run::as_cli(&args, &manager),
        }
    };

    db.close().context("Failed to close database")?;
    tracing::info!("budget tracker stopped");
    outcome
}
