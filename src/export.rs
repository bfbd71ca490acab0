use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

const HEADER: [&str; 7] = [
    "id",
    "date",
    "type",
    "category",
    "amount",
    "description",
    "created_at",
];

/// Write `txns` as CSV to `path`. Returns the number of rows written.
pub(crate) fn export_to_csv(path: &Path, txns: &[Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_csv(file, txns)
}

pub(crate) fn write_csv<W: Write>(writer: W, txns: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for txn in txns {
        wtr.write_record([
            txn.id.map(|id| id.to_string()).unwrap_or_default(),
            txn.date.to_string(),
            txn.kind.as_str().to_string(),
            txn.category.clone(),
            txn.amount.to_string(),
            txn.description.clone().unwrap_or_default(),
            txn.created_at.to_rfc3339(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(txns.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::TransactionType;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<Transaction> {
        let mut food = Transaction::new(
            "2024-01-16".parse().unwrap(),
            dec!(42.99),
            "Food".into(),
            Some("Lunch, with \"friends\"".into()),
            TransactionType::Expense,
        );
        food.id = Some(2);
        let mut salary = Transaction::new(
            "2024-01-15".parse().unwrap(),
            dec!(3000.00),
            "Salary".into(),
            None,
            TransactionType::Income,
        );
        salary.id = Some(1);
        vec![salary, food]
    }

    #[test]
    fn test_write_csv_rows() {
        let mut out = Vec::new();
        let count = write_csv(&mut out, &sample()).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,date,type,category,amount,description,created_at");
        assert!(lines[1].starts_with("1,2024-01-15,income,Salary,3000.00,,"));
        assert!(lines[2].starts_with("2,2024-01-16,expense,Food,42.99,\"Lunch, with \"\"friends\"\"\","));
    }

    #[test]
    fn test_export_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        export_to_csv(&path, &sample()).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[1][3], "Food");
        assert_eq!(&records[1][5], "Lunch, with \"friends\"");
    }

    #[test]
    fn test_export_empty_writes_header_only() {
        let mut out = Vec::new();
        assert_eq!(write_csv(&mut out, &[]).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
