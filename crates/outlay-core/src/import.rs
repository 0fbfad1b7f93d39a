//! CSV import for expense files

use chrono::NaiveDate;
use csv::ReaderBuilder;
use sha2::{Digest, Sha256};
use std::io::Read;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::NewExpense;

/// Generate a unique hash for deduplication
pub fn expense_hash(date: &NaiveDate, amount: f64, category: &str, note: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(amount.to_be_bytes());
    hasher.update(category.as_bytes());
    if let Some(note) = note {
        hasher.update(note.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Parse expense CSV data
///
/// Expected header: `date,amount,category,note` (category and note may be
/// empty). A row whose date or amount fails to parse is skipped with a
/// warning; a bad row never aborts the batch.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<NewExpense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut expenses = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = i + 2; // header is line 1

        let date_str = record.get(0).unwrap_or("");
        let date = match parse_date(date_str) {
            Ok(d) => d,
            Err(_) => {
                warn!(line, raw = %date_str, "Skipping row with unparseable date");
                skipped += 1;
                continue;
            }
        };

        let amount_str = record.get(1).unwrap_or("");
        let amount = match parse_amount(amount_str) {
            Ok(a) => a,
            Err(_) => {
                warn!(line, raw = %amount_str, "Skipping row with unparseable amount");
                skipped += 1;
                continue;
            }
        };

        let category = record
            .get(2)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("uncategorized")
            .to_string();

        let note = record
            .get(3)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let import_hash = expense_hash(&date, amount, &category, note.as_deref());

        expenses.push(NewExpense {
            date,
            amount,
            category,
            note,
            import_hash,
        });
    }

    debug!(parsed = expenses.len(), skipped, "Parsed expense CSV");
    Ok(expenses)
}

/// Parse a date string in various common formats
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    // Try common date formats
    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%d/%m/%Y", // 15/01/2024 (European)
        "%m-%d-%Y", // 01-15-2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}
