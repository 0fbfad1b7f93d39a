//! CSV import command implementation

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use outlay_core::db::Database;
use outlay_core::import::parse_csv;

pub fn cmd_import(db: &Database, file: &Path) -> Result<()> {
    println!("📥 Importing expenses from {}...", file.display());

    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;
    let expenses = parse_csv(csv_file)?;

    println!("   Found {} expenses", expenses.len());

    let mut imported = 0;
    let mut skipped = 0;

    for expense in &expenses {
        match db.insert_expense(expense)? {
            Some(_) => imported += 1,
            None => skipped += 1,
        }
    }

    println!("✅ Import complete!");
    println!("   Imported: {}", imported);
    println!("   Skipped (duplicates): {}", skipped);

    Ok(())
}
