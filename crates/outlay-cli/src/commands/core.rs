//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_add` - Record a single expense
//! - `cmd_list` - List recorded expenses

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use outlay_core::db::Database;
use outlay_core::import::expense_hash;
use outlay_core::models::NewExpense;

use super::truncate;

/// Open the database, creating it and its schema if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path.to_str().unwrap();
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Import expenses: outlay import --file expenses.csv");
    println!("  2. Forecast the week ahead: outlay forecast --range week");

    Ok(())
}

pub fn cmd_add(
    db: &Database,
    date: Option<&str>,
    amount: f64,
    category: &str,
    note: Option<&str>,
) -> Result<()> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)")?,
        None => Utc::now().date_naive(),
    };

    let expense = NewExpense {
        import_hash: expense_hash(&date, amount, category, note),
        date,
        amount,
        category: category.to_string(),
        note: note.map(|s| s.to_string()),
    };

    match db.insert_expense(&expense)? {
        Some(id) => {
            println!("✅ Recorded expense {}:", id);
            println!(
                "   {} │ ${:.2} │ {}",
                expense.date, expense.amount, expense.category
            );
        }
        None => {
            println!("Already recorded; an identical expense exists.");
        }
    }

    Ok(())
}

pub fn cmd_list(db: &Database, limit: i64) -> Result<()> {
    let mut expenses = db.list_expenses(None)?;

    if expenses.is_empty() {
        println!("No expenses found. Import some with:");
        println!("  outlay import --file expenses.csv");
        return Ok(());
    }

    let total = expenses.len();
    let keep = limit.max(0) as usize;
    if total > keep {
        // Keep the most recent rows, still oldest first for display
        expenses.drain(..total - keep);
    }

    println!();
    println!("📝 Expense Ledger ({} total)", total);
    println!("   ─────────────────────────────────────────────────────────────");

    for expense in &expenses {
        let note = expense.note.as_deref().unwrap_or("");
        println!(
            "   {} │ {:>10} │ {:<14} │ {}",
            expense.date,
            format!("${:.2}", expense.amount),
            truncate(&expense.category, 14),
            truncate(note, 30)
        );
    }

    if total > keep {
        println!();
        println!(
            "   Showing the last {} entries. Use --limit to see more.",
            keep
        );
    }

    Ok(())
}
