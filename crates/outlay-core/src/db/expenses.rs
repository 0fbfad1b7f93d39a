//! Expense ledger operations

use chrono::NaiveDate;
use rusqlite::params;
use tracing::warn;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::forecast::ExpenseHistory;
use crate::models::{ExpenseRecord, NewExpense};

impl Database {
    /// Insert an expense (skips duplicates based on import_hash)
    pub fn insert_expense(&self, expense: &NewExpense) -> Result<Option<i64>> {
        let conn = self.conn()?;

        // Check for duplicate
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM expenses WHERE import_hash = ?",
                params![expense.import_hash],
                |row| row.get(0),
            )
            .ok();

        if existing.is_some() {
            return Ok(None); // Duplicate, skip
        }

        conn.execute(
            r#"
            INSERT INTO expenses (date, amount, category, note, import_hash)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                expense.date.to_string(),
                expense.amount.to_string(),
                expense.category,
                expense.note,
                expense.import_hash,
            ],
        )?;

        Ok(Some(conn.last_insert_rowid()))
    }

    /// List expenses, oldest first. Rows whose amount or date fails to
    /// parse are skipped with a warning.
    pub fn list_expenses(&self, limit: Option<i64>) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;

        let sql = match limit {
            Some(_) => {
                "SELECT id, date, amount, category, note, created_at
                 FROM expenses ORDER BY date ASC, id ASC LIMIT ?"
            }
            None => {
                "SELECT id, date, amount, category, note, created_at
                 FROM expenses ORDER BY date ASC, id ASC"
            }
        };

        let mut stmt = conn.prepare(sql)?;
        let mapper = |row: &rusqlite::Row<'_>| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
            ))
        };
        let rows: Vec<_> = match limit {
            Some(n) => stmt
                .query_map(params![n], mapper)?
                .collect::<std::result::Result<_, _>>()?,
            None => stmt
                .query_map([], mapper)?
                .collect::<std::result::Result<_, _>>()?,
        };

        let mut expenses = Vec::with_capacity(rows.len());
        for (id, date_raw, amount_raw, category, note, created_raw) in rows {
            let date = match NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => {
                    warn!(id, raw = %date_raw, "Skipping expense with unparseable date");
                    continue;
                }
            };
            let amount = match amount_raw.parse::<f64>() {
                Ok(a) => a,
                Err(_) => {
                    warn!(id, raw = %amount_raw, "Skipping expense with unparseable amount");
                    continue;
                }
            };
            expenses.push(ExpenseRecord {
                id,
                date,
                amount,
                category,
                note,
                created_at: parse_datetime(&created_raw),
            });
        }

        Ok(expenses)
    }

    /// Run one amount-column query and parse the results, skipping rows
    /// that do not hold a number
    fn collect_amounts(
        &self,
        sql: &str,
        query_params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<f64>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let raw: Vec<String> = stmt
            .query_map(query_params, |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<_, _>>()?;

        let mut amounts = Vec::with_capacity(raw.len());
        for value in raw {
            match value.parse::<f64>() {
                Ok(amount) => amounts.push(amount),
                Err(_) => warn!(raw = %value, "Skipping expense with unparseable amount"),
            }
        }
        Ok(amounts)
    }
}

impl ExpenseHistory for Database {
    fn all_amounts(&self) -> Result<Vec<f64>> {
        self.amounts_in_window(None, None)
    }

    fn amounts_in_window(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<f64>> {
        // Build dynamic WHERE clause
        let mut conditions = Vec::new();
        let mut bounds: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = start {
            conditions.push("date >= ?");
            bounds.push(Box::new(start.to_string()));
        }
        if let Some(end) = end {
            conditions.push("date <= ?");
            bounds.push(Box::new(end.to_string()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT amount FROM expenses {} ORDER BY date ASC, id ASC",
            where_clause
        );

        let params_refs: Vec<&dyn rusqlite::ToSql> = bounds.iter().map(|p| p.as_ref()).collect();
        self.collect_amounts(&sql, params_refs.as_slice())
    }

    fn latest_amounts(&self, limit: u32) -> Result<Vec<f64>> {
        let params_refs: [&dyn rusqlite::ToSql; 1] = [&limit];
        self.collect_amounts(
            "SELECT amount FROM expenses ORDER BY date DESC, id DESC LIMIT ?",
            &params_refs,
        )
    }
}
