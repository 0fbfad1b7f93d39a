//! Persisted forecast points

use chrono::NaiveDate;
use rusqlite::params;
use tracing::warn;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{PredictionRecord, StoredPrediction};

impl Database {
    /// Persist one forecast point
    pub fn insert_prediction(&self, record: &PredictionRecord) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO predictions (value, date) VALUES (?, ?)",
            params![record.value.to_string(), record.date.to_string()],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// All persisted forecast points, newest first. Rows that fail to
    /// parse are skipped with a warning.
    pub fn list_predictions(&self) -> Result<Vec<StoredPrediction>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, value, date, created_at
             FROM predictions ORDER BY created_at DESC, id DESC",
        )?;
        let rows: Vec<(i64, String, String, String)> = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<std::result::Result<_, _>>()?;

        let mut predictions = Vec::with_capacity(rows.len());
        for (id, value_raw, date_raw, created_raw) in rows {
            let value = match value_raw.parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    warn!(id, raw = %value_raw, "Skipping prediction with unparseable value");
                    continue;
                }
            };
            let date = match NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => {
                    warn!(id, raw = %date_raw, "Skipping prediction with unparseable date");
                    continue;
                }
            };
            predictions.push(StoredPrediction {
                id,
                value,
                date,
                created_at: parse_datetime(&created_raw),
            });
        }

        Ok(predictions)
    }
}
