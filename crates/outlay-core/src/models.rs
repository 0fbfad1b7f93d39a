//! Domain models for Outlay

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A recorded expense
///
/// Immutable once persisted. The ledger stores the amount as text; rows
/// whose amount fails to parse are skipped on read, so a materialized
/// record always carries a valid number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new expense to be inserted (before DB insertion)
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    /// Hash for deduplication
    pub import_hash: String,
}

/// One forecast point produced by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub date: NaiveDate,
    pub value: f64,
}

/// A forecast point persisted to the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPrediction {
    pub id: i64,
    pub date: NaiveDate,
    pub value: f64,
    pub created_at: DateTime<Utc>,
}
