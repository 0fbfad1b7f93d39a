//! Outlay Core Library
//!
//! Shared functionality for the Outlay expense tracker:
//! - SQLite ledger with pooled access and migrations
//! - CSV import for expense files
//! - Time-range selection and axis label formatting
//! - Feature vector construction and amount normalization
//! - Pluggable inference backends over a pre-trained forecast model
//! - The forecast pipeline turning history windows into per-entry
//!   predictions

pub mod db;
pub mod error;
pub mod features;
pub mod forecast;
pub mod import;
pub mod inference;
pub mod models;
pub mod range;

pub use db::Database;
pub use error::{Error, Result};
pub use features::{FeatureBuilder, FeatureVector, FEATURE_LEN};
pub use forecast::{ExpenseHistory, ForecastStrategy, Forecaster};
pub use inference::{
    ForecastSession, InferenceBackend, MockBackend, ModelMetadata, DEFAULT_SCALE,
};
pub use models::{ExpenseRecord, NewExpense, PredictionRecord, StoredPrediction};
pub use range::{LabelStyle, RangeWindow, TimeRange};
