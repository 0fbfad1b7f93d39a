//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::NaiveDate;
use outlay_core::db::Database;
use outlay_core::import::expense_hash;
use outlay_core::models::NewExpense;

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn seed_expense(db: &Database, date: &str, amount: f64, category: &str) -> i64 {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let expense = NewExpense {
        import_hash: expense_hash(&date, amount, category, None),
        date,
        amount,
        category: category.to_string(),
        note: None,
    };
    db.insert_expense(&expense).unwrap().unwrap()
}

/// Write a loadable model artifact with library-initialized weights
fn write_test_model(dir: &std::path::Path) {
    use candle_core::{DType, Device};
    use candle_nn::{VarBuilder, VarMap};
    use outlay_core::inference::{ModelMetadata, METADATA_FILE, WEIGHTS_FILE};

    let meta = ModelMetadata::default();
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    candle_nn::linear(meta.input_len, meta.hidden_len, vb.pp("hidden")).unwrap();
    candle_nn::linear(meta.hidden_len, 1, vb.pp("output")).unwrap();

    varmap.save(dir.join(WEIGHTS_FILE)).unwrap();
    meta.save(&dir.join(METADATA_FILE)).unwrap();
}

// ========== Core Command Tests ==========

#[test]
fn test_cmd_init() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let result = commands::cmd_init(&db_path);
    assert!(result.is_ok());

    // Verify database was created with its schema in place
    assert!(db_path.exists());
    let db = Database::new(db_path.to_str().unwrap()).unwrap();
    assert!(db.list_expenses(None).unwrap().is_empty());
}

#[test]
fn test_open_db_creates_file() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let result = commands::open_db(&db_path);
    assert!(result.is_ok());
    assert!(db_path.exists());
}

#[test]
fn test_cmd_add_records_expense() {
    let db = setup_test_db();

    let result = commands::cmd_add(&db, Some("2025-03-05"), 42.50, "groceries", Some("weekly"));
    assert!(result.is_ok());

    let expenses = db.list_expenses(None).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, 42.50);
    assert_eq!(expenses[0].category, "groceries");
    assert_eq!(expenses[0].note.as_deref(), Some("weekly"));
}

#[test]
fn test_cmd_add_defaults_to_today() {
    let db = setup_test_db();

    commands::cmd_add(&db, None, 9.99, "coffee", None).unwrap();

    let expenses = db.list_expenses(None).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].date, chrono::Utc::now().date_naive());
}

#[test]
fn test_cmd_add_duplicate_is_skipped() {
    let db = setup_test_db();

    commands::cmd_add(&db, Some("2025-03-05"), 42.50, "groceries", None).unwrap();
    let result = commands::cmd_add(&db, Some("2025-03-05"), 42.50, "groceries", None);
    assert!(result.is_ok());

    let expenses = db.list_expenses(None).unwrap();
    assert_eq!(expenses.len(), 1);
}

#[test]
fn test_cmd_add_invalid_date() {
    let db = setup_test_db();

    let result = commands::cmd_add(&db, Some("05/03/2025"), 10.0, "misc", None);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Invalid --date format"));
}

#[test]
fn test_cmd_list_empty() {
    let db = setup_test_db();
    let result = commands::cmd_list(&db, 20);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_list_with_data() {
    let db = setup_test_db();
    seed_expense(&db, "2025-03-01", 12.50, "groceries");
    seed_expense(&db, "2025-03-02", 40.00, "transport");

    let result = commands::cmd_list(&db, 20);
    assert!(result.is_ok());

    let result = commands::cmd_list(&db, 1);
    assert!(result.is_ok());
}

// ========== Import Command Tests ==========

#[test]
fn test_cmd_import() {
    use std::io::Write;
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("expenses.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "date,amount,category,note").unwrap();
    writeln!(file, "2025-03-01,12.50,groceries,weekly shop").unwrap();
    writeln!(file, "2025-03-02,40.00,transport,").unwrap();
    writeln!(file, "2025-03-03,9.99,entertainment,streaming").unwrap();
    drop(file);

    let db = setup_test_db();
    let result = commands::cmd_import(&db, &csv_path);
    assert!(result.is_ok());

    let expenses = db.list_expenses(None).unwrap();
    assert_eq!(expenses.len(), 3);
    assert_eq!(expenses[0].category, "groceries");
}

#[test]
fn test_cmd_import_twice_skips_duplicates() {
    use std::io::Write;
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("expenses.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "date,amount,category,note").unwrap();
    writeln!(file, "2025-03-01,12.50,groceries,").unwrap();
    drop(file);

    let db = setup_test_db();
    commands::cmd_import(&db, &csv_path).unwrap();
    commands::cmd_import(&db, &csv_path).unwrap();

    let expenses = db.list_expenses(None).unwrap();
    assert_eq!(expenses.len(), 1);
}

#[test]
fn test_cmd_import_missing_file() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let db = setup_test_db();

    let result = commands::cmd_import(&db, &dir.path().join("absent.csv"));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Failed to open"));
}

// ========== Forecast Command Tests ==========

#[test]
fn test_cmd_forecast_unknown_range() {
    let db = setup_test_db();

    let result = commands::cmd_forecast(&db, "fortnight", None, false);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Valid ranges"));
}

#[test]
fn test_cmd_forecast_missing_model() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let db = setup_test_db();
    seed_expense(&db, "2025-03-01", 12.50, "groceries");

    let result = commands::cmd_forecast(&db, "all", Some(dir.path().join("absent")), false);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to load model"));
}

#[test]
fn test_cmd_forecast_all_time_with_save() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let model_dir = dir.path().join("model");
    std::fs::create_dir(&model_dir).unwrap();
    write_test_model(&model_dir);

    let db = setup_test_db();
    seed_expense(&db, "2025-03-01", 12.50, "groceries");
    seed_expense(&db, "2025-03-02", 40.00, "transport");

    let result = commands::cmd_forecast(&db, "all", Some(model_dir), true);
    assert!(result.is_ok());

    // One saved point per historical expense
    let saved = db.list_predictions().unwrap();
    assert_eq!(saved.len(), 2);
    assert!(saved.iter().all(|p| p.value.is_finite()));
}

#[test]
fn test_cmd_forecast_without_save_persists_nothing() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let model_dir = dir.path().join("model");
    std::fs::create_dir(&model_dir).unwrap();
    write_test_model(&model_dir);

    let db = setup_test_db();
    seed_expense(&db, "2025-03-01", 12.50, "groceries");

    commands::cmd_forecast(&db, "all", Some(model_dir), false).unwrap();
    assert!(db.list_predictions().unwrap().is_empty());
}

#[test]
fn test_cmd_forecast_week_includes_today() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let model_dir = dir.path().join("model");
    std::fs::create_dir(&model_dir).unwrap();
    write_test_model(&model_dir);

    let db = setup_test_db();
    // The week window runs forward from today, so today's expense is in it
    let today = chrono::Utc::now().date_naive();
    seed_expense(&db, &today.to_string(), 25.00, "dining");

    let result = commands::cmd_forecast(&db, "week", Some(model_dir), false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_forecast_empty_ledger_fails() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let model_dir = dir.path().join("model");
    std::fs::create_dir(&model_dir).unwrap();
    write_test_model(&model_dir);

    let db = setup_test_db();

    let result = commands::cmd_forecast(&db, "all", Some(model_dir), false);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("No expense history"));
}

#[test]
fn test_cmd_predictions_empty() {
    let db = setup_test_db();
    let result = commands::cmd_predictions(&db);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_predictions_with_data() {
    use outlay_core::models::PredictionRecord;

    let db = setup_test_db();
    db.insert_prediction(&PredictionRecord {
        date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        value: 54.21,
    })
    .unwrap();

    let result = commands::cmd_predictions(&db);
    assert!(result.is_ok());

    let saved = db.list_predictions().unwrap();
    assert_eq!(saved.len(), 1);
    assert!((saved[0].value - 54.21).abs() < f64::EPSILON);
}

// ========== Helper Function Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a long string that exceeds", 10), "a long ...");
    assert_eq!(truncate("exact", 5), "exact");
    assert_eq!(truncate("toolong", 6), "too...");
}
