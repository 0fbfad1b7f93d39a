//! Forecast command implementations

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use outlay_core::db::Database;
use outlay_core::forecast::Forecaster;
use outlay_core::inference::{model_dir_from_env, ForecastSession};
use outlay_core::range::TimeRange;

pub fn cmd_forecast(
    db: &Database,
    range_str: &str,
    model: Option<PathBuf>,
    save: bool,
) -> Result<()> {
    let range: TimeRange = range_str
        .parse()
        .context("Valid ranges: week, month, year, all")?;

    let model_dir = model.unwrap_or_else(model_dir_from_env);
    tracing::debug!(dir = %model_dir.display(), "Resolved model directory");

    let session = ForecastSession::load(&model_dir)
        .with_context(|| format!("Failed to load model from {}", model_dir.display()))?;

    println!("🔮 Forecasting spending ({})...", range);

    let forecaster = Forecaster::new(session);
    let today = Utc::now().date_naive();
    let predictions = forecaster.forecast_range(db, range, today)?;

    let style = range.label_style();

    println!();
    println!("📈 Predicted Spending");
    println!("   ─────────────────────────────");
    for point in &predictions {
        println!(
            "   {:<12} │ {:>10}",
            style.format(point.date),
            format!("${:.2}", point.value)
        );
    }

    let total: f64 = predictions.iter().map(|p| p.value).sum();
    println!("   ─────────────────────────────");
    println!(
        "   Total: ${:.2} across {} points",
        total,
        predictions.len()
    );

    if save {
        for point in &predictions {
            db.insert_prediction(point)?;
        }
        println!();
        println!("💾 Saved {} forecast points.", predictions.len());
    }

    Ok(())
}

pub fn cmd_predictions(db: &Database) -> Result<()> {
    let predictions = db.list_predictions()?;

    if predictions.is_empty() {
        println!("No saved forecasts. Generate one with:");
        println!("  outlay forecast --range week --save");
        return Ok(());
    }

    println!();
    println!("🗂  Saved Forecasts ({} total)", predictions.len());
    println!("   ─────────────────────────────────────────────");

    for point in predictions {
        println!(
            "   [{}] {} │ {:>10} │ saved {}",
            point.id,
            point.date,
            format!("${:.2}", point.value),
            point.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}
