//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Outlay - Track daily expenses and forecast what comes next
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "Personal expense tracker with on-device spending forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "outlay.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a single expense
    Add {
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Amount spent
        #[arg(short, long)]
        amount: f64,

        /// Spending category
        #[arg(short, long, default_value = "uncategorized")]
        category: String,

        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Import expenses from CSV (date,amount,category,note)
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List recorded expenses
    List {
        /// Maximum rows to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Forecast spending over a time range
    Forecast {
        /// Time range: week, month, year, all
        #[arg(short, long, default_value = "week")]
        range: String,

        /// Model directory (overrides OUTLAY_MODEL)
        ///
        /// Must contain the trained weights and their metadata sidecar.
        /// Defaults to $OUTLAY_MODEL, falling back to ./model.
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Persist the forecast points to the database
        #[arg(long)]
        save: bool,
    },

    /// List saved forecast points
    Predictions,
}
