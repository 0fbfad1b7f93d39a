//! Outlay CLI - Personal expense tracker with spending forecasts
//!
//! Usage:
//!   outlay init                   Initialize database
//!   outlay import --file CSV      Import expenses
//!   outlay forecast --range week  Forecast the week ahead

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            date,
            amount,
            category,
            note,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(&db, date.as_deref(), amount, &category, note.as_deref())
        }
        Commands::Import { file } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_import(&db, &file)
        }
        Commands::List { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(&db, limit)
        }
        Commands::Forecast { range, model, save } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_forecast(&db, &range, model, save)
        }
        Commands::Predictions => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_predictions(&db)
        }
    }
}
