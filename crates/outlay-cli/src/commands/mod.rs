//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, add, list) and shared utilities (open_db)
//! - `forecast` - Forecast commands (forecast, predictions)
//! - `import` - CSV import command

pub mod core;
pub mod forecast;
pub mod import;

// Re-export command functions for main.rs
pub use core::*;
pub use forecast::*;
pub use import::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
