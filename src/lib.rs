//! Housemate Telegram Bot
//!
//! A household bot for a shared flat: a housework rotation with reminders,
//! split bills and the monthly rent, with a Google spreadsheet as the system
//! of record.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod sheets;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{HousemateError, Result};

// Re-export main components for easy access
pub use handlers::HandlerContext;
pub use services::ServiceFactory;
pub use sheets::{GoogleSheetsClient, MemorySpreadsheet, SpreadsheetClient};
pub use state::{ScenarioManager, StateStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
