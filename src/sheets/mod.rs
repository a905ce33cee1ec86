//! Google Sheets access
//!
//! The spreadsheet is the system of record. [`SpreadsheetClient`] is the
//! narrow set of calls the bot needs; [`GoogleSheetsClient`] talks to the
//! Sheets v4 REST API and [`MemorySpreadsheet`] keeps everything in memory
//! for tests and local runs.

pub mod auth;
pub mod client;
pub mod layout;
pub mod memory;
pub mod range;
pub mod repositories;
pub mod row;
pub mod service;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::utils::errors::Result;

pub use client::GoogleSheetsClient;
pub use memory::MemorySpreadsheet;
pub use range::A1Range;
pub use service::SheetsService;

/// Properties of one sheet (tab) of the spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub index: Option<i64>,
}

/// Calls made against the household spreadsheet
#[async_trait]
pub trait SpreadsheetClient: Send + Sync {
    /// Read a range as rows of text. Trailing empty cells and rows are omitted.
    async fn get_values(&self, range: &A1Range) -> Result<Vec<Vec<String>>>;

    /// Overwrite a range with raw (unparsed) values
    async fn update_values(&self, range: &A1Range, rows: Vec<Vec<Value>>) -> Result<()>;

    async fn list_sheets(&self) -> Result<Vec<SheetProperties>>;

    /// Copy a sheet under a new name and return the copy
    async fn duplicate_sheet(&self, source_sheet_id: i64, new_name: &str) -> Result<SheetProperties>;

    /// Link to the spreadsheet for chat replies
    fn spreadsheet_url(&self) -> String;
}
