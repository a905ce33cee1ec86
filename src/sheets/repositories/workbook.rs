//! Workbook repository implementation
//!
//! Tracks which month sheet is active and creates new ones from the template.

use std::sync::Arc;
use serde_json::json;
use tracing::info;
use crate::sheets::layout::*;
use crate::sheets::{A1Range, SheetProperties, SpreadsheetClient};
use crate::utils::errors::{HousemateError, Result, SheetsError};
use super::{read_cell, write_cell};

#[derive(Clone)]
pub struct WorkbookRepository {
    client: Arc<dyn SpreadsheetClient>,
}

impl WorkbookRepository {
    pub fn new(client: Arc<dyn SpreadsheetClient>) -> Self {
        Self { client }
    }

    /// Name of the active month sheet
    pub async fn current_sheet_name(&self) -> Result<String> {
        let range = A1Range::cell(DATABASE_SHEET, CURRENT_SHEET_CELL)?;
        let name = read_cell(self.client.as_ref(), &range).await?;
        if name.is_empty() {
            return Err(HousemateError::MalformedRow {
                range: range.to_string(),
                reason: "current sheet name is empty".to_string(),
            });
        }
        Ok(name)
    }

    pub async fn set_current_sheet_name(&self, name: &str) -> Result<()> {
        write_cell(self.client.as_ref(), &A1Range::cell(DATABASE_SHEET, CURRENT_SHEET_CELL)?, json!(name)).await
    }

    /// Find a sheet by title
    pub async fn find_sheet(&self, title: &str) -> Result<Option<SheetProperties>> {
        let sheets = self.client.list_sheets().await?;
        Ok(sheets.into_iter().find(|s| s.title == title))
    }

    /// Copy the template into `name` and write `display_name` into its title cell
    pub async fn create_from_template(&self, name: &str, display_name: &str) -> Result<SheetProperties> {
        if self.find_sheet(name).await?.is_some() {
            return Err(SheetsError::SheetAlreadyExists(name.to_string()).into());
        }
        let template = self
            .find_sheet(TEMPLATE_SHEET)
            .await?
            .ok_or_else(|| SheetsError::SheetNotFound(TEMPLATE_SHEET.to_string()))?;

        let sheet = self.client.duplicate_sheet(template.sheet_id, name).await?;
        write_cell(self.client.as_ref(), &A1Range::cell(name, DISPLAY_NAME_CELL)?, json!(display_name)).await?;

        info!(sheet = name, sheet_id = sheet.sheet_id, "Month sheet created from template");
        Ok(sheet)
    }

    pub fn spreadsheet_url(&self) -> String {
        self.client.spreadsheet_url()
    }
}
