//! Month sheet service
//!
//! Each month gets its own copy of the template sheet, named `M/YYYY`.

use chrono::{Datelike, NaiveDate};
use tracing::info;
use crate::sheets::layout::{month_display_name, month_sheet_name};
use crate::sheets::SheetsService;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct MonthSheetService {
    sheets: SheetsService,
}

impl MonthSheetService {
    pub fn new(sheets: SheetsService) -> Self {
        Self { sheets }
    }

    pub async fn current(&self) -> Result<String> {
        self.sheets.current_sheet().await
    }

    pub fn spreadsheet_url(&self) -> String {
        self.sheets.workbook.spreadsheet_url()
    }

    /// Create the sheet for the month of `today` and make it the active one
    pub async fn create_for(&self, today: NaiveDate) -> Result<String> {
        let name = month_sheet_name(today.month(), today.year());
        let display_name = month_display_name(today.month(), today.year());

        self.sheets.workbook.create_from_template(&name, &display_name).await?;
        self.sheets.workbook.set_current_sheet_name(&name).await?;

        info!(sheet = %name, "Active month sheet switched");
        Ok(name)
    }
}
