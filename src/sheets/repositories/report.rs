//! Report repository implementation

use std::sync::Arc;
use crate::models::report::{Balance, Report, ReportData};
use crate::sheets::layout::*;
use crate::sheets::{A1Range, SpreadsheetClient};
use crate::utils::errors::Result;
use super::read_rows;

#[derive(Clone)]
pub struct ReportRepository {
    client: Arc<dyn SpreadsheetClient>,
}

impl ReportRepository {
    pub fn new(client: Arc<dyn SpreadsheetClient>) -> Self {
        Self { client }
    }

    /// Read the report block and one balance line per member
    pub async fn get(&self, sheet: &str, member_count: usize) -> Result<Report> {
        let range = A1Range::rows(sheet, REPORT_START_COL, REPORT_END_COL, REPORT_START_ROW, REPORT_END_ROW)?;
        let lines = read_rows::<ReportData>(self.client.as_ref(), &range).await?;

        let balances = if member_count == 0 {
            Vec::new()
        } else {
            let range = A1Range::rows(
                sheet,
                BALANCE_START_COL,
                BALANCE_END_COL,
                BALANCE_HEADER_ROW + 1,
                BALANCE_HEADER_ROW + member_count,
            )?;
            read_rows::<Balance>(self.client.as_ref(), &range).await?
        };

        Ok(Report {
            sheet_name: sheet.to_string(),
            lines,
            balances,
        })
    }
}
