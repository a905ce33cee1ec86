//! Spreadsheet service layer
//!
//! This module provides a high-level interface to the spreadsheet repositories

use std::sync::Arc;
use crate::sheets::repositories::*;
use crate::sheets::SpreadsheetClient;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct SheetsService {
    pub tasks: TaskRepository,
    pub members: MemberRepository,
    pub expenses: ExpenseRepository,
    pub rent: RentRepository,
    pub reports: ReportRepository,
    pub workbook: WorkbookRepository,
}

impl SheetsService {
    pub fn new(client: Arc<dyn SpreadsheetClient>) -> Self {
        Self {
            tasks: TaskRepository::new(client.clone()),
            members: MemberRepository::new(client.clone()),
            expenses: ExpenseRepository::new(client.clone()),
            rent: RentRepository::new(client.clone()),
            reports: ReportRepository::new(client.clone()),
            workbook: WorkbookRepository::new(client),
        }
    }

    /// Name of the month sheet new records go to
    pub async fn current_sheet(&self) -> Result<String> {
        self.workbook.current_sheet_name().await
    }
}
