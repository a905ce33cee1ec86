//! Spreadsheet repositories module
//!
//! This module contains one repository per entity stored in the spreadsheet.
//! Each repository turns typed reads and writes into cell ranges.

pub mod task;
pub mod member;
pub mod expense;
pub mod rent;
pub mod report;
pub mod workbook;

pub use task::TaskRepository;
pub use member::MemberRepository;
pub use expense::ExpenseRepository;
pub use rent::RentRepository;
pub use report::ReportRepository;
pub use workbook::WorkbookRepository;

use serde_json::Value;
use crate::sheets::range::column_letters;
use crate::sheets::row::SheetRow;
use crate::sheets::{A1Range, SpreadsheetClient};
use crate::utils::errors::{HousemateError, Result};

/// Read one cell as text, blank when empty
pub(crate) async fn read_cell(client: &dyn SpreadsheetClient, range: &A1Range) -> Result<String> {
    let rows = client.get_values(range).await?;
    Ok(rows
        .into_iter()
        .next()
        .and_then(|row| row.into_iter().next())
        .map(|cell| cell.trim().to_string())
        .unwrap_or_default())
}

/// Read a counter cell; blank counts as zero
pub(crate) async fn read_count(client: &dyn SpreadsheetClient, range: &A1Range) -> Result<usize> {
    let value = read_cell(client, range).await?;
    if value.is_empty() {
        return Ok(0);
    }
    value.parse::<usize>().map_err(|_| HousemateError::MalformedRow {
        range: range.to_string(),
        reason: format!("count is not a number: {:?}", value),
    })
}

pub(crate) async fn write_cell(client: &dyn SpreadsheetClient, range: &A1Range, value: Value) -> Result<()> {
    client.update_values(range, vec![vec![value]]).await
}

/// Decode every non-empty row of `range`, numbering rows from its first row
pub(crate) async fn read_rows<T: SheetRow>(client: &dyn SpreadsheetClient, range: &A1Range) -> Result<Vec<T>> {
    let rows = client.get_values(range).await?;
    let mut items = Vec::with_capacity(rows.len());
    for (offset, row) in rows.iter().enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row_range = A1Range::row(
            &range.sheet,
            &column_letters(range.start.col),
            &column_letters(range.end.col),
            range.start.row + offset,
        )?;
        items.push(T::decode_row(row, &row_range.to_string())?);
    }
    Ok(items)
}
