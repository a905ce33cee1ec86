//! In-memory spreadsheet
//!
//! Implements [`SpreadsheetClient`] over a map of sheet grids so the whole bot
//! can run without Google. Reads behave like the API: trailing empty cells and
//! rows are dropped, and unknown sheets are an error.

use std::collections::BTreeMap;
use std::sync::RwLock;
use async_trait::async_trait;
use serde_json::Value;
use crate::sheets::layout;
use crate::sheets::row::cell_to_string;
use crate::sheets::{A1Range, SheetProperties, SpreadsheetClient};
use crate::utils::errors::{Result, SheetsError};

#[derive(Debug, Clone, Default)]
struct Grid {
    sheet_id: i64,
    index: i64,
    rows: Vec<Vec<String>>,
}

impl Grid {
    fn set(&mut self, row: usize, col: usize, value: String) {
        if self.rows.len() <= row {
            self.rows.resize(row + 1, Vec::new());
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value;
    }

    fn get(&self, row: usize, col: usize) -> String {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .cloned()
            .unwrap_or_default()
    }
}

/// Spreadsheet held in process memory
#[derive(Debug, Default)]
pub struct MemorySpreadsheet {
    sheets: RwLock<BTreeMap<String, Grid>>,
}

impl MemorySpreadsheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty workbook with the database, template and tasks sheets and one
    /// active month sheet
    pub fn with_workbook(month_sheet: &str) -> Result<Self> {
        let spreadsheet = Self::new();
        spreadsheet.put(&format!("{}!A1", layout::DATABASE_SHEET), &[&["Current sheet"], &["", month_sheet]])?;
        spreadsheet.put(&format!("{}!A1", layout::TEMPLATE_SHEET), &[&[""], &["Next ID", "1"]])?;
        spreadsheet.put(&format!("{}!A1", layout::TASKS_SHEET), &[&["Tasks", "0", "", "", "", "", "", "", "", "", "Weights", "0"]])?;
        spreadsheet.put(&format!("'{}'!A1", month_sheet), &[&[""], &["Next ID", "1"]])?;
        spreadsheet.put(&format!("'{}'!{}", month_sheet, layout::MEMBER_COUNT_CELL), &[&["0"]])?;
        Ok(spreadsheet)
    }

    /// Add an empty sheet, returning its id
    pub fn add_sheet(&self, name: &str) -> i64 {
        let mut sheets = self.write();
        if let Some(grid) = sheets.get(name) {
            return grid.sheet_id;
        }
        let sheet_id = sheets.values().map(|g| g.sheet_id).max().unwrap_or(0) + 1;
        let index = sheets.len() as i64;
        sheets.insert(name.to_string(), Grid { sheet_id, index, rows: Vec::new() });
        sheet_id
    }

    /// Write text cells starting at the top-left corner of `range`, creating the sheet if needed
    pub fn put(&self, range: &str, rows: &[&[&str]]) -> Result<()> {
        let range = A1Range::parse(range)?;
        self.add_sheet(&range.sheet);
        let mut sheets = self.write();
        if let Some(grid) = sheets.get_mut(&range.sheet) {
            for (r, row) in rows.iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    grid.set(range.start.row - 1 + r, range.start.col + c, value.to_string());
                }
            }
        }
        Ok(())
    }

    /// Text of a single cell, blank when unset
    pub fn cell(&self, range: &str) -> Result<String> {
        let range = A1Range::parse(range)?;
        let sheets = self.read();
        let grid = sheets
            .get(&range.sheet)
            .ok_or_else(|| SheetsError::SheetNotFound(range.sheet.clone()))?;
        Ok(grid.get(range.start.row - 1, range.start.col))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Grid>> {
        self.sheets.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, Grid>> {
        self.sheets.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SpreadsheetClient for MemorySpreadsheet {
    async fn get_values(&self, range: &A1Range) -> Result<Vec<Vec<String>>> {
        let sheets = self.read();
        let grid = sheets
            .get(&range.sheet)
            .ok_or_else(|| SheetsError::SheetNotFound(range.sheet.clone()))?;

        let mut rows: Vec<Vec<String>> = (range.start.row..=range.end.row)
            .map(|row| {
                let mut cells: Vec<String> = (range.start.col..=range.end.col)
                    .map(|col| grid.get(row - 1, col))
                    .collect();
                while cells.last().map_or(false, |c| c.is_empty()) {
                    cells.pop();
                }
                cells
            })
            .collect();
        while rows.last().map_or(false, |r| r.is_empty()) {
            rows.pop();
        }
        Ok(rows)
    }

    async fn update_values(&self, range: &A1Range, rows: Vec<Vec<Value>>) -> Result<()> {
        if rows.len() > range.height() || rows.iter().any(|r| r.len() > range.width()) {
            return Err(SheetsError::InvalidRange(format!("data does not fit {}", range)).into());
        }

        let mut sheets = self.write();
        let grid = sheets
            .get_mut(&range.sheet)
            .ok_or_else(|| SheetsError::SheetNotFound(range.sheet.clone()))?;
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                grid.set(range.start.row - 1 + r, range.start.col + c, cell_to_string(value));
            }
        }
        Ok(())
    }

    async fn list_sheets(&self) -> Result<Vec<SheetProperties>> {
        let sheets = self.read();
        let mut list: Vec<SheetProperties> = sheets
            .iter()
            .map(|(title, grid)| SheetProperties {
                sheet_id: grid.sheet_id,
                title: title.clone(),
                index: Some(grid.index),
            })
            .collect();
        list.sort_by_key(|s| s.index);
        Ok(list)
    }

    async fn duplicate_sheet(&self, source_sheet_id: i64, new_name: &str) -> Result<SheetProperties> {
        let mut sheets = self.write();
        if sheets.contains_key(new_name) {
            return Err(SheetsError::SheetAlreadyExists(new_name.to_string()).into());
        }
        let source = sheets
            .values()
            .find(|g| g.sheet_id == source_sheet_id)
            .cloned()
            .ok_or_else(|| SheetsError::SheetNotFound(source_sheet_id.to_string()))?;

        let sheet_id = sheets.values().map(|g| g.sheet_id).max().unwrap_or(0) + 1;
        let index = sheets.len() as i64;
        sheets.insert(new_name.to_string(), Grid { sheet_id, index, rows: source.rows });

        Ok(SheetProperties {
            sheet_id,
            title: new_name.to_string(),
            index: Some(index),
        })
    }

    fn spreadsheet_url(&self) -> String {
        "memory://housemate".to_string()
    }
}
