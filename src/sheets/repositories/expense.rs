//! Expense repository implementation

use std::sync::Arc;
use serde_json::json;
use crate::models::expense::Expense;
use crate::sheets::layout::*;
use crate::sheets::row::SheetRow;
use crate::sheets::{A1Range, SpreadsheetClient};
use crate::utils::errors::{HousemateError, Result};
use super::{read_cell, read_rows, write_cell};

#[derive(Clone)]
pub struct ExpenseRepository {
    client: Arc<dyn SpreadsheetClient>,
}

impl ExpenseRepository {
    pub fn new(client: Arc<dyn SpreadsheetClient>) -> Self {
        Self { client }
    }

    /// Id the next expense will get; a blank counter starts at 1
    pub async fn next_id(&self, sheet: &str) -> Result<i64> {
        let range = A1Range::cell(sheet, NEXT_EXPENSE_ID_CELL)?;
        let value = read_cell(self.client.as_ref(), &range).await?;
        if value.is_empty() {
            return Ok(1);
        }
        value.parse::<i64>().map_err(|_| HousemateError::MalformedRow {
            range: range.to_string(),
            reason: format!("next expense id is not a number: {:?}", value),
        })
    }

    pub async fn set_next_id(&self, sheet: &str, next_id: i64) -> Result<()> {
        write_cell(self.client.as_ref(), &A1Range::cell(sheet, NEXT_EXPENSE_ID_CELL)?, json!(next_id)).await
    }

    /// Find expense by ID, including soft-deleted rows.
    ///
    /// A row whose ID cell disagrees with its position is reported as malformed.
    pub async fn find_by_id(&self, sheet: &str, id: i64) -> Result<Option<Expense>> {
        if id < 1 || id >= self.next_id(sheet).await? {
            return Ok(None);
        }

        let range = A1Range::row(sheet, EXPENSE_START_COL, EXPENSE_END_COL, expense_row(id))?;
        match read_rows::<Expense>(self.client.as_ref(), &range).await?.into_iter().next() {
            Some(expense) if expense.id != id => Err(HousemateError::MalformedRow {
                range: range.to_string(),
                reason: format!("expected expense {} but the row holds {}", id, expense.id),
            }),
            found => Ok(found),
        }
    }

    /// Write `expense` to its row
    pub async fn save(&self, sheet: &str, expense: &Expense) -> Result<()> {
        let range = A1Range::row(sheet, EXPENSE_START_COL, EXPENSE_END_COL, expense_row(expense.id))?;
        self.client.update_values(&range, vec![expense.encode_row()]).await
    }

    /// Every expense row, soft-deleted ones included
    pub async fn list(&self, sheet: &str) -> Result<Vec<Expense>> {
        let last_id = self.next_id(sheet).await? - 1;
        if last_id < 1 {
            return Ok(Vec::new());
        }

        let range = A1Range::rows(sheet, EXPENSE_START_COL, EXPENSE_END_COL, expense_row(1), expense_row(last_id))?;
        read_rows::<Expense>(self.client.as_ref(), &range).await
    }

    /// The `limit` most recent expenses that are not deleted, oldest first
    pub async fn list_recent(&self, sheet: &str, limit: usize) -> Result<Vec<Expense>> {
        let active: Vec<Expense> = self
            .list(sheet)
            .await?
            .into_iter()
            .filter(|e| !e.is_deleted())
            .collect();
        let skip = active.len().saturating_sub(limit);
        Ok(active.into_iter().skip(skip).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::MemorySpreadsheet;

    fn ledger() -> Arc<MemorySpreadsheet> {
        let memory = Arc::new(MemorySpreadsheet::new());
        memory.add_sheet("1/2024");
        memory.put("1/2024!B2", &[&["3"]]).unwrap();
        memory
            .put("1/2024!A4", &[&["1", "Groceries", "50000", "15/01/2024", "@alice"], &["2", "Pizza", "120000", "15/01/2024", "@bob"]])
            .unwrap();
        memory
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = ExpenseRepository::new(ledger());
        let expense = repo.find_by_id("1/2024", 2).await.unwrap().unwrap();
        assert_eq!(expense.name, "Pizza");
        assert!(repo.find_by_id("1/2024", 3).await.unwrap().is_none());
        assert!(repo.find_by_id("1/2024", 0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_rejects_shifted_row() {
        let memory = ledger();
        memory.put("1/2024!A5", &[&["7", "Pizza", "120000", "15/01/2024", "@bob"]]).unwrap();

        let repo = ExpenseRepository::new(memory);
        let err = repo.find_by_id("1/2024", 2).await.unwrap_err();
        assert!(matches!(err, HousemateError::MalformedRow { .. }));
    }
}
