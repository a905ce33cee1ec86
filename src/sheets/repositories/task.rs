//! Task repository implementation

use std::sync::Arc;
use tracing::debug;
use crate::models::task::{Task, TaskWeight};
use crate::sheets::layout::*;
use crate::sheets::row::SheetRow;
use crate::sheets::{A1Range, SpreadsheetClient};
use crate::utils::errors::{HousemateError, Result};
use super::{read_count, read_rows};

#[derive(Clone)]
pub struct TaskRepository {
    client: Arc<dyn SpreadsheetClient>,
}

impl TaskRepository {
    pub fn new(client: Arc<dyn SpreadsheetClient>) -> Self {
        Self { client }
    }

    /// Number of task rows
    pub async fn count(&self) -> Result<usize> {
        read_count(self.client.as_ref(), &A1Range::cell(TASKS_SHEET, TASK_COUNT_CELL)?).await
    }

    /// List every task
    pub async fn list(&self) -> Result<Vec<Task>> {
        let count = self.count().await?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let range = A1Range::rows(
            TASKS_SHEET,
            TASK_START_COL,
            TASK_END_COL,
            TASK_HEADER_ROW + 1,
            TASK_HEADER_ROW + count,
        )?;
        let tasks = read_rows::<Task>(self.client.as_ref(), &range).await?;
        debug!(count = tasks.len(), "Loaded tasks");
        Ok(tasks)
    }

    /// Find task by ID; the row at the task's position must carry that ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Task>> {
        if id < 1 || id as usize > self.count().await? {
            return Ok(None);
        }

        let range = A1Range::row(TASKS_SHEET, TASK_START_COL, TASK_END_COL, task_row(id))?;
        match read_rows::<Task>(self.client.as_ref(), &range).await?.into_iter().next() {
            Some(task) if task.id != id => Err(HousemateError::MalformedRow {
                range: range.to_string(),
                reason: format!("expected task {} but the row holds {}", id, task.id),
            }),
            found => Ok(found),
        }
    }

    /// Overwrite the row of `task`
    pub async fn update(&self, task: &Task) -> Result<()> {
        let range = A1Range::row(TASKS_SHEET, TASK_START_COL, TASK_END_COL, task_row(task.id))?;
        self.client.update_values(&range, vec![task.encode_row()]).await
    }

    /// Weight rows configured for one task, in sheet order
    pub async fn weights_for(&self, task_id: i64) -> Result<Vec<TaskWeight>> {
        let count = read_count(
            self.client.as_ref(),
            &A1Range::cell(TASKS_SHEET, TASK_WEIGHT_COUNT_CELL)?,
        )
        .await?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let range = A1Range::rows(
            TASKS_SHEET,
            TASK_WEIGHT_START_COL,
            TASK_WEIGHT_END_COL,
            TASK_WEIGHT_START_ROW,
            TASK_WEIGHT_START_ROW + count - 1,
        )?;
        let weights = read_rows::<TaskWeight>(self.client.as_ref(), &range).await?;
        Ok(weights.into_iter().filter(|w| w.task_id == task_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::MemorySpreadsheet;

    fn tasks_sheet(rows: &[&[&str]]) -> Arc<MemorySpreadsheet> {
        let memory = Arc::new(MemorySpreadsheet::new());
        memory.add_sheet(TASKS_SHEET);
        memory.put("Tasks!B1", &[&["2"]]).unwrap();
        memory.put("Tasks!A3", rows).unwrap();
        memory
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = TaskRepository::new(tasks_sheet(&[&["1", "Dishes", "2"], &["2", "Trash", "7"]]));
        assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().name, "Trash");
        assert!(repo.find_by_id(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_rejects_shifted_row() {
        let repo = TaskRepository::new(tasks_sheet(&[&["1", "Dishes", "2"], &["5", "Trash", "7"]]));
        let err = repo.find_by_id(2).await.unwrap_err();
        assert!(matches!(err, HousemateError::MalformedRow { .. }));
    }
}
