//! Housework service implementation
//!
//! Reads tasks from the Tasks sheet and moves them along the rotation when
//! they are done or reassigned.

use chrono::NaiveDate;
use tracing::{info, warn};
use crate::models::task::Task;
use crate::services::rotation::{RotationAction, RotationStrategy};
use crate::sheets::SheetsService;
use crate::utils::errors::{HousemateError, Result};

#[derive(Clone)]
pub struct HouseworkService {
    sheets: SheetsService,
}

impl HouseworkService {
    pub fn new(sheets: SheetsService) -> Self {
        Self { sheets }
    }

    pub async fn list(&self) -> Result<Vec<Task>> {
        self.sheets.tasks.list().await
    }

    /// Get task by ID
    pub async fn get(&self, id: i64) -> Result<Task> {
        self.sheets
            .tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| HousemateError::not_found("Task", id))
    }

    /// Weighted strategy when the task has weight rows, otherwise the members of the active month
    async fn strategy_for(&self, task: &Task) -> Result<RotationStrategy> {
        let weights = self.sheets.tasks.weights_for(task.id).await?;
        if !weights.is_empty() {
            return Ok(RotationStrategy::Weighted(weights));
        }

        let sheet = self.sheets.current_sheet().await?;
        let members = self.sheets.members.list(&sheet).await?;
        Ok(RotationStrategy::for_task(members, Vec::new()))
    }

    /// Mark a task done today and rotate its assignee
    pub async fn done(&self, id: i64, today: NaiveDate) -> Result<Task> {
        let mut task = self.get(id).await?;
        let previous = task.assignee.clone();

        self.strategy_for(&task).await?.advance(&task, RotationAction::Done)?.apply(&mut task);
        task.mark_done(today);
        self.sheets.tasks.update(&task).await?;

        info!(task_id = id, done_by = %previous, assignee = %task.assignee, next_due = %task.next_due, "Task marked done");
        Ok(task)
    }

    /// Hand a task to the next member without touching its dates
    pub async fn assign(&self, id: i64) -> Result<Task> {
        let mut task = self.get(id).await?;

        self.strategy_for(&task).await?.advance(&task, RotationAction::Assign)?.apply(&mut task);
        self.sheets.tasks.update(&task).await?;

        info!(task_id = id, assignee = %task.assignee, "Task reassigned");
        Ok(task)
    }

    /// Tasks due on or before `today`. Rows with an unreadable due date are skipped.
    pub async fn due_tasks(&self, today: NaiveDate) -> Result<Vec<Task>> {
        let tasks = self.list().await?;
        Ok(tasks
            .into_iter()
            .filter(|task| match task.is_due(today) {
                Ok(due) => due,
                Err(e) => {
                    warn!(task_id = task.id, next_due = %task.next_due, error = %e, "Skipping task with invalid due date");
                    false
                }
            })
            .collect())
    }
}
