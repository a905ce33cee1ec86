//! Housework task model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::sheets::row::{RowReader, SheetRow};
use crate::utils::errors::Result;
use crate::utils::helpers::{escape_markdown, format_date, is_date_due_or_overdue};

/// A recurring chore stored on the Tasks sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    /// Days between two occurrences
    pub frequency: i64,
    pub last_done: String,
    pub next_due: String,
    pub assignee: String,
    pub turns_remaining: Option<u32>,
    /// Chat that receives the due reminder
    pub channel_id: Option<i64>,
    pub note: String,
}

impl SheetRow for Task {
    const MIN_COLUMNS: usize = 3;

    fn decode_row(row: &[String], range: &str) -> Result<Self> {
        let reader = RowReader::new(row, range, Self::MIN_COLUMNS)?;
        Ok(Self {
            id: reader.number(0, "ID")?,
            name: reader.required_text(1, "Name")?,
            frequency: reader.number(2, "Frequency")?,
            last_done: reader.text(3),
            next_due: reader.text(4),
            assignee: reader.text(5),
            turns_remaining: reader.optional_number(6, "TurnsRemaining")?,
            channel_id: reader.optional_number(7, "ChannelId")?,
            note: reader.text(8),
        })
    }

    fn encode_row(&self) -> Vec<Value> {
        vec![
            json!(self.id),
            json!(self.name),
            json!(self.frequency),
            json!(self.last_done),
            json!(self.next_due),
            json!(self.assignee),
            self.turns_remaining.map(|t| json!(t)).unwrap_or_else(|| json!("")),
            self.channel_id.map(|c| json!(c)).unwrap_or_else(|| json!("")),
            json!(self.note),
        ]
    }
}

impl Task {
    /// Whether the task is due on or before `today`. A blank due date never is.
    pub fn is_due(&self, today: NaiveDate) -> Result<bool> {
        if self.next_due.is_empty() {
            return Ok(false);
        }
        is_date_due_or_overdue(&self.next_due, today)
    }

    /// Record a completion on `today`
    pub fn mark_done(&mut self, today: NaiveDate) {
        self.last_done = format_date(today);
        self.next_due = format_date(today + chrono::Duration::days(self.frequency));
    }

    /// Markdown card used by the view action and the reminders
    pub fn to_markdown(&self, today: NaiveDate) -> String {
        let next_due = if self.next_due == format_date(today) {
            format!("*{} » 📢 Today*", self.next_due)
        } else {
            self.next_due.clone()
        };
        let note = if self.note.is_empty() {
            String::new()
        } else {
            format!("_{}_", escape_markdown(&self.note))
        };

        format!(
            "*Name*: {}\n*Frequency*: {} days\n*Last done*: {}\n*Next due*: {}\n*Assignee*: {}\n*Note*: {}",
            escape_markdown(&self.name),
            self.frequency,
            self.last_done,
            next_due,
            escape_markdown(&self.assignee),
            note,
        )
    }
}

/// Per-task weight controlling how many consecutive turns a member takes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWeight {
    pub task_id: i64,
    pub username: String,
    pub weight: u32,
}

impl SheetRow for TaskWeight {
    const MIN_COLUMNS: usize = 2;

    fn decode_row(row: &[String], range: &str) -> Result<Self> {
        let reader = RowReader::new(row, range, Self::MIN_COLUMNS)?;
        let weight = reader.optional_number::<u32>(2, "Weight")?.unwrap_or(1);
        Ok(Self {
            task_id: reader.number(0, "TaskID")?,
            username: reader.required_text(1, "Username")?,
            weight: weight.max(1),
        })
    }

    fn encode_row(&self) -> Vec<Value> {
        vec![json!(self.task_id), json!(self.username), json!(self.weight)]
    }
}
