//! Notification service implementation
//!
//! Sends the housework reminders. A cron schedule drives the sweep; each due
//! task is announced in the chat stored on its row with buttons to mark it
//! done or view it.

use std::sync::Arc;
use chrono::Utc;
use teloxide::{
    Bot,
    payloads::SendMessageSetters,
    requests::Requester,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
};
use tracing::{debug, error, info, warn};
use crate::models::task::Task;
use crate::services::housework::HouseworkService;
use crate::services::settings::FeatureSettings;
use crate::utils::errors::Result;
use crate::utils::helpers::Clock;

/// Outcome of one reminder sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub due: usize,
    pub sent: usize,
    pub failed: usize,
    /// Due tasks without a destination chat
    pub skipped: usize,
    /// Whether reminders were switched off
    pub disabled: bool,
}

#[derive(Clone)]
pub struct NotificationService {
    bot: Bot,
    housework: HouseworkService,
    features: Arc<FeatureSettings>,
    clock: Clock,
}

impl NotificationService {
    pub fn new(bot: Bot, housework: HouseworkService, features: Arc<FeatureSettings>, clock: Clock) -> Self {
        Self {
            bot,
            housework,
            features,
            clock,
        }
    }

    /// Send one reminder per due task. A failed send is logged and the sweep goes on.
    pub async fn notify_due_tasks(&self) -> Result<SweepSummary> {
        if !self.features.reminders_enabled().await {
            debug!("Housework reminders disabled, skipping sweep");
            return Ok(SweepSummary { disabled: true, ..Default::default() });
        }

        let today = self.clock.today();
        let tasks = self.housework.due_tasks(today).await?;
        let mut summary = SweepSummary { due: tasks.len(), ..Default::default() };

        for task in &tasks {
            let chat_id = match task.channel_id {
                Some(chat_id) => ChatId(chat_id),
                None => {
                    warn!(task_id = task.id, "Due task has no channel, reminder skipped");
                    summary.skipped += 1;
                    continue;
                }
            };

            let result = self
                .bot
                .send_message(chat_id, reminder_text(task, today))
                .parse_mode(ParseMode::Markdown)
                .reply_markup(reminder_keyboard(task.id))
                .await;

            match result {
                Ok(_) => summary.sent += 1,
                Err(e) => {
                    error!(task_id = task.id, chat_id = chat_id.0, error = %e, "Failed to send housework reminder");
                    summary.failed += 1;
                }
            }
        }

        info!(due = summary.due, sent = summary.sent, failed = summary.failed, skipped = summary.skipped, "Reminder sweep finished");
        Ok(summary)
    }

    /// Run the sweep on every tick of `schedule`, in the clock's timezone
    pub async fn run_schedule(self, schedule: cron::Schedule) {
        let tz = self.clock.timezone();
        loop {
            let next = match schedule.upcoming(tz).next() {
                Some(next) => next,
                None => {
                    warn!("Reminder schedule has no upcoming run, stopping");
                    return;
                }
            };

            let wait = (next.with_timezone(&Utc) - Utc::now()).to_std().unwrap_or_default();
            debug!(next_run = %next, "Next reminder sweep scheduled");
            tokio::time::sleep(wait).await;

            if let Err(e) = self.notify_due_tasks().await {
                error!(error = %e, "Reminder sweep failed");
            }
        }
    }
}

fn reminder_text(task: &Task, today: chrono::NaiveDate) -> String {
    format!("🔔 *Housework reminder*\n---\n{}", task.to_markdown(today))
}

fn reminder_keyboard(task_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Mark done", format!("housework.{}.done", task_id)),
        InlineKeyboardButton::callback("👀 View", format!("housework.{}.view", task_id)),
    ]])
}
