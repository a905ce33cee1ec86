//! Housework command handlers
//!
//! `/housework` lists the tasks as buttons; each task card offers "done" and
//! "assign" actions that move the rotation forward.

use teloxide::{
    Bot,
    payloads::SendMessageSetters,
    requests::Requester,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
};
use crate::handlers::{HandlerContext, Sender};
use crate::models::task::Task;
use crate::utils::errors::Result;
use crate::utils::helpers::escape_markdown;
use crate::utils::logging::log_user_action;

/// Handle /housework and the `housework.list` button
pub async fn handle_housework(bot: &Bot, chat_id: ChatId, ctx: &HandlerContext) -> Result<()> {
    let tasks = ctx.services.housework_service.list().await?;

    if tasks.is_empty() {
        bot.send_message(chat_id, "🧹 No housework found in the Tasks sheet.").await?;
        return Ok(());
    }

    let rows: Vec<Vec<InlineKeyboardButton>> = tasks
        .iter()
        .map(|task| {
            vec![InlineKeyboardButton::callback(
                format!("{} · {}", task.name, task.assignee),
                format!("housework.{}.view", task.id),
            )]
        })
        .collect();

    bot.send_message(chat_id, "🧹 *Housework*\n\nSelect a task:")
        .parse_mode(ParseMode::Markdown)
        .reply_markup(InlineKeyboardMarkup::new(rows))
        .await?;
    Ok(())
}

pub async fn handle_view(bot: &Bot, chat_id: ChatId, ctx: &HandlerContext, id: i64) -> Result<()> {
    let task = ctx.services.housework_service.get(id).await?;
    let today = ctx.services.clock.today();

    bot.send_message(chat_id, task.to_markdown(today))
        .parse_mode(ParseMode::Markdown)
        .reply_markup(task_keyboard(&task))
        .await?;
    Ok(())
}

/// Mark a task done and hand it to whoever is next
pub async fn handle_done(bot: &Bot, sender: &Sender, ctx: &HandlerContext, id: i64) -> Result<()> {
    let today = ctx.services.clock.today();
    let task = ctx.services.housework_service.done(id, today).await?;
    log_user_action(sender.user_id, "housework_done", Some(&id.to_string()));

    let text = format!(
        "✅ *{}* done by {}. Next up: {}\n\n{}",
        escape_markdown(&task.name),
        escape_markdown(&sender.handle()),
        escape_markdown(&task.assignee),
        task.to_markdown(today)
    );
    bot.send_message(sender.chat_id, text)
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

pub async fn handle_assign(bot: &Bot, sender: &Sender, ctx: &HandlerContext, id: i64) -> Result<()> {
    let task = ctx.services.housework_service.assign(id).await?;
    log_user_action(sender.user_id, "housework_assign", Some(&id.to_string()));

    let text = format!(
        "🔁 *{}* is now assigned to {}.",
        escape_markdown(&task.name),
        escape_markdown(&task.assignee)
    );
    bot.send_message(sender.chat_id, text)
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

fn task_keyboard(task: &Task) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("✅ Done", format!("housework.{}.done", task.id)),
            InlineKeyboardButton::callback("🔁 Assign next", format!("housework.{}.assign", task.id)),
        ],
        vec![InlineKeyboardButton::callback("« Back", "housework.list")],
    ])
}
