//! Settings command handler
//!
//! Shows the reminder toggle. The flag lives in memory and resets to the
//! configured value on restart.

use teloxide::{
    Bot,
    payloads::SendMessageSetters,
    requests::Requester,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
};
use crate::handlers::{HandlerContext, Sender};
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

pub async fn handle_settings(bot: &Bot, chat_id: ChatId, ctx: &HandlerContext) -> Result<()> {
    let enabled = ctx.services.features.reminders_enabled().await;
    send_settings(bot, chat_id, enabled).await
}

/// Handle the `settings.reminders.toggle` button
pub async fn handle_toggle_reminders(bot: &Bot, sender: &Sender, ctx: &HandlerContext) -> Result<()> {
    let enabled = ctx.services.features.toggle_reminders().await;
    log_user_action(sender.user_id, "toggle_reminders", Some(if enabled { "on" } else { "off" }));
    send_settings(bot, sender.chat_id, enabled).await
}

async fn send_settings(bot: &Bot, chat_id: ChatId, enabled: bool) -> Result<()> {
    let label = if enabled { "🔕 Turn reminders off" } else { "🔔 Turn reminders on" };
    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        label,
        "settings.reminders.toggle",
    )]]);

    bot.send_message(chat_id, settings_text(enabled))
        .parse_mode(ParseMode::Markdown)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

fn settings_text(enabled: bool) -> String {
    format!(
        "⚙️ *Settings*\n\n🔔 Housework reminders: *{}*",
        if enabled { "ON" } else { "OFF" }
    )
}
