//! Spreadsheet command handler

use teloxide::{
    Bot,
    payloads::SendMessageSetters,
    requests::Requester,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup},
};
use crate::handlers::{HandlerContext, Sender};
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

/// Handle /gsheets: link to the spreadsheet and name the active month sheet
pub async fn handle_gsheets(bot: &Bot, chat_id: ChatId, ctx: &HandlerContext) -> Result<()> {
    let month = &ctx.services.month_service;
    let current = month.current().await?;

    let text = format!(
        "📄 Spreadsheet: {}\n📅 Active sheet: {}",
        month.spreadsheet_url(),
        current
    );
    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "➕ New month sheet",
        "gsheets.new",
    )]]);

    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}

/// Handle the `gsheets.new` button
pub async fn handle_new_month_sheet(bot: &Bot, sender: &Sender, ctx: &HandlerContext) -> Result<()> {
    let today = ctx.services.clock.today();
    let name = ctx.services.month_service.create_for(today).await?;

    log_user_action(sender.user_id, "new_month_sheet", Some(&name));
    bot.send_message(
        sender.chat_id,
        format!("✅ Created sheet {} and made it the active sheet.", name),
    )
    .await?;
    Ok(())
}
