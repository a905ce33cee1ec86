use teloxide::{
    Bot,
    payloads::SendMessageSetters,
    requests::Requester,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup},
    utils::command::BotCommands,
};
use crate::utils::errors::Result;
use super::Command;

/// Handle /help command
pub async fn handle_help(bot: &Bot, chat_id: ChatId) -> Result<()> {
    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![button(Command::Housework, "🧹 Housework"), button(Command::Splitbill, "💸 Split bill")],
        vec![button(Command::Rent, "🏠 Rent"), button(Command::Gsheets, "📄 Spreadsheet")],
        vec![button(Command::Settings, "⚙️ Settings"), button(Command::Feedback, "💬 Feedback")],
    ]);

    bot.send_message(chat_id, Command::descriptions().to_string())
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

fn button(command: Command, label: &str) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, format!("help.{}", command.name()))
}
