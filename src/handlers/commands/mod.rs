//! Command handlers module
//!
//! This module contains handlers for all bot commands

pub mod cancel;
pub mod feedback;
pub mod gsheets;
pub mod hello;
pub mod help;
pub mod housework;
pub mod rent;
pub mod settings;
pub mod splitbill;

use teloxide::{Bot, utils::command::BotCommands};
use tracing::info;
use crate::handlers::{HandlerContext, Route, Sender};
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

/// Bot commands
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Housemate commands:")]
pub enum Command {
    #[command(description = "say hello")]
    Hello,
    #[command(description = "say hello")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(description = "open the household spreadsheet")]
    Gsheets,
    #[command(description = "add, view, update or delete shared expenses")]
    Splitbill,
    #[command(description = "see who is on which chore")]
    Housework,
    #[command(description = "enter this month's rent bill")]
    Rent,
    #[command(description = "toggle housework reminders")]
    Settings,
    #[command(description = "send feedback about the bot")]
    Feedback,
    #[command(description = "stop the current conversation")]
    Cancel,
}

impl Command {
    /// Look up a command by its lower-case name
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name {
            "hello" => Command::Hello,
            "start" => Command::Start,
            "help" => Command::Help,
            "gsheets" => Command::Gsheets,
            "splitbill" => Command::Splitbill,
            "housework" => Command::Housework,
            "rent" => Command::Rent,
            "settings" => Command::Settings,
            "feedback" => Command::Feedback,
            "cancel" => Command::Cancel,
            _ => return None,
        };
        Some(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Hello => "hello",
            Command::Start => "start",
            Command::Help => "help",
            Command::Gsheets => "gsheets",
            Command::Splitbill => "splitbill",
            Command::Housework => "housework",
            Command::Rent => "rent",
            Command::Settings => "settings",
            Command::Feedback => "feedback",
            Command::Cancel => "cancel",
        }
    }

    /// Commands that only allow-listed chats may use
    pub fn is_restricted(&self) -> bool {
        !matches!(
            self,
            Command::Hello | Command::Start | Command::Help | Command::Feedback | Command::Cancel
        )
    }
}

/// Main command dispatcher. Restricted routes pass the permission gate first.
pub async fn handle_route(bot: &Bot, sender: &Sender, route: Route, ctx: &HandlerContext) -> Result<()> {
    if route.is_restricted() && !ctx.auth.guard(bot, sender.chat_id).await? {
        return Ok(());
    }

    match route {
        Route::TaskDone(id) => {
            log_user_action(sender.user_id, "housework_shortcut", Some(&id.to_string()));
            housework::handle_done(bot, sender, ctx, id).await
        }
        Route::Command(command) => {
            info!(user_id = sender.user_id, chat_id = sender.chat_id.0, command = command.name(), "Handling command");

            match command {
                Command::Hello | Command::Start => {
                    hello::handle_hello(bot, sender, &ctx.settings.bot.username).await
                }
                Command::Help => help::handle_help(bot, sender.chat_id).await,
                Command::Gsheets => gsheets::handle_gsheets(bot, sender.chat_id, ctx).await,
                Command::Splitbill => splitbill::handle_splitbill(bot, sender.chat_id).await,
                Command::Housework => housework::handle_housework(bot, sender.chat_id, ctx).await,
                Command::Rent => rent::start_rent(bot, sender, ctx).await,
                Command::Settings => settings::handle_settings(bot, sender.chat_id, ctx).await,
                Command::Feedback => {
                    feedback::handle_feedback(bot, sender.chat_id, &ctx.settings.bot.feedback_contact).await
                }
                Command::Cancel => cancel::handle_cancel(bot, sender, ctx).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for command in [Command::Hello, Command::Rent, Command::Settings, Command::Cancel] {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
        assert_eq!(Command::from_name("Help"), None);
    }

    #[test]
    fn test_descriptions_list_every_command() {
        let descriptions = Command::descriptions().to_string();
        assert!(descriptions.contains("/splitbill"));
        assert!(descriptions.contains("/housework"));
        assert!(descriptions.contains("/cancel"));
    }
}
