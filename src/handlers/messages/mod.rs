//! Message handlers module
//!
//! Handles commands and the text answers of running conversations.

use teloxide::{Bot, types::Message};
use tracing::debug;
use crate::handlers::{commands, report_error, router, HandlerContext, Sender};
use crate::middleware::logging::log_message;
use crate::state::{scenarios, ConversationContext, SessionKey};
use crate::utils::errors::Result;

/// Handle incoming messages. Failures are reported to the chat, never propagated.
pub async fn handle_message(bot: Bot, msg: Message, ctx: HandlerContext) -> Result<()> {
    log_message(&msg);

    let sender = match Sender::from_message(&msg) {
        Some(sender) => sender,
        None => {
            debug!(chat_id = msg.chat.id.0, "Message without sender ignored");
            return Ok(());
        }
    };
    let text = match msg.text() {
        Some(text) => text,
        None => return Ok(()),
    };

    let result = if text.starts_with('/') {
        match router::route_message(&msg, &ctx.settings.bot.username, &ctx.settings.housework.shortcut_prefix) {
            Some(route) => commands::handle_route(&bot, &sender, route, &ctx).await,
            None => {
                debug!(chat_id = sender.chat_id.0, command = text, "Unknown command ignored");
                Ok(())
            }
        }
    } else {
        handle_conversation_input(&bot, &sender, text, &ctx).await
    };

    if let Err(e) = result {
        report_error(&bot, sender.chat_id, &e).await;
    }
    Ok(())
}

/// Feed a plain text message to the conversation it belongs to, if any
async fn handle_conversation_input(bot: &Bot, sender: &Sender, text: &str, ctx: &HandlerContext) -> Result<()> {
    let context = match active_conversation(sender, ctx).await? {
        Some(context) => context,
        None => {
            debug!(user_id = sender.user_id, chat_id = sender.chat_id.0, "No conversation, message ignored");
            return Ok(());
        }
    };

    if !ctx.auth.guard(bot, sender.chat_id).await? {
        return Ok(());
    }

    debug!(key = %context.key, scenario = ?context.scenario, step = ?context.step, "Conversation input");

    match context.scenario.as_deref() {
        Some(scenarios::ADD_EXPENSE) => {
            commands::splitbill::handle_add_input(bot, sender, ctx, context, text).await
        }
        Some(scenarios::UPDATE_EXPENSE) => {
            commands::splitbill::handle_update_input(bot, sender, ctx, context, text).await
        }
        Some(scenarios::RENT) => commands::rent::handle_rent_input(bot, sender, ctx, context, text).await,
        _ => Ok(()),
    }
}

/// The sender's own conversation wins over the chat's one
async fn active_conversation(sender: &Sender, ctx: &HandlerContext) -> Result<Option<ConversationContext>> {
    for key in [SessionKey::User(sender.user_id), SessionKey::Chat(sender.chat_id.0)] {
        if let Some(context) = ctx.state_storage.load_context(key).await? {
            if context.scenario.is_some() {
                return Ok(Some(context));
            }
        }
    }
    Ok(None)
}
