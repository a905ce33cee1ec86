use teloxide::{Bot, requests::Requester};
use crate::handlers::{HandlerContext, Sender};
use crate::state::SessionKey;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;

/// Handle /cancel: drop the sender's conversation and the chat's one
pub async fn handle_cancel(bot: &Bot, sender: &Sender, ctx: &HandlerContext) -> Result<()> {
    ctx.state_storage.delete_context(SessionKey::User(sender.user_id)).await?;
    ctx.state_storage.delete_context(SessionKey::Chat(sender.chat_id.0)).await?;

    log_user_action(sender.user_id, "cancel", None);
    bot.send_message(sender.chat_id, "Oh, goodbye!").await?;
    Ok(())
}
