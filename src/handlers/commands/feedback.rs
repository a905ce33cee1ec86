use teloxide::{Bot, requests::Requester, types::ChatId};
use crate::utils::errors::Result;

pub async fn handle_feedback(bot: &Bot, chat_id: ChatId, contact: &str) -> Result<()> {
    bot.send_message(
        chat_id,
        format!("💬 Got an idea or found a bug? Tell {} about it. Thanks!", contact),
    )
    .await?;
    Ok(())
}
