use teloxide::{Bot, requests::Requester};
use crate::handlers::Sender;
use crate::utils::errors::Result;

/// Handle /hello and /start
pub async fn handle_hello(bot: &Bot, sender: &Sender, bot_username: &str) -> Result<()> {
    bot.send_message(sender.chat_id, greeting(sender, bot_username)).await?;
    Ok(())
}

fn greeting(sender: &Sender, bot_username: &str) -> String {
    format!("Hello {}, I'm @{}!", sender.handle(), bot_username.trim_start_matches('@'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::ChatId;

    #[test]
    fn test_greeting() {
        let sender = Sender {
            chat_id: ChatId(1),
            user_id: 1,
            username: "alice".to_string(),
            first_name: "Alice".to_string(),
        };
        assert_eq!(greeting(&sender, "house_bot"), "Hello @alice, I'm @house_bot!");

        let anonymous = Sender { username: String::new(), ..sender };
        assert_eq!(greeting(&anonymous, "@house_bot"), "Hello Alice, I'm @house_bot!");
    }
}
