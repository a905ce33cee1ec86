//! Logging middleware
//!
//! Logs incoming updates before they reach the handlers.

use teloxide::types::{CallbackQuery, Message};
use tracing::{debug, info};

/// Log an incoming message
pub fn log_message(message: &Message) {
    let user_id = message.from.as_ref().map(|user| user.id.0);
    let username = message.from.as_ref().and_then(|user| user.username.as_deref());

    match message.text() {
        Some(text) if text.starts_with('/') => {
            info!(
                user_id = user_id,
                username = username,
                chat_id = message.chat.id.0,
                command = text.split_whitespace().next().unwrap_or(""),
                "Command received"
            );
        }
        Some(text) => {
            debug!(
                user_id = user_id,
                chat_id = message.chat.id.0,
                length = text.len(),
                "Text message received"
            );
        }
        None => {
            debug!(user_id = user_id, chat_id = message.chat.id.0, "Non-text message received");
        }
    }
}

/// Log an incoming callback query
pub fn log_callback(query: &CallbackQuery) {
    info!(
        user_id = query.from.id.0,
        username = query.from.username.as_deref(),
        chat_id = query.message.as_ref().map(|m| m.chat().id.0),
        callback_data = query.data.as_deref().unwrap_or("none"),
        "Callback query received"
    );
}
