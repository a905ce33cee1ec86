//! Authentication middleware
//!
//! Restricted commands, callbacks and conversation input are only served in
//! allow-listed chats. Other chats get a fixed denial reply.

use std::collections::HashSet;
use teloxide::{Bot, requests::Requester, types::ChatId};
use tracing::{debug, warn};
use crate::config::settings::Settings;
use crate::utils::errors::{HousemateError, Result};

/// Reply sent to chats that are not on the allow-list
pub const ACCESS_DENIED_TEXT: &str = "🚫 Sorry, this chat is not allowed to use this feature.";

/// Authentication middleware
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    allowed_chat_ids: HashSet<i64>,
}

impl AuthMiddleware {
    pub fn new(settings: &Settings) -> Self {
        Self {
            allowed_chat_ids: settings.bot.allowed_chat_ids.iter().cloned().collect(),
        }
    }

    pub fn is_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chat_ids.contains(&chat_id)
    }

    /// Check if a chat may use restricted features
    pub fn check_chat(&self, chat_id: i64) -> Result<()> {
        if self.is_allowed(chat_id) {
            debug!(chat_id = chat_id, "Chat authorized");
            Ok(())
        } else {
            warn!(chat_id = chat_id, "Unauthorized chat access attempt");
            Err(HousemateError::PermissionDenied(format!("chat {} is not allowed", chat_id)))
        }
    }

    /// Send the denial reply when the chat is not allowed. Returns whether the handler may run.
    pub async fn guard(&self, bot: &Bot, chat_id: ChatId) -> Result<bool> {
        if self.check_chat(chat_id.0).is_ok() {
            return Ok(true);
        }
        bot.send_message(chat_id, ACCESS_DENIED_TEXT).await?;
        Ok(false)
    }
}
