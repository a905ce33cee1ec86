//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for commands and conversation input

pub mod callbacks;
pub mod commands;
pub mod messages;
pub mod router;

pub use callbacks::handle_callback_query;
pub use commands::Command;
pub use messages::handle_message;
pub use router::{CallbackAction, Route};

use std::sync::Arc;
use teloxide::{
    Bot,
    requests::Requester,
    types::{CallbackQuery, ChatId, Message},
};
use tracing::{error, info, warn};
use crate::config::Settings;
use crate::middleware::AuthMiddleware;
use crate::services::ServiceFactory;
use crate::state::{ScenarioManager, StateStorage};
use crate::utils::errors::{ErrorSeverity, HousemateError};
use crate::utils::helpers::mention;

/// Everything a handler needs, injected once into the dispatcher
#[derive(Clone)]
pub struct HandlerContext {
    pub services: ServiceFactory,
    pub scenario_manager: Arc<ScenarioManager>,
    pub state_storage: StateStorage,
    pub auth: AuthMiddleware,
    pub settings: Arc<Settings>,
}

impl HandlerContext {
    pub fn new(settings: Settings, services: ServiceFactory, state_storage: StateStorage) -> Self {
        Self {
            services,
            scenario_manager: Arc::new(ScenarioManager::new()),
            state_storage,
            auth: AuthMiddleware::new(&settings),
            settings: Arc::new(settings),
        }
    }
}

/// Who triggered a handler and where the answer goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub chat_id: ChatId,
    pub user_id: i64,
    /// Telegram username without `@`; empty when the user has none
    pub username: String,
    pub first_name: String,
}

impl Sender {
    pub fn from_message(message: &Message) -> Option<Self> {
        let user = message.from.as_ref()?;
        Some(Self {
            chat_id: message.chat.id,
            user_id: user.id.0 as i64,
            username: user.username.clone().unwrap_or_default(),
            first_name: user.first_name.clone(),
        })
    }

    /// Callbacks on inaccessible messages fall back to the user's private chat
    pub fn from_callback(query: &CallbackQuery) -> Self {
        let user_id = query.from.id.0 as i64;
        Self {
            chat_id: query.message.as_ref().map(|m| m.chat().id).unwrap_or(ChatId(user_id)),
            user_id,
            username: query.from.username.clone().unwrap_or_default(),
            first_name: query.from.first_name.clone(),
        }
    }

    /// `@username`, or the first name for users without one
    pub fn handle(&self) -> String {
        if self.username.is_empty() {
            self.first_name.clone()
        } else {
            mention(&self.username)
        }
    }
}

/// Log a handler failure and send its user-facing text. Never fails.
pub async fn report_error(bot: &Bot, chat_id: ChatId, error: &HousemateError) {
    match error.severity() {
        ErrorSeverity::Info => info!(chat_id = chat_id.0, error = %error, "Handler rejected input"),
        ErrorSeverity::Warning => warn!(chat_id = chat_id.0, error = %error, "Handler warning"),
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(chat_id = chat_id.0, error = %error, user_facing = error.is_user_facing(), "Handler failed")
        }
    }

    if let Err(e) = bot.send_message(chat_id, error.user_message()).await {
        warn!(chat_id = chat_id.0, error = %e, "Failed to send error reply");
    }
}
