//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{HousemateError, Result};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub google: GoogleConfig,
    #[serde(default)]
    pub housework: HouseworkConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Bot username without `@`. Filled from `getMe` at startup when empty.
    #[serde(default)]
    pub username: String,
    /// Chats allowed to use the restricted commands
    #[serde(default)]
    pub allowed_chat_ids: Vec<i64>,
    #[serde(default = "default_feedback_contact")]
    pub feedback_contact: String,
}

/// Google Sheets configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleConfig {
    pub spreadsheet_id: String,
    /// Inline service account key
    #[serde(default)]
    pub credentials: Option<ServiceAccountCredentials>,
    /// Path to a service account JSON key file, used when `credentials` is not set
    #[serde(default)]
    pub credentials_path: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Fields of a Google service account key used to mint access tokens.
///
/// Deserializes straight from the JSON key file downloaded from the Cloud console;
/// unused fields of that file are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Housework reminders configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HouseworkConfig {
    /// IANA timezone used for "today" when comparing due dates
    pub timezone: String,
    /// Cron expression (seconds first) for the due-task sweep
    pub reminder_cron: String,
    /// Initial value of the reminders toggle
    pub reminders_enabled: bool,
    /// Prefix of the "mark done" shortcut command, e.g. `/hw3`
    pub shortcut_prefix: String,
}

/// Conversation state configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateConfig {
    pub ttl_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

fn default_feedback_contact() -> String {
    "the bot maintainers".to_string()
}

fn default_api_base_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for HouseworkConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Bangkok".to_string(),
            reminder_cron: "0 0 */12 * * *".to_string(),
            reminders_enabled: true,
            shortcut_prefix: "hw".to_string(),
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 3600,
            cleanup_interval_seconds: 3600,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: "logs".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("HOUSEMATE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bot.allowed_chat_ids")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }

    /// Timezone used for due-date comparisons
    pub fn timezone(&self) -> Result<Tz> {
        self.housework.timezone.parse::<Tz>().map_err(|_| {
            HousemateError::Config(format!("Unknown timezone: {}", self.housework.timezone))
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                username: String::new(),
                allowed_chat_ids: vec![],
                feedback_contact: default_feedback_contact(),
            },
            google: GoogleConfig {
                spreadsheet_id: String::new(),
                credentials: None,
                credentials_path: None,
                api_base_url: default_api_base_url(),
                token_url: default_token_url(),
                timeout_seconds: default_timeout_seconds(),
            },
            housework: HouseworkConfig::default(),
            state: StateConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
