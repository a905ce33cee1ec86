//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use std::str::FromStr;
use crate::utils::errors::{HousemateError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_google_config(&settings.google)?;
    validate_housework_config(&settings.housework)?;
    validate_state_config(&settings.state)?;
    validate_logging_config(&settings.logging)?;
    settings.timezone()?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(HousemateError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.allowed_chat_ids.is_empty() {
        return Err(HousemateError::Config(
            "At least one allowed chat ID must be configured".to_string()
        ));
    }

    Ok(())
}

/// Validate Google Sheets configuration
fn validate_google_config(config: &super::GoogleConfig) -> Result<()> {
    if config.spreadsheet_id.is_empty() {
        return Err(HousemateError::Config(
            "Spreadsheet ID is required".to_string()
        ));
    }

    match (&config.credentials, &config.credentials_path) {
        (Some(credentials), _) => {
            if credentials.client_email.is_empty() || credentials.private_key.is_empty() {
                return Err(HousemateError::Config(
                    "Service account client_email and private_key are required".to_string()
                ));
            }
        }
        (None, Some(path)) if !path.is_empty() => {}
        _ => {
            return Err(HousemateError::Config(
                "Google credentials or credentials_path is required".to_string()
            ));
        }
    }

    for (name, value) in [("api_base_url", &config.api_base_url), ("token_url", &config.token_url)] {
        let url = url::Url::parse(value)
            .map_err(|e| HousemateError::Config(format!("Invalid Google {}: {} ({})", name, value, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HousemateError::Config(
                format!("Google {} must be an http(s) URL: {}", name, value)
            ));
        }
    }

    if config.timeout_seconds == 0 {
        return Err(HousemateError::Config(
            "Google API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate housework reminder configuration
fn validate_housework_config(config: &super::HouseworkConfig) -> Result<()> {
    if cron::Schedule::from_str(&config.reminder_cron).is_err() {
        return Err(HousemateError::Config(
            format!("Invalid reminder cron expression: {}", config.reminder_cron)
        ));
    }

    if config.shortcut_prefix.is_empty() || !config.shortcut_prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(HousemateError::Config(
            "Shortcut prefix must be non-empty and alphabetic".to_string()
        ));
    }

    Ok(())
}

/// Validate conversation state configuration
fn validate_state_config(config: &super::StateConfig) -> Result<()> {
    if config.ttl_seconds == 0 || config.cleanup_interval_seconds == 0 {
        return Err(HousemateError::Config(
            "State TTL and cleanup interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(HousemateError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(HousemateError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
