//! Service account authentication
//!
//! Access tokens come from a `yup_oauth2` service account authenticator. It
//! keeps the token in memory and refreshes it a minute before it expires.

use serde_json::Value;
use tracing::{debug, info};
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};
use crate::config::GoogleConfig;
use crate::utils::errors::{HousemateError, Result, SheetsError};

const SHEETS_SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets"];

/// Bearer tokens for the Sheets API
pub struct ServiceAccountAuth {
    authenticator: DefaultAuthenticator,
}

impl ServiceAccountAuth {
    pub async fn new(key: ServiceAccountKey) -> Result<Self> {
        let client_email = key.client_email.clone();
        let authenticator = ServiceAccountAuthenticator::builder(key).build().await?;

        info!(client_email = %client_email, "Service account authenticator ready");
        Ok(Self { authenticator })
    }

    /// Return a valid access token; the authenticator refreshes it when stale
    pub async fn access_token(&self) -> Result<String> {
        let token = self
            .authenticator
            .token(SHEETS_SCOPES)
            .await
            .map_err(|e| SheetsError::AuthenticationFailed(e.to_string()))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| SheetsError::AuthenticationFailed("token response has no access token".to_string()).into())
    }
}

/// Build the service account key from inline settings or the key file.
///
/// The configured `token_url` replaces the key's `token_uri`.
pub async fn load_service_account_key(config: &GoogleConfig) -> Result<ServiceAccountKey> {
    let mut key: Value = match (&config.credentials, &config.credentials_path) {
        (Some(credentials), _) => serde_json::to_value(credentials)?,
        (None, Some(path)) => {
            let content = tokio::fs::read_to_string(path).await?;
            serde_json::from_str(&content)?
        }
        (None, None) => {
            return Err(HousemateError::Config(
                "Google credentials or credentials_path is required".to_string(),
            ))
        }
    };

    let fields = key
        .as_object_mut()
        .ok_or_else(|| HousemateError::Config("Service account key must be a JSON object".to_string()))?;

    // Keys passed through environment variables usually carry literal "\n"
    if let Some(Value::String(private_key)) = fields.get_mut("private_key") {
        *private_key = private_key.replace("\\n", "\n");
    }
    fields.insert("token_uri".to_string(), Value::String(config.token_url.clone()));

    debug!(token_uri = %config.token_url, "Loaded service account key");
    yup_oauth2::parse_service_account_key(serde_json::to_vec(&key)?)
        .map_err(|e| HousemateError::Config(format!("Invalid service account key: {}", e)))
}
