//! Google Sheets v4 REST client

use std::time::Instant;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use crate::config::GoogleConfig;
use crate::sheets::auth::{load_service_account_key, ServiceAccountAuth};
use crate::sheets::row::cell_to_string;
use crate::sheets::{A1Range, SheetProperties, SpreadsheetClient};
use crate::utils::errors::{HousemateError, Result, SheetsError};
use crate::utils::logging::{log_api_error, log_sheet_operation};

#[derive(Debug, Deserialize)]
struct ValueRangeResponse {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateResponse {
    #[serde(default)]
    replies: Vec<BatchUpdateReply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateReply {
    duplicate_sheet: Option<SheetEntry>,
}

/// Spreadsheet client backed by the Google Sheets API
pub struct GoogleSheetsClient {
    http_client: reqwest::Client,
    auth: ServiceAccountAuth,
    base_url: String,
    spreadsheet_id: String,
}

impl GoogleSheetsClient {
    /// Create a new client from configuration, loading the service account key
    pub async fn new(config: &GoogleConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent("Housemate-Bot/1.0")
            .build()?;

        let key = load_service_account_key(config).await?;
        let auth = ServiceAccountAuth::new(key).await?;

        Ok(Self {
            http_client,
            auth,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
        })
    }

    fn values_url(&self, range: &A1Range) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&range.to_string())
        )
    }

    async fn request(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let token = self.auth.access_token().await?;
        Ok(self.http_client.request(method, url).bearer_auth(token))
    }

    /// Turn a non-success response into [`SheetsError::ApiError`]
    async fn check(response: Response, operation: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        log_api_error("google_sheets", &message, Some(operation));
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SheetsError::AuthenticationFailed(message).into());
        }
        Err(SheetsError::ApiError { status: status.as_u16(), message }.into())
    }

    async fn fetch_values(&self, range: &A1Range) -> Result<Vec<Vec<String>>> {
        let response = self
            .request(Method::GET, &self.values_url(range))
            .await?
            .query(&[
                ("majorDimension", "ROWS"),
                ("valueRenderOption", "UNFORMATTED_VALUE"),
                ("dateTimeRenderOption", "FORMATTED_STRING"),
            ])
            .send()
            .await?;
        let body: ValueRangeResponse = Self::check(response, "get_values").await?.json().await?;

        Ok(body
            .values
            .iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }

    async fn put_values(&self, range: &A1Range, rows: Vec<Vec<Value>>) -> Result<()> {
        let body = json!({
            "range": range.to_string(),
            "majorDimension": "ROWS",
            "values": rows,
        });

        let response = self
            .request(Method::PUT, &self.values_url(range))
            .await?
            .query(&[("valueInputOption", "RAW")])
            .json(&body)
            .send()
            .await?;
        Self::check(response, "update_values").await?;
        Ok(())
    }
}

#[async_trait]
impl SpreadsheetClient for GoogleSheetsClient {
    async fn get_values(&self, range: &A1Range) -> Result<Vec<Vec<String>>> {
        let started = Instant::now();
        let result = self.fetch_values(range).await;
        log_sheet_operation("get_values", &range.to_string(), started.elapsed().as_millis() as u64, result.is_ok());
        result
    }

    async fn update_values(&self, range: &A1Range, rows: Vec<Vec<Value>>) -> Result<()> {
        let started = Instant::now();
        let result = self.put_values(range, rows).await;
        log_sheet_operation("update_values", &range.to_string(), started.elapsed().as_millis() as u64, result.is_ok());
        result
    }

    async fn list_sheets(&self) -> Result<Vec<SheetProperties>> {
        let url = format!("{}/spreadsheets/{}", self.base_url, self.spreadsheet_id);
        let response = self
            .request(Method::GET, &url)
            .await?
            .query(&[("fields", "sheets.properties")])
            .send()
            .await?;
        let body: SpreadsheetResponse = Self::check(response, "list_sheets").await?.json().await?;

        debug!(count = body.sheets.len(), "Listed spreadsheet sheets");
        Ok(body.sheets.into_iter().map(|s| s.properties).collect())
    }

    async fn duplicate_sheet(&self, source_sheet_id: i64, new_name: &str) -> Result<SheetProperties> {
        let url = format!("{}/spreadsheets/{}:batchUpdate", self.base_url, self.spreadsheet_id);
        let body = json!({
            "requests": [{
                "duplicateSheet": {
                    "sourceSheetId": source_sheet_id,
                    "newSheetName": new_name,
                }
            }]
        });

        let response = self.request(Method::POST, &url).await?.json(&body).send().await?;
        let body: BatchUpdateResponse = Self::check(response, "duplicate_sheet").await?.json().await?;

        body.replies
            .into_iter()
            .find_map(|reply| reply.duplicate_sheet)
            .map(|entry| entry.properties)
            .ok_or_else(|| {
                HousemateError::from(SheetsError::ApiError {
                    status: 200,
                    message: "duplicateSheet reply missing".to_string(),
                })
            })
    }

    fn spreadsheet_url(&self) -> String {
        format!("https://docs.google.com/spreadsheets/d/{}", self.spreadsheet_id)
    }
}
