//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses
//! and records what the bot sent.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// API URL to hand to `Bot::set_api_url`
    pub fn api_url(&self) -> url::Url {
        url::Url::parse(&self.server.uri()).expect("mock server uri")
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self, success: bool) {
        let response = if success {
            ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {
                    "message_id": 123,
                    "from": {
                        "id": 12345,
                        "is_bot": true,
                        "first_name": "Housemate",
                        "username": test_bot_username()
                    },
                    "chat": {
                        "id": house_chat_id(),
                        "title": "The Flat",
                        "type": "supergroup"
                    },
                    "date": 1705287600,
                    "text": "ok"
                }
            }))
        } else {
            ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            }))
        };

        Mock::given(method("POST"))
            .and(path_regex(format!("(?i)^/bot{}/sendMessage$", regex::escape(&test_bot_token()))))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for answerCallbackQuery endpoint
    pub async fn mock_answer_callback_query(&self) {
        Mock::given(method("POST"))
            .and(path_regex(format!("(?i)^/bot{}/answerCallbackQuery$", regex::escape(&test_bot_token()))))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": true })))
            .mount(&self.server)
            .await;
    }

    /// Setup all common mocks with default success responses
    pub async fn setup_default_mocks(&self) {
        self.mock_send_message(true).await;
        self.mock_answer_callback_query().await;
    }

    /// Forget every mock and recorded request; sendMessage fails from now on
    pub async fn reset_with_failing_send(&self) {
        self.server.reset().await;
        self.mock_send_message(false).await;
        self.mock_answer_callback_query().await;
    }

    /// JSON bodies of every request made to `endpoint`, oldest first
    pub async fn requests_to(&self, endpoint: &str) -> Vec<Value> {
        let suffix = format!("/{}", endpoint).to_lowercase();
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path().to_lowercase().ends_with(&suffix))
            .map(|req| serde_json::from_slice(&req.body).expect("JSON request body"))
            .collect()
    }

    /// Texts the bot sent, oldest first
    pub async fn sent_texts(&self) -> Vec<String> {
        self.requests_to("sendMessage")
            .await
            .iter()
            .map(|body| body["text"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub async fn last_text(&self) -> String {
        self.sent_texts().await.pop().unwrap_or_default()
    }
}

/// Helper function to create a test bot token
pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}

pub fn test_bot_username() -> &'static str {
    "house_bot"
}

/// The allow-listed household chat
pub fn house_chat_id() -> i64 {
    -1001234567890
}

/// A chat that is not on the allow-list
pub fn stranger_chat_id() -> i64 {
    -1009999999999
}
