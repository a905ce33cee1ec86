//! Test data helpers for creating test objects
//!
//! Messages and callback queries are built from Bot API JSON, the same way
//! teloxide receives them.

use serde_json::{json, Value};
use teloxide::types::{CallbackQuery, Message};

/// A Telegram user taking part in a test
#[derive(Debug, Clone, Copy)]
pub struct TestUser {
    pub id: i64,
    pub username: &'static str,
    pub first_name: &'static str,
}

pub const ALICE: TestUser = TestUser { id: 1001, username: "alice", first_name: "Alice" };
pub const BOB: TestUser = TestUser { id: 1002, username: "bob", first_name: "Bob" };

fn user_json(user: &TestUser) -> Value {
    json!({
        "id": user.id,
        "is_bot": false,
        "first_name": user.first_name,
        "username": user.username,
        "language_code": "en"
    })
}

fn chat_json(chat_id: i64) -> Value {
    if chat_id > 0 {
        json!({ "id": chat_id, "type": "private", "first_name": "Alice" })
    } else {
        json!({ "id": chat_id, "type": "supergroup", "title": "The Flat" })
    }
}

fn message_json(user: &TestUser, chat_id: i64, text: &str) -> Value {
    let mut message = json!({
        "message_id": 42,
        "date": 1705287600,
        "chat": chat_json(chat_id),
        "from": user_json(user),
        "text": text
    });

    if text.starts_with('/') {
        let length = text.split_whitespace().next().map_or(0, |t| t.encode_utf16().count());
        message["entities"] = json!([{ "type": "bot_command", "offset": 0, "length": length }]);
    }
    message
}

/// Create a text message; a leading `/` makes it a bot command
pub fn text_message(user: &TestUser, chat_id: i64, text: &str) -> Message {
    serde_json::from_value(message_json(user, chat_id, text)).expect("valid message JSON")
}

/// Create a callback query for a button under a bot message in `chat_id`
pub fn callback_query(user: &TestUser, chat_id: i64, data: &str) -> CallbackQuery {
    let mut message = message_json(user, chat_id, "menu");
    message["from"] = json!({ "id": 12345, "is_bot": true, "first_name": "Housemate", "username": "house_bot" });

    serde_json::from_value(json!({
        "id": "4382bfdwdsb323b2d9",
        "from": user_json(user),
        "message": message,
        "chat_instance": "-9007199254740991",
        "data": data
    }))
    .expect("valid callback JSON")
}
