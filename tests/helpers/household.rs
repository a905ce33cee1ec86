//! A seeded household for end-to-end tests
//!
//! The workbook has three members and two tasks on the `1/2024` month sheet,
//! and the clock is pinned to 15/01/2024 in Asia/Bangkok.

use std::sync::Arc;
use chrono::{TimeZone, Utc};
use teloxide::Bot;
use Housemate::{
    config::Settings,
    handlers::{handle_callback_query, handle_message, HandlerContext},
    services::ServiceFactory,
    sheets::{MemorySpreadsheet, SpreadsheetClient},
    state::StateStorage,
    utils::helpers::Clock,
};
use super::telegram_mock::*;
use super::test_data::*;

pub const MONTH_SHEET: &str = "1/2024";

pub struct TestHousehold {
    pub telegram: TelegramMockServer,
    pub bot: Bot,
    pub sheet: Arc<MemorySpreadsheet>,
    pub ctx: HandlerContext,
}

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.bot.token = test_bot_token();
    settings.bot.username = test_bot_username().to_string();
    settings.bot.allowed_chat_ids = vec![house_chat_id()];
    settings.bot.feedback_contact = "@landlord".to_string();
    settings.google.spreadsheet_id = "test-spreadsheet".to_string();
    settings
}

/// 15/01/2024 10:00 in Bangkok
pub fn test_clock() -> Clock {
    Clock::fixed(chrono_tz::Asia::Bangkok, Utc.with_ymd_and_hms(2024, 1, 15, 3, 0, 0).unwrap())
}

pub fn seeded_workbook() -> MemorySpreadsheet {
    let sheet = MemorySpreadsheet::with_workbook(MONTH_SHEET).unwrap();

    sheet.put("'1/2024'!P2", &[&["3"]]).unwrap();
    sheet
        .put("'1/2024'!O4", &[&["1", "alice", "1"], &["2", "bob", "1"], &["3", "carol", "2"]])
        .unwrap();

    sheet.put("Tasks!B1", &[&["2"]]).unwrap();
    sheet
        .put(
            "Tasks!A3",
            &[
                &["1", "Dishes", "2", "13/01/2024", "15/01/2024", "@alice", "", "-1001234567890", ""],
                &["2", "Trash", "7", "10/01/2024", "17/01/2024", "@bob", "", "-1001234567890", ""],
            ],
        )
        .unwrap();
    sheet
}

impl TestHousehold {
    pub async fn new() -> Self {
        Self::with_workbook(seeded_workbook()).await
    }

    pub async fn with_workbook(workbook: MemorySpreadsheet) -> Self {
        let telegram = TelegramMockServer::new().await;
        telegram.setup_default_mocks().await;

        let bot = Bot::new(test_bot_token()).set_api_url(telegram.api_url());
        let sheet = Arc::new(workbook);
        let client: Arc<dyn SpreadsheetClient> = sheet.clone();

        let settings = test_settings();
        let services = ServiceFactory::new(bot.clone(), &settings, client, test_clock());
        let state_storage = StateStorage::new(&settings.state);
        let ctx = HandlerContext::new(settings, services, state_storage);

        Self { telegram, bot, sheet, ctx }
    }

    /// Deliver a text message from `user` in `chat_id`
    pub async fn send(&self, user: &TestUser, chat_id: i64, text: &str) {
        handle_message(self.bot.clone(), text_message(user, chat_id, text), self.ctx.clone())
            .await
            .unwrap();
    }

    /// Deliver a button click from `user` in `chat_id`
    pub async fn click(&self, user: &TestUser, chat_id: i64, data: &str) {
        handle_callback_query(self.bot.clone(), callback_query(user, chat_id, data), self.ctx.clone())
            .await
            .unwrap();
    }

    pub fn cell(&self, range: &str) -> String {
        self.sheet.cell(range).unwrap()
    }

    /// Add expenses through the add flow, one per line group
    pub async fn add_expenses(&self, user: &TestUser, details: &[&str]) {
        for detail in details {
            self.click(user, house_chat_id(), "splitbill.add").await;
            self.send(user, house_chat_id(), detail).await;
        }
    }
}
