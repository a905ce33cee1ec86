//! Housemate Telegram Bot
//!
//! Main application entry point

use std::str::FromStr;
use std::sync::Arc;
use chrono::Datelike;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

use Housemate::{
    config::Settings,
    handlers::{self, Command, HandlerContext},
    services::ServiceFactory,
    sheets::{layout::month_sheet_name, GoogleSheetsClient, MemorySpreadsheet, SpreadsheetClient},
    state::StateStorageManager,
    utils::{helpers::Clock, logging},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let mut settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", Housemate::info());

    let clock = Clock::system(settings.timezone()?);
    let dry_run = std::env::args().any(|arg| arg == "--dry-run");

    let spreadsheet: Arc<dyn SpreadsheetClient> = if dry_run {
        let today = clock.today();
        let month_sheet = month_sheet_name(today.month(), today.year());
        warn!(sheet = %month_sheet, "Dry run: using an in-memory spreadsheet, nothing is saved");
        Arc::new(MemorySpreadsheet::with_workbook(&month_sheet)?)
    } else {
        info!("Connecting to Google Sheets...");
        Arc::new(GoogleSheetsClient::new(&settings.google).await?)
    };

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);
    let me = bot.get_me().await?;
    if settings.bot.username.is_empty() {
        settings.bot.username = me.username().to_string();
    }
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(bot.clone(), &settings, spreadsheet, clock);

    // Initialize state management
    let mut state_manager = StateStorageManager::new(&settings.state);
    state_manager.start_cleanup();

    // Housework reminders
    let schedule = cron::Schedule::from_str(&settings.housework.reminder_cron)?;
    tokio::spawn(services.notification_service.clone().run_schedule(schedule));

    let context = HandlerContext::new(settings, services, state_manager.storage().clone());

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![context])
        .default_handler(|upd| async move {
            tracing::debug!(update_id = ?upd.id, "Unhandled update");
        })
        .enable_ctrlc_handler()
        .build();

    info!(username = %me.username(), "Housemate bot is ready, polling for updates");
    dispatcher.dispatch().await;

    state_manager.stop_cleanup();
    info!("Housemate bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(handle_messages))
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
}

/// Handle commands and conversation input
async fn handle_messages(bot: Bot, msg: Message, ctx: HandlerContext) -> HandlerResult {
    if let Err(e) = handlers::handle_message(bot, msg, ctx).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }
    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(bot: Bot, query: CallbackQuery, ctx: HandlerContext) -> HandlerResult {
    if let Err(e) = handlers::handle_callback_query(bot, query, ctx).await {
        error!(error = %e, "Error handling callback query");
        return Err(e.into());
    }
    Ok(())
}
