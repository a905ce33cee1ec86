//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks

use teloxide::{Bot, requests::Requester, types::CallbackQuery};
use tracing::{debug, warn};
use crate::handlers::commands::{gsheets, housework, settings, splitbill};
use crate::handlers::{commands, report_error, router, CallbackAction, HandlerContext, Route, Sender};
use crate::middleware::logging::log_callback;
use crate::utils::errors::Result;

/// Main callback query dispatcher
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, ctx: HandlerContext) -> Result<()> {
    log_callback(&query);

    // Answer the callback query first to remove loading state
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let action = match query.data.as_deref().and_then(router::parse_callback) {
        Some(action) => action,
        None => {
            debug!(callback_data = ?query.data, "Unknown callback ignored");
            return Ok(());
        }
    };
    let sender = Sender::from_callback(&query);

    if let Err(e) = dispatch(&bot, &sender, action, &ctx).await {
        report_error(&bot, sender.chat_id, &e).await;
    }
    Ok(())
}

async fn dispatch(bot: &Bot, sender: &Sender, action: CallbackAction, ctx: &HandlerContext) -> Result<()> {
    if let CallbackAction::Help(command) = action {
        return commands::handle_route(bot, sender, Route::Command(command), ctx).await;
    }

    if action.is_restricted() && !ctx.auth.guard(bot, sender.chat_id).await? {
        return Ok(());
    }

    let chat_id = sender.chat_id;
    match action {
        CallbackAction::HouseworkList => housework::handle_housework(bot, chat_id, ctx).await,
        CallbackAction::HouseworkView(id) => housework::handle_view(bot, chat_id, ctx, id).await,
        CallbackAction::HouseworkDone(id) => housework::handle_done(bot, sender, ctx, id).await,
        CallbackAction::HouseworkAssign(id) => housework::handle_assign(bot, sender, ctx, id).await,

        CallbackAction::SplitBillAdd => splitbill::start_add(bot, sender, ctx).await,
        CallbackAction::SplitBillView => splitbill::handle_view(bot, chat_id, ctx).await,
        CallbackAction::SplitBillUpdate => splitbill::start_update(bot, sender, ctx).await,
        CallbackAction::SplitBillUpdateSelect(id) => splitbill::select_update(bot, sender, ctx, id).await,
        CallbackAction::SplitBillDelete => splitbill::start_delete(bot, chat_id, ctx).await,
        CallbackAction::SplitBillDeleteSelect(id) => splitbill::select_delete(bot, chat_id, ctx, id).await,
        CallbackAction::SplitBillDeleteConfirm(id) => splitbill::confirm_delete(bot, sender, ctx, id).await,
        CallbackAction::SplitBillDeleteCancel(id) => splitbill::cancel_delete(bot, chat_id, id).await,
        CallbackAction::SplitBillReport => splitbill::handle_report(bot, chat_id, ctx).await,

        CallbackAction::RemindersToggle => settings::handle_toggle_reminders(bot, sender, ctx).await,
        CallbackAction::NewMonthSheet => gsheets::handle_new_month_sheet(bot, sender, ctx).await,

        CallbackAction::Help(_) => Ok(()),
    }
}
