//! Split-bill command handlers
//!
//! `/splitbill` opens a menu. Adding and updating expenses are short
//! conversations owned by the user who started them; deleting goes through a
//! confirm/cancel keyboard.

use teloxide::{
    Bot,
    payloads::SendMessageSetters,
    requests::Requester,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
};
use tracing::debug;
use crate::handlers::{HandlerContext, Sender};
use crate::models::expense::{CreateExpenseRequest, Expense};
use crate::state::{
    scenarios::{self, steps},
    ConversationContext,
};
use crate::utils::errors::{HousemateError, Result};
use crate::utils::helpers::{escape_markdown, format_date, format_money_str, parse_amount};
use crate::utils::logging::log_user_action;
use super::rent;

const EXPENSE_ID_KEY: &str = "expense_id";

/// Handle /splitbill command
pub async fn handle_splitbill(bot: &Bot, chat_id: ChatId) -> Result<()> {
    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("➕ Add", "splitbill.add"),
            InlineKeyboardButton::callback("👀 View", "splitbill.view"),
        ],
        vec![
            InlineKeyboardButton::callback("✏️ Update", "splitbill.update"),
            InlineKeyboardButton::callback("🗑 Delete", "splitbill.delete"),
        ],
        vec![InlineKeyboardButton::callback("📊 Report", "splitbill.report")],
    ]);

    bot.send_message(chat_id, "💸 *Split bill*\n\nWhat would you like to do?")
        .parse_mode(ParseMode::Markdown)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

/// Start the add-expense conversation
pub async fn start_add(bot: &Bot, sender: &Sender, ctx: &HandlerContext) -> Result<()> {
    start_conversation(sender, ctx, scenarios::ADD_EXPENSE).await?;

    let today = format_date(ctx.services.clock.today());
    let text = format!(
        "➕ *Add expense*\n\nSend one message with one field per line:\n\
         1. Name\n\
         2. Amount, e.g. 50k or 120000\n\
         3. Date, blank for {}\n\
         4. Payer, blank for {}\n\
         5. Participants, comma separated, blank for everyone\n\n\
         Send /cancel to stop.",
        today,
        escape_markdown(&sender.handle())
    );

    bot.send_message(sender.chat_id, text)
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

/// Expense details sent during the add conversation.
///
/// Invalid input leaves the conversation open so the user can try again.
pub async fn handle_add_input(
    bot: &Bot,
    sender: &Sender,
    ctx: &HandlerContext,
    mut context: ConversationContext,
    text: &str,
) -> Result<()> {
    ctx.scenario_manager.validate_input(&context, text)?;

    let today = format_date(ctx.services.clock.today());
    let default_payer = if sender.username.is_empty() { &sender.first_name } else { &sender.username };
    let request = CreateExpenseRequest::parse(text, &today, default_payer)?;

    if request.name.eq_ignore_ascii_case("rent") {
        debug!(user_id = sender.user_id, "Expense named rent, switching to the rent flow");
        ctx.state_storage.delete_context(context.key).await?;
        return rent::start_rent(bot, sender, ctx).await;
    }

    let expense = ctx
        .services
        .splitbill_service
        .add(request, &sender.handle(), &ctx.services.clock.now())
        .await?;

    ctx.scenario_manager.next_step(&mut context, steps::DONE)?;
    ctx.state_storage.delete_context(context.key).await?;
    log_user_action(sender.user_id, "expense_added", Some(&expense.id.to_string()));

    bot.send_message(sender.chat_id, format!("✅ *Expense added!*\n\n{}", expense.to_markdown()))
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

/// Show the most recent expenses
pub async fn handle_view(bot: &Bot, chat_id: ChatId, ctx: &HandlerContext) -> Result<()> {
    let expenses = ctx.services.splitbill_service.recent().await?;

    if expenses.is_empty() {
        bot.send_message(chat_id, "🧾 No expenses yet this month.").await?;
        return Ok(());
    }

    let list: Vec<String> = expenses.iter().map(Expense::to_markdown).collect();
    bot.send_message(chat_id, format!("🧾 *Latest expenses*\n\n{}", list.join("\n")))
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

/// Start the update conversation: pick an expense, then send its new amount
pub async fn start_update(bot: &Bot, sender: &Sender, ctx: &HandlerContext) -> Result<()> {
    let expenses = ctx.services.splitbill_service.recent().await?;
    start_conversation(sender, ctx, scenarios::UPDATE_EXPENSE).await?;

    bot.send_message(
        sender.chat_id,
        "✏️ *Update expense*\n\nPick one of the latest expenses or send the ID of any expense:",
    )
    .parse_mode(ParseMode::Markdown)
    .reply_markup(expense_picker(&expenses, "splitbill.update"))
    .await?;
    Ok(())
}

/// Handle the `splitbill.update.<id>` button
pub async fn select_update(bot: &Bot, sender: &Sender, ctx: &HandlerContext, id: i64) -> Result<()> {
    let key = ctx.scenario_manager.session_key(scenarios::UPDATE_EXPENSE, sender.chat_id.0, sender.user_id)?;

    let context = match ctx.state_storage.load_context(key).await? {
        Some(context) if context.is_at(scenarios::UPDATE_EXPENSE, steps::SELECT_EXPENSE) => context,
        _ => new_conversation(sender, ctx, scenarios::UPDATE_EXPENSE)?,
    };

    choose_expense(bot, sender, ctx, context, id).await
}

/// Input sent during the update conversation
pub async fn handle_update_input(
    bot: &Bot,
    sender: &Sender,
    ctx: &HandlerContext,
    mut context: ConversationContext,
    text: &str,
) -> Result<()> {
    ctx.scenario_manager.validate_input(&context, text)?;

    if context.is_at(scenarios::UPDATE_EXPENSE, steps::SELECT_EXPENSE) {
        let id = text
            .trim()
            .parse::<i64>()
            .map_err(|_| HousemateError::validation("Please send the ID of the expense to update."))?;
        return choose_expense(bot, sender, ctx, context, id).await;
    }

    let id = context.get_i64(EXPENSE_ID_KEY).ok_or_else(|| HousemateError::InvalidStateTransition {
        from: steps::SELECT_EXPENSE.to_string(),
        to: steps::ENTER_AMOUNT.to_string(),
    })?;
    let amount = parse_amount(text).ok_or_else(|| HousemateError::validation("Please send a valid amount."))?;

    let expense = ctx
        .services
        .splitbill_service
        .update_amount(id, amount, &sender.handle(), &ctx.services.clock.now())
        .await?;

    ctx.scenario_manager.next_step(&mut context, steps::DONE)?;
    ctx.state_storage.delete_context(context.key).await?;
    log_user_action(sender.user_id, "expense_updated", Some(&id.to_string()));

    bot.send_message(sender.chat_id, format!("✅ *Expense updated!*\n\n{}", expense.to_markdown()))
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

async fn choose_expense(
    bot: &Bot,
    sender: &Sender,
    ctx: &HandlerContext,
    mut context: ConversationContext,
    id: i64,
) -> Result<()> {
    let expense = active_expense(ctx, id).await?;

    context.set_data(EXPENSE_ID_KEY, id)?;
    ctx.scenario_manager.next_step(&mut context, steps::ENTER_AMOUNT)?;
    ctx.state_storage.save_context(&context).await?;

    let text = format!(
        "✏️ *{}* currently costs {}.\n\nSend the new amount:",
        escape_markdown(&expense.name),
        format_money_str(&expense.amount)
    );
    bot.send_message(sender.chat_id, text)
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

/// Pick an expense to delete
pub async fn start_delete(bot: &Bot, chat_id: ChatId, ctx: &HandlerContext) -> Result<()> {
    let expenses = ctx.services.splitbill_service.recent().await?;

    if expenses.is_empty() {
        bot.send_message(chat_id, "🧾 No expenses to delete.").await?;
        return Ok(());
    }

    bot.send_message(chat_id, "🗑 *Delete expense*\n\nPick the expense to delete:")
        .parse_mode(ParseMode::Markdown)
        .reply_markup(expense_picker(&expenses, "splitbill.delete"))
        .await?;
    Ok(())
}

/// Ask for confirmation before deleting
pub async fn select_delete(bot: &Bot, chat_id: ChatId, ctx: &HandlerContext, id: i64) -> Result<()> {
    let expense = active_expense(ctx, id).await?;

    let keyboard = InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Yes, delete", format!("splitbill.delete.confirm.{}", id)),
        InlineKeyboardButton::callback("❌ No", format!("splitbill.delete.cancel.{}", id)),
    ]]);

    bot.send_message(chat_id, format!("Delete this expense?\n\n{}", expense.to_markdown()))
        .parse_mode(ParseMode::Markdown)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

pub async fn confirm_delete(bot: &Bot, sender: &Sender, ctx: &HandlerContext, id: i64) -> Result<()> {
    ctx.services
        .splitbill_service
        .delete(id, &sender.handle(), &ctx.services.clock.now())
        .await?;
    log_user_action(sender.user_id, "expense_deleted", Some(&id.to_string()));

    bot.send_message(sender.chat_id, format!("🗑 Expense {} deleted.", id)).await?;
    Ok(())
}

pub async fn cancel_delete(bot: &Bot, chat_id: ChatId, id: i64) -> Result<()> {
    bot.send_message(chat_id, format!("Deletion of expense {} cancelled.", id)).await?;
    Ok(())
}

/// Show the report and balances of the active month sheet
pub async fn handle_report(bot: &Bot, chat_id: ChatId, ctx: &HandlerContext) -> Result<()> {
    let report = ctx.services.splitbill_service.report().await?;

    bot.send_message(chat_id, report.to_markdown())
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

async fn active_expense(ctx: &HandlerContext, id: i64) -> Result<Expense> {
    let expense = ctx.services.splitbill_service.get(id).await?;
    if expense.is_deleted() {
        return Err(HousemateError::validation(format!("Expense {} has been deleted.", id)));
    }
    Ok(expense)
}

fn new_conversation(sender: &Sender, ctx: &HandlerContext, scenario: &str) -> Result<ConversationContext> {
    let key = ctx.scenario_manager.session_key(scenario, sender.chat_id.0, sender.user_id)?;
    let mut context = ConversationContext::new(key);
    ctx.scenario_manager.start_scenario(&mut context, scenario, ctx.state_storage.ttl())?;
    Ok(context)
}

async fn start_conversation(sender: &Sender, ctx: &HandlerContext, scenario: &str) -> Result<()> {
    let context = new_conversation(sender, ctx, scenario)?;
    ctx.state_storage.save_context(&context).await
}

fn expense_picker(expenses: &[Expense], prefix: &str) -> InlineKeyboardMarkup {
    let rows = expenses
        .iter()
        .map(|expense| {
            vec![InlineKeyboardButton::callback(
                format!("#{} {} · {}", expense.id, expense.name, format_money_str(&expense.amount)),
                format!("{}.{}", prefix, expense.id),
            )]
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(rows)
}
