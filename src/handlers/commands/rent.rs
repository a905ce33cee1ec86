//! Rent conversation handlers
//!
//! Collects the total bill, then the electric and water bills, one message at
//! a time. The conversation belongs to the chat, so any member may answer.

use teloxide::{
    Bot,
    payloads::SendMessageSetters,
    requests::Requester,
    types::ParseMode,
};
use crate::handlers::{HandlerContext, Sender};
use crate::models::rent::RentData;
use crate::state::{
    scenarios::{self, steps},
    ConversationContext,
};
use crate::utils::errors::{HousemateError, Result};
use crate::utils::helpers::{format_money, parse_amount_value};
use crate::utils::logging::log_user_action;

const TOTAL_KEY: &str = "total_bill";
const ELECTRIC_KEY: &str = "electric";

/// Handle /rent command
pub async fn start_rent(bot: &Bot, sender: &Sender, ctx: &HandlerContext) -> Result<()> {
    let key = ctx.scenario_manager.session_key(scenarios::RENT, sender.chat_id.0, sender.user_id)?;
    let mut context = ConversationContext::new(key);
    ctx.scenario_manager.start_scenario(&mut context, scenarios::RENT, ctx.state_storage.ttl())?;
    ctx.state_storage.save_context(&context).await?;

    bot.send_message(sender.chat_id, "🏠 *Add Rent*\n\nPlease enter the 💰 *total rent bill* amount:")
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

/// One amount of the rent conversation.
///
/// An invalid number re-prompts in the same step. Once the water bill is in,
/// the conversation ends whether or not the bill could be saved.
pub async fn handle_rent_input(
    bot: &Bot,
    sender: &Sender,
    ctx: &HandlerContext,
    mut context: ConversationContext,
    text: &str,
) -> Result<()> {
    ctx.scenario_manager.validate_input(&context, text)?;
    let amount = parse_amount_value(text)
        .ok_or_else(|| HousemateError::validation("Please enter a valid number."))?;

    let reply = if context.is_at(scenarios::RENT, steps::RENT_TOTAL) {
        context.set_data(TOTAL_KEY, amount)?;
        ctx.scenario_manager.next_step(&mut context, steps::RENT_ELECTRIC)?;
        ctx.state_storage.save_context(&context).await?;
        format!("💰 Total: *{}*\n\nNow enter the ⚡ *electric* bill amount:", format_money(amount))
    } else if context.is_at(scenarios::RENT, steps::RENT_ELECTRIC) {
        context.set_data(ELECTRIC_KEY, amount)?;
        ctx.scenario_manager.next_step(&mut context, steps::RENT_WATER)?;
        ctx.state_storage.save_context(&context).await?;
        format!("⚡ Electric: *{}*\n\nNow enter the 💧 *water* bill amount:", format_money(amount))
    } else {
        let mut rent = RentData {
            total_bill: collected(&context, TOTAL_KEY)?,
            electric: collected(&context, ELECTRIC_KEY)?,
            water: amount,
            payer: sender.handle(),
            ..Default::default()
        };

        ctx.scenario_manager.next_step(&mut context, steps::DONE)?;
        ctx.state_storage.delete_context(context.key).await?;

        ctx.services.rent_service.save(&mut rent).await?;
        log_user_action(sender.user_id, "rent_saved", Some(&rent.total_bill.to_string()));
        rent.to_summary_markdown()
    };

    bot.send_message(sender.chat_id, reply)
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

fn collected(context: &ConversationContext, key: &str) -> Result<i64> {
    context.get_i64(key).ok_or_else(|| HousemateError::InvalidStateTransition {
        from: context.step.clone().unwrap_or_default(),
        to: steps::DONE.to_string(),
    })
}
