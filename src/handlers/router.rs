//! Command and callback routing
//!
//! Turns the text of a command message or the payload of a button click into
//! a typed route. Anything unrecognised maps to `None` and is ignored.

use teloxide::types::{Message, MessageEntityKind};
use super::commands::Command;

/// Where a command message goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Command(Command),
    /// `/hw<id>` shortcut
    TaskDone(i64),
}

impl Route {
    pub fn is_restricted(&self) -> bool {
        match self {
            Route::Command(command) => command.is_restricted(),
            Route::TaskDone(_) => true,
        }
    }
}

/// Button payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// `help.<command>` opens the command's handler
    Help(Command),
    HouseworkList,
    HouseworkView(i64),
    HouseworkDone(i64),
    HouseworkAssign(i64),
    SplitBillAdd,
    SplitBillView,
    SplitBillUpdate,
    SplitBillUpdateSelect(i64),
    SplitBillDelete,
    SplitBillDeleteSelect(i64),
    SplitBillDeleteConfirm(i64),
    SplitBillDeleteCancel(i64),
    SplitBillReport,
    RemindersToggle,
    NewMonthSheet,
}

impl CallbackAction {
    /// Every callback outside `help.*` needs an allowed chat
    pub fn is_restricted(&self) -> bool {
        !matches!(self, CallbackAction::Help(_))
    }
}

/// Whether the message starts with a bot-command entity
pub fn starts_with_command(message: &Message) -> bool {
    message
        .entities()
        .and_then(|entities| entities.first())
        .map_or(false, |entity| entity.offset == 0 && entity.kind == MessageEntityKind::BotCommand)
}

/// Route a command message, or `None` when it is not a command for this bot
pub fn route_message(message: &Message, bot_username: &str, shortcut_prefix: &str) -> Option<Route> {
    if !starts_with_command(message) {
        return None;
    }
    parse_command(message.text()?, bot_username, shortcut_prefix)
}

/// Parse `/command[@botname] args`.
///
/// The command name is case-insensitive. A `@botname` suffix naming another bot
/// rejects the command.
pub fn parse_command(text: &str, bot_username: &str, shortcut_prefix: &str) -> Option<Route> {
    let token = text.split_whitespace().next()?.strip_prefix('/')?;

    let name = match token.split_once('@') {
        Some((name, target)) => {
            if !target.eq_ignore_ascii_case(bot_username.trim_start_matches('@')) {
                return None;
            }
            name
        }
        None => token,
    };
    let name = name.to_lowercase();

    if let Some(command) = Command::from_name(&name) {
        return Some(Route::Command(command));
    }

    let digits = name.strip_prefix(&shortcut_prefix.to_lowercase())?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(Route::TaskDone)
}

fn parse_id(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().filter(|id| *id > 0)
}

/// Parse callback data such as `housework.3.done` or `splitbill.delete.confirm.7`
pub fn parse_callback(data: &str) -> Option<CallbackAction> {
    let parts: Vec<&str> = data.split('.').collect();

    let action = match parts.as_slice() {
        ["help", command] => CallbackAction::Help(Command::from_name(command)?),

        ["housework", "list"] => CallbackAction::HouseworkList,
        ["housework", id, action] => {
            let id = parse_id(id)?;
            match *action {
                "view" => CallbackAction::HouseworkView(id),
                "done" => CallbackAction::HouseworkDone(id),
                "assign" => CallbackAction::HouseworkAssign(id),
                _ => return None,
            }
        }

        ["splitbill", "add"] => CallbackAction::SplitBillAdd,
        ["splitbill", "view"] => CallbackAction::SplitBillView,
        ["splitbill", "update"] => CallbackAction::SplitBillUpdate,
        ["splitbill", "update", id] => CallbackAction::SplitBillUpdateSelect(parse_id(id)?),
        ["splitbill", "delete"] => CallbackAction::SplitBillDelete,
        ["splitbill", "delete", "confirm", id] => CallbackAction::SplitBillDeleteConfirm(parse_id(id)?),
        ["splitbill", "delete", "cancel", id] => CallbackAction::SplitBillDeleteCancel(parse_id(id)?),
        ["splitbill", "delete", id] => CallbackAction::SplitBillDeleteSelect(parse_id(id)?),
        ["splitbill", "report"] => CallbackAction::SplitBillReport,

        ["settings", "reminders", "toggle"] => CallbackAction::RemindersToggle,
        ["gsheets", "new"] => CallbackAction::NewMonthSheet,

        _ => return None,
    };

    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(text: &str, entity: Option<(&str, usize)>) -> Message {
        let entities = match entity {
            Some((kind, offset)) => json!([{ "type": kind, "offset": offset, "length": 5 }]),
            None => json!([]),
        };
        serde_json::from_value(json!({
            "message_id": 1,
            "date": 1705300000,
            "chat": { "id": -100123, "type": "supergroup", "title": "Flat" },
            "from": { "id": 7, "is_bot": false, "first_name": "Alice", "username": "alice" },
            "text": text,
            "entities": entities,
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("/help", "house_bot", "hw"), Some(Route::Command(Command::Help)));
        assert_eq!(parse_command("/HELP now", "house_bot", "hw"), Some(Route::Command(Command::Help)));
        assert_eq!(parse_command("/start", "house_bot", "hw"), Some(Route::Command(Command::Start)));
        assert_eq!(parse_command("/rent", "house_bot", "hw"), Some(Route::Command(Command::Rent)));
    }

    #[test]
    fn test_bot_suffix() {
        assert_eq!(
            parse_command("/splitbill@House_Bot", "house_bot", "hw"),
            Some(Route::Command(Command::Splitbill))
        );
        assert_eq!(parse_command("/splitbill@other_bot", "house_bot", "hw"), None);
    }

    #[test]
    fn test_shortcut() {
        assert_eq!(parse_command("/hw3", "house_bot", "hw"), Some(Route::TaskDone(3)));
        assert_eq!(parse_command("/HW12@house_bot", "house_bot", "hw"), Some(Route::TaskDone(12)));
        assert_eq!(parse_command("/hw", "house_bot", "hw"), None);
        assert_eq!(parse_command("/hwx", "house_bot", "hw"), None);
        assert_eq!(parse_command("/unknown", "house_bot", "hw"), None);
        assert_eq!(parse_command("help", "house_bot", "hw"), None);
    }

    #[test]
    fn test_route_message_requires_command_entity() {
        let with_entity = message("/help", Some(("bot_command", 0)));
        assert_eq!(
            route_message(&with_entity, "house_bot", "hw"),
            Some(Route::Command(Command::Help))
        );

        let without_entity = message("/help", None);
        assert_eq!(route_message(&without_entity, "house_bot", "hw"), None);

        let other_entity = message("/help", Some(("bold", 0)));
        assert_eq!(route_message(&other_entity, "house_bot", "hw"), None);
    }

    #[test]
    fn test_restricted_routes() {
        assert!(Route::TaskDone(1).is_restricted());
        assert!(Route::Command(Command::Housework).is_restricted());
        assert!(!Route::Command(Command::Hello).is_restricted());
        assert!(!Route::Command(Command::Cancel).is_restricted());
    }

    #[test]
    fn test_parse_callback() {
        assert_eq!(parse_callback("housework.list"), Some(CallbackAction::HouseworkList));
        assert_eq!(parse_callback("housework.3.done"), Some(CallbackAction::HouseworkDone(3)));
        assert_eq!(parse_callback("housework.3.assign"), Some(CallbackAction::HouseworkAssign(3)));
        assert_eq!(parse_callback("housework.3.view"), Some(CallbackAction::HouseworkView(3)));
        assert_eq!(parse_callback("splitbill.update.4"), Some(CallbackAction::SplitBillUpdateSelect(4)));
        assert_eq!(parse_callback("splitbill.delete.4"), Some(CallbackAction::SplitBillDeleteSelect(4)));
        assert_eq!(
            parse_callback("splitbill.delete.confirm.4"),
            Some(CallbackAction::SplitBillDeleteConfirm(4))
        );
        assert_eq!(
            parse_callback("splitbill.delete.cancel.4"),
            Some(CallbackAction::SplitBillDeleteCancel(4))
        );
        assert_eq!(parse_callback("settings.reminders.toggle"), Some(CallbackAction::RemindersToggle));
        assert_eq!(parse_callback("gsheets.new"), Some(CallbackAction::NewMonthSheet));
        assert_eq!(parse_callback("help.housework"), Some(CallbackAction::Help(Command::Housework)));
    }

    #[test]
    fn test_unknown_callbacks() {
        assert_eq!(parse_callback(""), None);
        assert_eq!(parse_callback("housework.0.done"), None);
        assert_eq!(parse_callback("housework.3.sweep"), None);
        assert_eq!(parse_callback("splitbill.delete.confirm.x"), None);
        assert_eq!(parse_callback("help.nothing"), None);
        assert_eq!(parse_callback("lang:en"), None);
    }

    #[test]
    fn test_only_help_is_unrestricted() {
        assert!(!CallbackAction::Help(Command::Rent).is_restricted());
        assert!(CallbackAction::HouseworkList.is_restricted());
        assert!(CallbackAction::RemindersToggle.is_restricted());
    }
}
