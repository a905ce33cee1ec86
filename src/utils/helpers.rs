//! Helper functions and utilities
//!
//! Money formatting, amount parsing, parsing of the `DD/MM/YYYY`
//! dates stored in the spreadsheet, and Markdown helpers for chat replies.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use crate::utils::errors::{HousemateError, Result};

/// Date format used by every date cell in the spreadsheet
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Date-time format used in audit notes
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Currency symbol appended by [`format_money`]
pub const CURRENCY_SYMBOL: &str = "₫";

/// Source of "now" in the configured timezone.
///
/// Handlers read the time through a clock so that tests can pin the date.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    tz: Tz,
    fixed: Option<DateTime<Utc>>,
}

impl Clock {
    /// Wall-clock time in `tz`
    pub fn system(tz: Tz) -> Self {
        Self { tz, fixed: None }
    }

    /// Always returns `at`, expressed in `tz`
    pub fn fixed(tz: Tz, at: DateTime<Utc>) -> Self {
        Self { tz, fixed: Some(at) }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn now(&self) -> DateTime<Tz> {
        self.fixed.unwrap_or_else(Utc::now).with_timezone(&self.tz)
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Format an amount with thousands separators and the currency symbol.
///
/// `100000` becomes `"100,000 ₫"`.
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{} {}", sign, grouped, CURRENCY_SYMBOL)
}

/// Format a string-encoded amount, falling back to the raw text when it is not a number
pub fn format_money_str(amount: &str) -> String {
    match amount.trim().parse::<i64>() {
        Ok(value) => format_money(value),
        Err(_) => amount.to_string(),
    }
}

/// Largest amount accepted from user input
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Parse user input into a whole, non-negative amount.
///
/// Accepts a bare number or a `k` (thousand) / `m` (million) suffix:
/// `"5k"` is `"5000"`, `"2m"` is `"2000000"`, `"1.5k"` is `"1500"`.
/// Returns `None` when the input is not a number or exceeds [`MAX_AMOUNT`].
pub fn parse_amount(input: &str) -> Option<String> {
    let cleaned = input.trim().to_lowercase().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    let (number, multiplier) = if let Some(rest) = cleaned.strip_suffix('k') {
        (rest.trim(), 1_000.0)
    } else if let Some(rest) = cleaned.strip_suffix('m') {
        (rest.trim(), 1_000_000.0)
    } else {
        (cleaned.as_str(), 1.0)
    };

    let value = number.parse::<f64>().ok()?;
    let amount = (value * multiplier).round();
    if !amount.is_finite() || amount < 0.0 || amount > MAX_AMOUNT as f64 {
        return None;
    }

    Some(format!("{}", amount as i64))
}

/// Parse user input straight into an integer amount
pub fn parse_amount_value(input: &str) -> Option<i64> {
    parse_amount(input).and_then(|amount| amount.parse().ok())
}

/// Parse a `DD/MM/YYYY` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| HousemateError::validation(format!("'{}' is not a valid date (DD/MM/YYYY)", value)))
}

/// Format a date as `DD/MM/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whether a `DD/MM/YYYY` date is today or earlier relative to `today`
pub fn is_date_due_or_overdue(value: &str, today: NaiveDate) -> Result<bool> {
    Ok(parse_date(value)? <= today)
}

/// Build one audit line for a record note
pub fn audit_line<T: TimeZone>(at: &DateTime<T>, actor: &str, action: &str) -> String
where
    T::Offset: std::fmt::Display,
{
    format!("[{}] {} by {}", at.format(TIMESTAMP_FORMAT), action, actor)
}

/// Append an audit line to an existing note
pub fn append_note(note: &str, line: &str) -> String {
    if note.trim().is_empty() {
        line.to_string()
    } else {
        format!("{}\n{}", note, line)
    }
}

/// Prefix a username with `@` unless it already has one
pub fn mention(username: &str) -> String {
    if username.starts_with('@') {
        username.to_string()
    } else {
        format!("@{}", username)
    }
}

/// Escape characters that legacy Telegram Markdown treats as markup
pub fn escape_markdown(text: &str) -> String {
    text.replace('_', r"\_")
        .replace('*', r"\*")
        .replace('`', r"\`")
        .replace('[', r"\[")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(100000), "100,000 ₫");
        assert_eq!(format_money(999), "999 ₫");
        assert_eq!(format_money(0), "0 ₫");
        assert_eq!(format_money(1000), "1,000 ₫");
        assert_eq!(format_money(1234567), "1,234,567 ₫");
        assert_eq!(format_money(-50000), "-50,000 ₫");
    }

    #[test]
    fn test_format_money_str() {
        assert_eq!(format_money_str("50000"), "50,000 ₫");
        assert_eq!(format_money_str(""), "");
        assert_eq!(format_money_str("n/a"), "n/a");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("5k").as_deref(), Some("5000"));
        assert_eq!(parse_amount("2m").as_deref(), Some("2000000"));
        assert_eq!(parse_amount("1.5k").as_deref(), Some("1500"));
        assert_eq!(parse_amount("50K").as_deref(), Some("50000"));
        assert_eq!(parse_amount("120000").as_deref(), Some("120000"));
        assert_eq!(parse_amount(" 100,000 ").as_deref(), Some("100000"));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("k"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("-5k"), None);
    }

    #[test]
    fn test_parse_amount_caps_huge_values() {
        assert_eq!(parse_amount_value("1000000000m"), Some(MAX_AMOUNT));
        assert_eq!(parse_amount("9000000000000m"), None);
        assert_eq!(parse_amount("1e300"), None);
    }

    #[test]
    fn test_is_date_due_or_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert!(is_date_due_or_overdue("01/09/2000", today).unwrap());
        assert!(is_date_due_or_overdue("15/01/2024", today).unwrap());
        assert!(!is_date_due_or_overdue("16/01/2024", today).unwrap());
        assert!(!is_date_due_or_overdue("01/01/2099", today).unwrap());
        assert!(is_date_due_or_overdue("", today).is_err());
    }

    #[test]
    fn test_clock_uses_timezone() {
        // 18:00 UTC on the 14th is already the 15th in Bangkok (UTC+7)
        let at = Utc.with_ymd_and_hms(2024, 1, 14, 18, 0, 0).unwrap();
        let clock = Clock::fixed(chrono_tz::Asia::Bangkok, at);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(Clock::fixed(chrono_tz::UTC, at).today(), NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
    }

    #[test]
    fn test_audit_notes() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        let line = audit_line(&at, "@alice", "added");
        assert_eq!(line, "[15/01/2024 09:30] added by @alice");
        assert_eq!(append_note("", &line), line);
        assert_eq!(append_note("first", "second"), "first\nsecond");
    }

    #[test]
    fn test_mention_and_escape() {
        assert_eq!(mention("alice"), "@alice");
        assert_eq!(mention("@alice"), "@alice");
        assert_eq!(escape_markdown("@bob_smith"), r"@bob\_smith");
    }
}
