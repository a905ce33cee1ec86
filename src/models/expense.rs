//! Expense model

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::sheets::row::{RowReader, SheetRow};
use crate::utils::errors::{HousemateError, Result};
use crate::utils::helpers::{escape_markdown, format_date, format_money_str, mention, parse_amount, parse_date};

/// One line of the expense ledger on the month sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub name: String,
    /// Whole amount, kept as the string written to the sheet
    pub amount: String,
    pub date: String,
    pub payer: String,
    /// Empty means everyone
    pub participants: Vec<String>,
    /// Append-only audit log
    pub note: String,
}

/// Validated input for a new expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub name: String,
    pub amount: String,
    pub date: String,
    pub payer: String,
    pub participants: Vec<String>,
}

impl SheetRow for Expense {
    const MIN_COLUMNS: usize = 1;

    fn decode_row(row: &[String], range: &str) -> Result<Self> {
        let reader = RowReader::new(row, range, Self::MIN_COLUMNS)?;
        Ok(Self {
            id: reader.number(0, "ID")?,
            name: reader.text(1),
            amount: reader.text(2),
            date: reader.text(3),
            payer: reader.text(4),
            participants: reader.list(5),
            note: reader.text(6),
        })
    }

    fn encode_row(&self) -> Vec<Value> {
        let amount = self
            .amount
            .parse::<i64>()
            .map(|a| json!(a))
            .unwrap_or_else(|_| json!(self.amount));
        vec![
            json!(self.id),
            json!(self.name),
            amount,
            json!(self.date),
            json!(self.payer),
            json!(self.participants.join(", ")),
            json!(self.note),
        ]
    }
}

impl Expense {
    pub fn from_request(id: i64, request: CreateExpenseRequest, note: String) -> Self {
        Self {
            id,
            name: request.name,
            amount: request.amount,
            date: request.date,
            payer: request.payer,
            participants: request.participants,
            note,
        }
    }

    /// Soft-deleted rows keep their id and lose their name
    pub fn is_deleted(&self) -> bool {
        self.name.is_empty()
    }

    /// Blank every field but the id and the note
    pub fn soft_delete(&mut self) {
        self.name.clear();
        self.amount.clear();
        self.date.clear();
        self.payer.clear();
        self.participants.clear();
    }

    pub fn to_markdown(&self) -> String {
        let participants = if self.participants.is_empty() {
            "*everyone*".to_string()
        } else {
            escape_markdown(&self.participants.join(", "))
        };
        let note = if self.note.is_empty() {
            String::new()
        } else {
            format!("_{}_", escape_markdown(&self.note))
        };

        format!(
            "• *ID*: {}\n  *Name*: {}\n  *Amount*: {}\n  *Date*: {}\n  *Payer*: {}\n  *Participants*: {}\n  *Note*: {}\n",
            self.id,
            escape_markdown(&self.name),
            format_money_str(&self.amount),
            self.date,
            escape_markdown(&self.payer),
            participants,
            note,
        )
    }
}

impl CreateExpenseRequest {
    /// Parse the multi-line expense message.
    ///
    /// Lines are `name`, `amount`, then optional `date` and `payer`; blank optional
    /// lines take `default_date` and `default_payer`.
    pub fn parse(text: &str, default_date: &str, default_payer: &str) -> Result<Self> {
        let lines: Vec<&str> = text.split('\n').map(str::trim).collect();
        if lines.len() < 2 {
            return Err(HousemateError::validation("Please provide at least the expense name and amount."));
        }

        let name = lines[0].to_string();
        if name.is_empty() {
            return Err(HousemateError::validation("Expense name cannot be empty."));
        }

        let raw_amount = lines[1];
        if raw_amount.is_empty() {
            return Err(HousemateError::validation("Amount cannot be empty."));
        }
        let amount = parse_amount(raw_amount)
            .ok_or_else(|| HousemateError::validation(format!("Cannot parse '{}' as an amount.", raw_amount)))?;

        let date = match lines.get(2).copied().unwrap_or("") {
            "" => default_date.to_string(),
            value => format_date(parse_date(value)?),
        };

        let payer = match lines.get(3).copied().unwrap_or("") {
            "" => mention(default_payer),
            value => mention(value),
        };

        let participants = lines
            .get(4)
            .map(|line| {
                line.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(mention)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            name,
            amount,
            date,
            payer,
            participants,
        })
    }
}
