//! Monthly report model
//!
//! The report and balance cells are computed by sheet formulas; the bot only
//! reads and re-formats them.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::sheets::row::{RowReader, SheetRow};
use crate::utils::errors::Result;
use crate::utils::helpers::{escape_markdown, format_money_str};

/// One line of the report block: Expenses, Rent or Total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub label: String,
    pub amount: String,
    pub average: String,
    pub note: String,
}

/// Per-member balance line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub username: String,
    pub total_paid: String,
    pub have_to_pay: String,
    pub balance: String,
    /// Balance adjusted by the rent average, depending on who paid the rent
    pub final_balance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub sheet_name: String,
    pub lines: Vec<ReportData>,
    pub balances: Vec<Balance>,
}

impl SheetRow for ReportData {
    const MIN_COLUMNS: usize = 1;

    fn decode_row(row: &[String], range: &str) -> Result<Self> {
        let reader = RowReader::new(row, range, Self::MIN_COLUMNS)?;
        Ok(Self {
            label: reader.text(0),
            amount: reader.text(1),
            average: reader.text(2),
            note: reader.text(3),
        })
    }

    fn encode_row(&self) -> Vec<Value> {
        vec![json!(self.label), json!(self.amount), json!(self.average), json!(self.note)]
    }
}

impl SheetRow for Balance {
    const MIN_COLUMNS: usize = 1;

    fn decode_row(row: &[String], range: &str) -> Result<Self> {
        let reader = RowReader::new(row, range, Self::MIN_COLUMNS)?;
        Ok(Self {
            username: reader.required_text(0, "Username")?,
            total_paid: reader.text(1),
            have_to_pay: reader.text(2),
            balance: reader.text(3),
            final_balance: reader.text(4),
        })
    }

    fn encode_row(&self) -> Vec<Value> {
        vec![
            json!(self.username),
            json!(self.total_paid),
            json!(self.have_to_pay),
            json!(self.balance),
            json!(self.final_balance),
        ]
    }
}

impl Report {
    pub fn to_markdown(&self) -> String {
        let mut text = format!("📊 *Report {}*\n\n", escape_markdown(&self.sheet_name));

        for line in self.lines.iter().filter(|l| !l.label.is_empty()) {
            text.push_str(&format!(
                "*{}*: {} (avg {})",
                escape_markdown(&line.label),
                format_money_str(&line.amount),
                format_money_str(&line.average),
            ));
            if !line.note.is_empty() {
                text.push_str(&format!(" _{}_", escape_markdown(&line.note)));
            }
            text.push('\n');
        }

        if !self.balances.is_empty() {
            text.push_str("\n*Balances:*\n");
            for balance in &self.balances {
                text.push_str(&format!(
                    "👤 *{}*\n  Paid: {}\n  Owes: {}\n  Balance: {}\n  Final: *{}*\n",
                    escape_markdown(&balance.username),
                    format_money_str(&balance.total_paid),
                    format_money_str(&balance.have_to_pay),
                    format_money_str(&balance.balance),
                    format_money_str(&balance.final_balance),
                ));
            }
        }

        text
    }
}
