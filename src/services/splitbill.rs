//! Split-bill service implementation
//!
//! Expenses go to the active month sheet. Every change appends an audit line
//! to the expense note; deleting blanks the row but keeps its id.

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::info;
use crate::models::expense::{CreateExpenseRequest, Expense};
use crate::models::report::Report;
use crate::sheets::SheetsService;
use crate::utils::errors::{HousemateError, Result};
use crate::utils::helpers::{append_note, audit_line, format_money_str};

/// Number of expenses shown by the view action
pub const RECENT_EXPENSES: usize = 5;

#[derive(Clone)]
pub struct SplitBillService {
    sheets: SheetsService,
}

impl SplitBillService {
    pub fn new(sheets: SheetsService) -> Self {
        Self { sheets }
    }

    /// Store a new expense under the next id of the active month sheet
    pub async fn add(&self, request: CreateExpenseRequest, actor: &str, now: &DateTime<Tz>) -> Result<Expense> {
        let sheet = self.sheets.current_sheet().await?;
        let id = self.sheets.expenses.next_id(&sheet).await?;

        let expense = Expense::from_request(id, request, audit_line(now, actor, "added"));
        self.sheets.expenses.save(&sheet, &expense).await?;
        self.sheets.expenses.set_next_id(&sheet, id + 1).await?;

        info!(sheet = %sheet, expense_id = id, amount = %expense.amount, payer = %expense.payer, "Expense added");
        Ok(expense)
    }

    /// Get expense by ID, soft-deleted ones included
    pub async fn get(&self, id: i64) -> Result<Expense> {
        let sheet = self.sheets.current_sheet().await?;
        self.sheets
            .expenses
            .find_by_id(&sheet, id)
            .await?
            .ok_or_else(|| HousemateError::not_found("Expense", id))
    }

    async fn get_active(&self, id: i64) -> Result<Expense> {
        let expense = self.get(id).await?;
        if expense.is_deleted() {
            return Err(HousemateError::validation(format!("Expense {} has been deleted.", id)));
        }
        Ok(expense)
    }

    pub async fn recent(&self) -> Result<Vec<Expense>> {
        let sheet = self.sheets.current_sheet().await?;
        self.sheets.expenses.list_recent(&sheet, RECENT_EXPENSES).await
    }

    /// Change only the amount of an expense
    pub async fn update_amount(&self, id: i64, amount: String, actor: &str, now: &DateTime<Tz>) -> Result<Expense> {
        let sheet = self.sheets.current_sheet().await?;
        let mut expense = self.get_active(id).await?;

        let action = format!(
            "amount changed from {} to {}",
            format_money_str(&expense.amount),
            format_money_str(&amount)
        );
        expense.amount = amount;
        expense.note = append_note(&expense.note, &audit_line(now, actor, &action));
        self.sheets.expenses.save(&sheet, &expense).await?;

        info!(sheet = %sheet, expense_id = id, amount = %expense.amount, "Expense amount updated");
        Ok(expense)
    }

    /// Soft delete an expense
    pub async fn delete(&self, id: i64, actor: &str, now: &DateTime<Tz>) -> Result<Expense> {
        let sheet = self.sheets.current_sheet().await?;
        let mut expense = self.get_active(id).await?;

        expense.soft_delete();
        expense.note = append_note(&expense.note, &audit_line(now, actor, "deleted"));
        self.sheets.expenses.save(&sheet, &expense).await?;

        info!(sheet = %sheet, expense_id = id, "Expense deleted");
        Ok(expense)
    }

    pub async fn report(&self) -> Result<Report> {
        let sheet = self.sheets.current_sheet().await?;
        let member_count = self.sheets.members.count(&sheet).await?;
        self.sheets.reports.get(&sheet, member_count).await
    }
}
