//! Spreadsheet layout
//!
//! Cell positions shared by the repositories. A month sheet is a copy of
//! [`TEMPLATE_SHEET`] named `M/YYYY`; the name of the active one is kept in
//! [`DATABASE_SHEET`]`!`[`CURRENT_SHEET_CELL`].

pub const DATABASE_SHEET: &str = "Database";
pub const CURRENT_SHEET_CELL: &str = "B2";
pub const TEMPLATE_SHEET: &str = "Template";

// Month sheet
pub const DISPLAY_NAME_CELL: &str = "A1";
pub const NEXT_EXPENSE_ID_CELL: &str = "B2";
pub const EXPENSE_START_COL: &str = "A";
pub const EXPENSE_END_COL: &str = "G";
/// Header row; expense `id` lives on row `EXPENSE_HEADER_ROW + id`
pub const EXPENSE_HEADER_ROW: usize = 3;

pub const REPORT_START_COL: &str = "I";
pub const REPORT_END_COL: &str = "L";
pub const REPORT_START_ROW: usize = 4;
pub const REPORT_END_ROW: usize = 6;

pub const RENT_ELECTRIC_CELL: &str = "J9";
pub const RENT_WATER_CELL: &str = "J10";
pub const RENT_OTHER_FEES_CELL: &str = "J11";
pub const RENT_TOTAL_CELL: &str = "J12";
pub const RENT_PAYER_CELL: &str = "J13";

pub const BALANCE_START_COL: &str = "I";
pub const BALANCE_END_COL: &str = "M";
/// Balance of member `n` (1-based) lives on row `BALANCE_HEADER_ROW + n`
pub const BALANCE_HEADER_ROW: usize = 15;

pub const MEMBER_COUNT_CELL: &str = "P2";
pub const MEMBER_START_COL: &str = "O";
pub const MEMBER_END_COL: &str = "Q";
pub const MEMBER_START_ROW: usize = 4;

// Tasks sheet
pub const TASKS_SHEET: &str = "Tasks";
pub const TASK_COUNT_CELL: &str = "B1";
pub const TASK_START_COL: &str = "A";
pub const TASK_END_COL: &str = "I";
/// Header row; task `id` lives on row `TASK_HEADER_ROW + id`
pub const TASK_HEADER_ROW: usize = 2;

pub const TASK_WEIGHT_COUNT_CELL: &str = "L1";
pub const TASK_WEIGHT_START_COL: &str = "K";
pub const TASK_WEIGHT_END_COL: &str = "M";
pub const TASK_WEIGHT_START_ROW: usize = 3;

/// Sheet name for a month, e.g. `1/2024`
pub fn month_sheet_name(month: u32, year: i32) -> String {
    format!("{}/{}", month, year)
}

/// Display name written into a new month sheet, e.g. `01/2024`
pub fn month_display_name(month: u32, year: i32) -> String {
    format!("{:02}/{}", month, year)
}

pub fn expense_row(id: i64) -> usize {
    EXPENSE_HEADER_ROW + id.max(0) as usize
}

pub fn task_row(id: i64) -> usize {
    TASK_HEADER_ROW + id.max(0) as usize
}
