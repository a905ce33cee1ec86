//! A1 notation ranges
//!
//! `Sheet!A1:B2` with 0-based column indices and 1-based row numbers, the way
//! the Sheets API counts them.

use std::fmt;
use crate::utils::errors::{SheetsError, SheetsResult};

/// Convert a column letter (`A`, `Z`, `AA`) to a 0-based index
pub fn column_index(letters: &str) -> SheetsResult<usize> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SheetsError::InvalidRange(format!("bad column: {:?}", letters)));
    }
    let index = letters
        .to_ascii_uppercase()
        .bytes()
        .fold(0usize, |acc, b| acc * 26 + (b - b'A' + 1) as usize);
    Ok(index - 1)
}

/// Convert a 0-based column index to its letters
pub fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// A single cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub col: usize,
    pub row: usize,
}

impl CellRef {
    pub fn parse(text: &str) -> SheetsResult<Self> {
        let split = text
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| SheetsError::InvalidRange(format!("missing row: {:?}", text)))?;
        let (letters, digits) = text.split_at(split);
        let col = column_index(letters)?;
        let row = digits
            .parse::<usize>()
            .ok()
            .filter(|r| *r > 0)
            .ok_or_else(|| SheetsError::InvalidRange(format!("bad row: {:?}", text)))?;
        Ok(Self { col, row })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

/// A rectangular range on a named sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: String,
    pub start: CellRef,
    pub end: CellRef,
}

impl A1Range {
    /// Single cell, e.g. `A1Range::cell("Database", "B2")`
    pub fn cell(sheet: &str, cell: &str) -> SheetsResult<Self> {
        let cell = CellRef::parse(cell)?;
        Ok(Self { sheet: sheet.to_string(), start: cell, end: cell })
    }

    /// Block of whole rows between two columns, e.g. `A3:G5`
    pub fn rows(sheet: &str, start_col: &str, end_col: &str, start_row: usize, end_row: usize) -> SheetsResult<Self> {
        if start_row == 0 || end_row < start_row {
            return Err(SheetsError::InvalidRange(format!("bad rows {}..{}", start_row, end_row)));
        }
        Ok(Self {
            sheet: sheet.to_string(),
            start: CellRef { col: column_index(start_col)?, row: start_row },
            end: CellRef { col: column_index(end_col)?, row: end_row },
        })
    }

    /// One row between two columns
    pub fn row(sheet: &str, start_col: &str, end_col: &str, row: usize) -> SheetsResult<Self> {
        Self::rows(sheet, start_col, end_col, row, row)
    }

    /// Parse `Sheet!A1:B2`, `'My sheet'!A1` or `Sheet!B2`
    pub fn parse(text: &str) -> SheetsResult<Self> {
        let bang = text
            .rfind('!')
            .ok_or_else(|| SheetsError::InvalidRange(format!("missing sheet name: {:?}", text)))?;
        let (sheet, cells) = (&text[..bang], &text[bang + 1..]);

        let sheet = match sheet.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
            Some(quoted) => quoted.replace("''", "'"),
            None => sheet.to_string(),
        };
        if sheet.is_empty() {
            return Err(SheetsError::InvalidRange(format!("empty sheet name: {:?}", text)));
        }

        let (start, end) = match cells.split_once(':') {
            Some((start, end)) => (CellRef::parse(start)?, CellRef::parse(end)?),
            None => {
                let cell = CellRef::parse(cells)?;
                (cell, cell)
            }
        };
        if end.col < start.col || end.row < start.row {
            return Err(SheetsError::InvalidRange(format!("inverted range: {:?}", text)));
        }

        Ok(Self { sheet, start, end })
    }

    pub fn width(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    pub fn height(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    fn quoted_sheet(&self) -> String {
        if self.sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.sheet.clone()
        } else {
            format!("'{}'", self.sheet.replace('\'', "''"))
        }
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}!{}", self.quoted_sheet(), self.start)
        } else {
            write!(f, "{}!{}:{}", self.quoted_sheet(), self.start, self.end)
        }
    }
}
