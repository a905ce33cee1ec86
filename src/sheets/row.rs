//! Typed access to spreadsheet rows
//!
//! The Sheets API trims trailing empty cells, so a short row is normal. A row
//! that is missing its identity columns, or has text where a number is
//! expected, is reported as [`HousemateError::MalformedRow`].

use std::str::FromStr;
use serde_json::Value;
use crate::utils::errors::{HousemateError, Result};

/// Entities stored as one spreadsheet row
pub trait SheetRow: Sized {
    /// Number of leading cells that must be present
    const MIN_COLUMNS: usize;

    /// Decode a row read from `range`
    fn decode_row(row: &[String], range: &str) -> Result<Self>;

    /// Encode the entity as cell values, in column order
    fn encode_row(&self) -> Vec<Value>;
}

/// Cursor over the cells of a single row
pub struct RowReader<'a> {
    cells: &'a [String],
    range: &'a str,
}

impl<'a> RowReader<'a> {
    pub fn new(cells: &'a [String], range: &'a str, min_columns: usize) -> Result<Self> {
        if cells.len() < min_columns {
            return Err(HousemateError::MalformedRow {
                range: range.to_string(),
                reason: format!("expected at least {} cells, got {}", min_columns, cells.len()),
            });
        }
        Ok(Self { cells, range })
    }

    /// Trimmed text of a cell, blank when the cell is missing
    pub fn text(&self, col: usize) -> String {
        self.cells.get(col).map(|c| c.trim().to_string()).unwrap_or_default()
    }

    /// Text that must not be blank
    pub fn required_text(&self, col: usize, name: &str) -> Result<String> {
        let value = self.text(col);
        if value.is_empty() {
            return Err(self.malformed(format!("{} is empty", name)));
        }
        Ok(value)
    }

    /// Number that must be present and parse
    pub fn number<T: FromStr>(&self, col: usize, name: &str) -> Result<T> {
        let value = self.required_text(col, name)?;
        value
            .replace(',', "")
            .parse::<T>()
            .map_err(|_| self.malformed(format!("{} is not a number: {:?}", name, value)))
    }

    /// Number that may be blank
    pub fn optional_number<T: FromStr>(&self, col: usize, name: &str) -> Result<Option<T>> {
        if self.text(col).is_empty() {
            return Ok(None);
        }
        self.number(col, name).map(Some)
    }

    /// Comma separated list, blank entries dropped
    pub fn list(&self, col: usize) -> Vec<String> {
        self.text(col)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn malformed(&self, reason: String) -> HousemateError {
        HousemateError::MalformedRow {
            range: self.range.to_string(),
            reason,
        }
    }
}

/// Render a cell value returned by the API as text.
///
/// Integral numbers lose the trailing `.0` so ids and amounts round-trip as integers.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => if *b { "TRUE".to_string() } else { "FALSE".to_string() },
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_short_row_is_malformed() {
        let cells = row(&["1"]);
        let err = RowReader::new(&cells, "Tasks!A3:I3", 3).err().unwrap();
        assert!(matches!(err, HousemateError::MalformedRow { .. }));
    }

    #[test]
    fn test_typed_access() {
        let cells = row(&["7", " Dishes ", "", "a, b,,c"]);
        let reader = RowReader::new(&cells, "Tasks!A9:I9", 2).unwrap();
        assert_eq!(reader.number::<i64>(0, "id").unwrap(), 7);
        assert_eq!(reader.text(1), "Dishes");
        assert_eq!(reader.optional_number::<u32>(2, "turns").unwrap(), None);
        assert_eq!(reader.list(3), vec!["a", "b", "c"]);
        assert_eq!(reader.text(10), "");
        assert!(reader.number::<i64>(1, "frequency").is_err());
        assert!(reader.required_text(2, "name").is_err());
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&json!(50000.0)), "50000");
        assert_eq!(cell_to_string(&json!(3)), "3");
        assert_eq!(cell_to_string(&json!(1.5)), "1.5");
        assert_eq!(cell_to_string(&json!("15/01/2024")), "15/01/2024");
        assert_eq!(cell_to_string(&json!(null)), "");
        assert_eq!(cell_to_string(&json!(true)), "TRUE");
    }
}
