//! Household member model

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::sheets::row::{RowReader, SheetRow};
use crate::utils::errors::Result;

/// A member listed on the active month sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub username: String,
    /// Share weight for utilities, never zero
    pub weight: u32,
}

impl Member {
    pub fn new(id: i64, username: impl Into<String>, weight: u32) -> Self {
        Self {
            id,
            username: username.into(),
            weight: weight.max(1),
        }
    }
}

impl SheetRow for Member {
    const MIN_COLUMNS: usize = 2;

    fn decode_row(row: &[String], range: &str) -> Result<Self> {
        let reader = RowReader::new(row, range, Self::MIN_COLUMNS)?;
        let weight = reader.optional_number::<u32>(2, "Weight")?.unwrap_or(1);
        Ok(Self::new(
            reader.number(0, "ID")?,
            reader.required_text(1, "Username")?,
            weight,
        ))
    }

    fn encode_row(&self) -> Vec<Value> {
        vec![json!(self.id), json!(self.username), json!(self.weight)]
    }
}
