//! Member repository implementation

use std::sync::Arc;
use tracing::debug;
use crate::models::member::Member;
use crate::sheets::layout::*;
use crate::sheets::{A1Range, SpreadsheetClient};
use crate::utils::errors::Result;
use super::{read_count, read_rows};

#[derive(Clone)]
pub struct MemberRepository {
    client: Arc<dyn SpreadsheetClient>,
}

impl MemberRepository {
    pub fn new(client: Arc<dyn SpreadsheetClient>) -> Self {
        Self { client }
    }

    /// Number of members listed on a month sheet
    pub async fn count(&self, sheet: &str) -> Result<usize> {
        read_count(self.client.as_ref(), &A1Range::cell(sheet, MEMBER_COUNT_CELL)?).await
    }

    /// Members of a month sheet with their weights
    pub async fn list(&self, sheet: &str) -> Result<Vec<Member>> {
        let count = self.count(sheet).await?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let range = A1Range::rows(
            sheet,
            MEMBER_START_COL,
            MEMBER_END_COL,
            MEMBER_START_ROW,
            MEMBER_START_ROW + count - 1,
        )?;
        let members = read_rows::<Member>(self.client.as_ref(), &range).await?;
        debug!(sheet = sheet, count = members.len(), "Loaded members with weights");
        Ok(members)
    }
}
