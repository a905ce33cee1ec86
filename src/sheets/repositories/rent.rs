//! Rent repository implementation

use std::sync::Arc;
use serde_json::json;
use tracing::info;
use crate::models::rent::RentData;
use crate::sheets::layout::*;
use crate::sheets::range::CellRef;
use crate::sheets::{A1Range, SpreadsheetClient};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct RentRepository {
    client: Arc<dyn SpreadsheetClient>,
}

impl RentRepository {
    pub fn new(client: Arc<dyn SpreadsheetClient>) -> Self {
        Self { client }
    }

    /// Write electric, water, other fees, total and payer into the rent cells
    pub async fn save(&self, sheet: &str, rent: &RentData) -> Result<()> {
        let range = A1Range {
            sheet: sheet.to_string(),
            start: CellRef::parse(RENT_ELECTRIC_CELL)?,
            end: CellRef::parse(RENT_PAYER_CELL)?,
        };
        let values = vec![
            vec![json!(rent.electric)],
            vec![json!(rent.water)],
            vec![json!(rent.other_fees)],
            vec![json!(rent.total_bill)],
            vec![json!(rent.payer)],
        ];
        self.client.update_values(&range, values).await?;

        info!(
            sheet = sheet,
            total = rent.total_bill,
            electric = rent.electric,
            water = rent.water,
            other_fees = rent.other_fees,
            payer = %rent.payer,
            "Rent data saved"
        );
        Ok(())
    }
}
