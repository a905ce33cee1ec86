//! Rent service implementation

use tracing::warn;
use crate::models::rent::RentData;
use crate::sheets::SheetsService;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct RentService {
    sheets: SheetsService,
}

impl RentService {
    pub fn new(sheets: SheetsService) -> Self {
        Self { sheets }
    }

    /// Validate, allocate member shares and write the rent cells.
    ///
    /// Nothing is written when the bill does not add up.
    pub async fn save(&self, rent: &mut RentData) -> Result<()> {
        rent.calculate_other_fees()?;
        rent.validate()?;

        let sheet = self.sheets.current_sheet().await?;
        let members = self.sheets.members.list(&sheet).await?;
        if members.is_empty() {
            warn!(sheet = %sheet, "No members listed, rent saved without a breakdown");
        }
        rent.calculate_member_shares(&members)?;

        self.sheets.rent.save(&sheet, rent).await
    }
}
