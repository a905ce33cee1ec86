//! Rent bill model and share allocation

use serde::{Deserialize, Serialize};
use crate::models::member::Member;
use crate::utils::errors::{HousemateError, Result};
use crate::utils::helpers::{escape_markdown, format_money};

/// Rent bill collected over the rent conversation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentData {
    pub total_bill: i64,
    pub electric: i64,
    pub water: i64,
    /// `total_bill - electric - water`
    pub other_fees: i64,
    pub payer: String,
    #[serde(default)]
    pub member_shares: Vec<MemberShare>,
}

/// What one member owes for the rent bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberShare {
    pub username: String,
    pub electric_share: i64,
    pub water_share: i64,
    pub other_share: i64,
    pub total_share: i64,
}

fn too_large() -> HousemateError {
    HousemateError::validation("The bill amounts are too large.\n\nPlease start over with /rent")
}

/// `amount * weight / total_weight` without overflowing the product
fn weighted_share(amount: i64, weight: i64, total_weight: i64) -> i64 {
    let share = i128::from(amount) * i128::from(weight) / i128::from(total_weight);
    // weight <= total_weight, so the share never exceeds the amount
    share as i64
}

impl RentData {
    /// `total_bill - electric - water`; fails instead of overflowing
    pub fn calculate_other_fees(&mut self) -> Result<()> {
        self.other_fees = self
            .total_bill
            .checked_sub(self.electric)
            .and_then(|rest| rest.checked_sub(self.water))
            .ok_or_else(too_large)?;
        Ok(())
    }

    /// Fails when electric and water together exceed the total
    pub fn validate(&self) -> Result<()> {
        if self.other_fees < 0 {
            return Err(HousemateError::validation(format!(
                "Electric ({}) + Water ({}) exceeds Total ({}).\n\nPlease start over with /rent",
                format_money(self.electric),
                format_money(self.water),
                format_money(self.total_bill),
            )));
        }
        Ok(())
    }

    /// Split electric and water by weight and other fees equally.
    ///
    /// Integer division leaves a remainder on each component; it is charged to the
    /// payer (or the first member when the payer is not listed), so the shares add
    /// up to `total_bill` exactly.
    pub fn calculate_member_shares(&mut self, members: &[Member]) -> Result<()> {
        self.member_shares.clear();
        if members.is_empty() {
            return Ok(());
        }

        let total_weight: i64 = members.iter().map(|m| i64::from(m.weight.max(1))).sum();
        let count = members.len() as i64;

        let mut shares: Vec<MemberShare> = members
            .iter()
            .map(|m| {
                let weight = i64::from(m.weight.max(1));
                MemberShare {
                    username: m.username.clone(),
                    electric_share: weighted_share(self.electric, weight, total_weight),
                    water_share: weighted_share(self.water, weight, total_weight),
                    other_share: self.other_fees / count,
                    total_share: 0,
                }
            })
            .collect();

        let payer_index = shares
            .iter()
            .position(|s| s.username.eq_ignore_ascii_case(&self.payer))
            .unwrap_or(0);

        let electric_left = self.electric - shares.iter().map(|s| s.electric_share).sum::<i64>();
        let water_left = self.water - shares.iter().map(|s| s.water_share).sum::<i64>();
        let other_left = self.other_fees - shares.iter().map(|s| s.other_share).sum::<i64>();

        let payer = &mut shares[payer_index];
        payer.electric_share += electric_left;
        payer.water_share += water_left;
        payer.other_share += other_left;

        for share in &mut shares {
            share.total_share = share
                .electric_share
                .checked_add(share.water_share)
                .and_then(|sum| sum.checked_add(share.other_share))
                .ok_or_else(too_large)?;
        }
        self.member_shares = shares;
        Ok(())
    }

    /// Reply sent once the rent cells are written
    pub fn to_summary_markdown(&self) -> String {
        let mut text = String::new();
        text.push_str("*Rent saved!*\n\n");
        text.push_str("*Summary:*\n");
        text.push_str("-----------------\n");
        text.push_str(&format!("⚡ Electric:   {}\n", format_money(self.electric)));
        text.push_str(&format!("💧 Water:      {}\n", format_money(self.water)));
        text.push_str(&format!("📄 Other Fees: {}\n", format_money(self.other_fees)));
        text.push_str("-----------------\n");
        text.push_str(&format!("💰 *Total Rent:* {}\n", format_money(self.total_bill)));
        text.push_str(&format!("👤 *Payer:* {}\n", escape_markdown(&self.payer)));

        if !self.member_shares.is_empty() {
            text.push_str("\n*Per-member breakdown:*\n");
            for share in &self.member_shares {
                text.push_str(&format!("\n👤 *{}:*\n", escape_markdown(&share.username)));
                text.push_str(&format!("  ⚡ Electric: {}\n", format_money(share.electric_share)));
                text.push_str(&format!("  💧 Water: {}\n", format_money(share.water_share)));
                text.push_str(&format!("  📄 Other: {}\n", format_money(share.other_share)));
                text.push_str(&format!("  💰 *Total: {}*\n", format_money(share.total_share)));
            }
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rent(total: i64, electric: i64, water: i64, payer: &str) -> RentData {
        let mut data = RentData {
            total_bill: total,
            electric,
            water,
            payer: payer.to_string(),
            ..Default::default()
        };
        data.calculate_other_fees().unwrap();
        data
    }

    #[test]
    fn test_other_fees_and_validation() {
        let data = rent(5_000_000, 800_000, 200_000, "@alice");
        assert_eq!(data.other_fees, 4_000_000);
        assert!(data.validate().is_ok());

        let data = rent(1_000_000, 800_000, 300_000, "@alice");
        assert_eq!(data.other_fees, -100_000);
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_shares_by_weight() {
        let members = vec![Member::new(1, "@alice", 1), Member::new(2, "@bob", 2), Member::new(3, "@carol", 1)];
        let mut data = rent(5_000_000, 800_000, 200_000, "@bob");
        data.calculate_member_shares(&members).unwrap();

        let alice = &data.member_shares[0];
        assert_eq!(alice.electric_share, 200_000);
        assert_eq!(alice.water_share, 50_000);
        assert_eq!(alice.other_share, 1_333_333);

        let bob = &data.member_shares[1];
        assert_eq!(bob.electric_share, 400_000);
        assert_eq!(bob.other_share, 1_333_334);

        let sum: i64 = data.member_shares.iter().map(|s| s.total_share).sum();
        assert_eq!(sum, 5_000_000);
    }

    #[test]
    fn test_summary_lists_members() {
        let mut data = rent(3_000_000, 300_000, 0, "@alice");
        data.calculate_member_shares(&[Member::new(1, "@alice", 1), Member::new(2, "@bob", 1)]).unwrap();
        let text = data.to_summary_markdown();
        assert!(text.contains("💰 *Total Rent:* 3,000,000 ₫"));
        assert!(text.contains("*Per-member breakdown:*"));
        assert!(text.contains("👤 *@bob:*"));
    }

    #[test]
    fn test_no_members_no_shares() {
        let mut data = rent(100, 10, 10, "@alice");
        data.calculate_member_shares(&[]).unwrap();
        assert!(data.member_shares.is_empty());
    }

    #[test]
    fn test_overflowing_other_fees_are_rejected() {
        let huge = 9_000_000_000_000_000_000;
        let mut data = RentData {
            total_bill: 0,
            electric: huge,
            water: huge,
            payer: "@alice".to_string(),
            ..Default::default()
        };
        assert!(matches!(data.calculate_other_fees(), Err(HousemateError::Validation(_))));
    }

    #[test]
    fn test_large_bills_split_without_overflow() {
        let members = vec![Member::new(1, "@alice", 1), Member::new(2, "@bob", 2)];
        let mut data = rent(5_000_000_000_000_000_000, 5_000_000_000_000_000_000, 0, "@alice");
        data.calculate_member_shares(&members).unwrap();

        assert_eq!(data.member_shares[1].electric_share, 3_333_333_333_333_333_333);
        let sum: i64 = data.member_shares.iter().map(|s| s.total_share).sum();
        assert_eq!(sum, data.total_bill);
    }

    #[test]
    fn test_share_total_overflow_is_rejected() {
        let mut data = RentData {
            total_bill: i64::MAX,
            electric: i64::MAX,
            water: i64::MAX,
            other_fees: 0,
            payer: "@alice".to_string(),
            ..Default::default()
        };
        let result = data.calculate_member_shares(&[Member::new(1, "@alice", 1)]);
        assert!(matches!(result, Err(HousemateError::Validation(_))));
    }

    proptest! {
        #[test]
        fn shares_sum_to_total(
            electric in 0i64..10_000_000,
            water in 0i64..10_000_000,
            other in 0i64..50_000_000,
            weights in proptest::collection::vec(0u32..5, 1..8),
            payer_index in 0usize..8,
        ) {
            let members: Vec<Member> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| Member::new(i as i64 + 1, format!("@m{}", i), *w))
                .collect();
            let payer = format!("@m{}", payer_index);
            let mut data = rent(electric + water + other, electric, water, &payer);
            data.calculate_member_shares(&members).unwrap();

            let total: i64 = data.member_shares.iter().map(|s| s.total_share).sum();
            prop_assert_eq!(total, data.total_bill);
            prop_assert!(data.member_shares.iter().all(|s| s.total_share >= 0));
        }
    }
}
