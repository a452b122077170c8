//! Split resolution: how much each participant owes for one expense

use bigdecimal::BigDecimal;

use crate::types::*;

/// One participant's resolved share of an expense
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub member_id: MemberId,
    pub amount: BigDecimal,
}

impl Share {
    fn new(member_id: &str, amount: BigDecimal) -> Self {
        Self {
            member_id: member_id.to_string(),
            amount,
        }
    }
}

/// Resolve the amount each participant owes for `expense`, in participant order.
///
/// Pure: the input values are taken as given. Amounts and percentages are
/// not checked against the expense total, that belongs to the validators in
/// front of the ledger. No participants yields no shares, and a shares split
/// whose shares total zero resolves every participant to zero.
pub fn resolve_shares(expense: &Expense) -> Vec<Share> {
    let amount = &expense.amount;

    match &expense.split {
        Split::Equal(ids) => {
            if ids.is_empty() {
                return Vec::new();
            }
            let per_person = amount / BigDecimal::from(ids.len() as u64);
            ids.iter()
                .map(|id| Share::new(id, per_person.clone()))
                .collect()
        }
        Split::ByAmount(splits) => splits
            .iter()
            .map(|s| Share::new(&s.member_id, s.amount.clone()))
            .collect(),
        Split::ByPercentage(splits) => splits
            .iter()
            .map(|s| Share::new(&s.member_id, amount * &s.percentage / BigDecimal::from(100)))
            .collect(),
        Split::ByShares(splits) => {
            let total_shares: u64 = splits.iter().map(|s| u64::from(s.shares)).sum();
            if total_shares == 0 {
                return splits
                    .iter()
                    .map(|s| Share::new(&s.member_id, BigDecimal::from(0)))
                    .collect();
            }
            let total_shares = BigDecimal::from(total_shares);
            splits
                .iter()
                .map(|s| {
                    Share::new(
                        &s.member_id,
                        amount * BigDecimal::from(s.shares) / &total_shares,
                    )
                })
                .collect()
        }
    }
}
