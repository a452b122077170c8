//! Net balance aggregation over a party's expenses

use bigdecimal::BigDecimal;
use std::collections::HashMap;

use crate::ledger::split::resolve_shares;
use crate::types::*;

/// Net balance per member, kept in insertion order.
///
/// Roster members come first, in declaration order, followed by any ids
/// that only appear in expenses. Positive means the group owes the member,
/// negative means the member owes the group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Balances {
    entries: Vec<(MemberId, BigDecimal)>,
    index: HashMap<MemberId, usize>,
}

impl Balances {
    /// Create an empty balance map
    pub fn new() -> Self {
        Self::default()
    }

    /// Start every member at zero
    pub fn for_members(members: &[Member]) -> Self {
        let mut balances = Self::new();
        for member in members {
            balances.entry(&member.id);
        }
        balances
    }

    /// Balance of a member, if the member is known
    pub fn get(&self, member_id: &str) -> Option<&BigDecimal> {
        self.index.get(member_id).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, member_id: &str) -> bool {
        self.index.contains_key(member_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BigDecimal)> {
        self.entries.iter().map(|(id, amount)| (id.as_str(), amount))
    }

    /// Sum of all balances. Zero, up to rounding, for any consistent party.
    pub fn total(&self) -> BigDecimal {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }

    /// Add `amount` to a member's balance, materializing the member if unknown
    pub fn credit(&mut self, member_id: &str, amount: &BigDecimal) {
        *self.entry(member_id) += amount;
    }

    /// Subtract `amount` from a member's balance, materializing the member if unknown
    pub fn debit(&mut self, member_id: &str, amount: &BigDecimal) {
        *self.entry(member_id) -= amount;
    }

    fn entry(&mut self, member_id: &str) -> &mut BigDecimal {
        let i = match self.index.get(member_id) {
            Some(&i) => i,
            None => {
                self.entries
                    .push((member_id.to_string(), BigDecimal::from(0)));
                self.index
                    .insert(member_id.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }
}

impl FromIterator<(MemberId, BigDecimal)> for Balances {
    fn from_iter<I: IntoIterator<Item = (MemberId, BigDecimal)>>(iter: I) -> Self {
        let mut balances = Self::new();
        for (member_id, amount) in iter {
            balances.credit(&member_id, &amount);
        }
        balances
    }
}

/// Compute every member's net balance from scratch.
///
/// Each payer is credited the full expense amount and each participant is
/// debited their resolved share. Ids missing from `members`, e.g. a member
/// removed after an expense was recorded, get their own zero-based entry
/// instead of failing.
pub fn compute_balances(members: &[Member], expenses: &[Expense]) -> Balances {
    let mut balances = Balances::for_members(members);

    for expense in expenses {
        if !balances.contains(&expense.paid_by) {
            tracing::debug!(
                expense_id = %expense.id,
                member_id = %expense.paid_by,
                "payer is not on the roster, tracking separately"
            );
        }
        balances.credit(&expense.paid_by, &expense.amount);

        for share in resolve_shares(expense) {
            if !balances.contains(&share.member_id) {
                tracing::debug!(
                    expense_id = %expense.id,
                    member_id = %share.member_id,
                    "participant is not on the roster, tracking separately"
                );
            }
            balances.debit(&share.member_id, &share.amount);
        }
    }

    balances
}
