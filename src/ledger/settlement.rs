//! Greedy debt simplification

use bigdecimal::BigDecimal;
use std::collections::VecDeque;

use crate::config::default_epsilon;
use crate::ledger::balance::Balances;
use crate::types::*;

/// A member still owing or owed, with what is left to transfer
#[derive(Debug)]
struct Outstanding<'a> {
    member_id: &'a str,
    remaining: BigDecimal,
}

/// Reduce `balances` to a list of point-to-point payments, using the
/// default 0.01 threshold.
pub fn simplify(balances: &Balances) -> Vec<SettlementTransaction> {
    simplify_with_epsilon(balances, &default_epsilon())
}

/// Reduce `balances` to a list of point-to-point payments.
///
/// Members within `epsilon` of zero are already settled. The first
/// remaining debtor always pays the first remaining creditor as much as
/// both can take, in balance order, until one side runs out. The result is
/// deterministic but not guaranteed to have the fewest payments.
pub fn simplify_with_epsilon(
    balances: &Balances,
    epsilon: &BigDecimal,
) -> Vec<SettlementTransaction> {
    let negative_epsilon = -epsilon.clone();

    let mut debtors: VecDeque<Outstanding> = balances
        .iter()
        .filter(|(_, amount)| **amount < negative_epsilon)
        .map(|(member_id, amount)| Outstanding {
            member_id,
            remaining: amount.abs(),
        })
        .collect();
    let mut creditors: VecDeque<Outstanding> = balances
        .iter()
        .filter(|(_, amount)| *amount > epsilon)
        .map(|(member_id, amount)| Outstanding {
            member_id,
            remaining: amount.clone(),
        })
        .collect();

    let mut transactions = Vec::new();

    while let (Some(debtor), Some(creditor)) = (debtors.front_mut(), creditors.front_mut()) {
        let transfer = if debtor.remaining < creditor.remaining {
            debtor.remaining.clone()
        } else {
            creditor.remaining.clone()
        };

        tracing::debug!(
            from = debtor.member_id,
            to = creditor.member_id,
            amount = %transfer,
            "settlement transfer"
        );
        transactions.push(SettlementTransaction {
            from: debtor.member_id.to_string(),
            to: creditor.member_id.to_string(),
            amount: transfer.clone(),
        });

        debtor.remaining -= &transfer;
        creditor.remaining -= &transfer;

        if debtor.remaining < *epsilon {
            debtors.pop_front();
        }
        if creditor.remaining < *epsilon {
            creditors.pop_front();
        }
    }

    transactions
}
