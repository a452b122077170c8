//! Presentation-ready balance summary

use bigdecimal::BigDecimal;
use serde::Serialize;
use std::fmt;

use crate::config::LedgerConfig;
use crate::ledger::{compute_balances, simplify_with_epsilon};
use crate::types::*;

const UNKNOWN_MEMBER: &str = "Unknown";

/// A settlement transaction with member names resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Debt {
    pub from_id: MemberId,
    pub from: String,
    pub to_id: MemberId,
    pub to: String,
    #[serde(with = "bigdecimal::serde::json_num")]
    pub amount: BigDecimal,
}

/// What the summary has to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SummaryStatus {
    /// The party has nobody in it yet
    NoMembers,
    /// Members exist but nothing has been spent
    NoExpenses,
    /// Everyone is within the zero threshold
    Settled,
    /// At least one payment is needed
    Outstanding,
}

/// Per-member totals and the "who owes whom" list for one party
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSummary {
    /// Net balances, highest first
    pub balances: Vec<MemberBalance>,
    /// Payments that settle the party, in the order they were planned
    pub debts: Vec<Debt>,
    pub status: SummaryStatus,
    #[serde(skip)]
    config: LedgerConfig,
}

impl BalanceSummary {
    /// Recompute balances and settlements for `party` from scratch
    pub fn from_party(party: &Party, config: &LedgerConfig) -> Self {
        let name_of = |member_id: &str| {
            party
                .member_name(member_id)
                .unwrap_or(UNKNOWN_MEMBER)
                .to_string()
        };

        let balances = compute_balances(&party.members, &party.expenses);

        let debts: Vec<Debt> = simplify_with_epsilon(&balances, &config.epsilon)
            .into_iter()
            .map(|t| Debt {
                from: name_of(&t.from),
                to: name_of(&t.to),
                from_id: t.from,
                to_id: t.to,
                amount: t.amount,
            })
            .collect();

        let mut member_balances: Vec<MemberBalance> = balances
            .iter()
            .map(|(member_id, amount)| MemberBalance {
                member_id: member_id.to_string(),
                name: name_of(member_id),
                amount: amount.clone(),
            })
            .collect();
        member_balances.sort_by(|a, b| b.amount.cmp(&a.amount));

        let status = if party.members.is_empty() {
            SummaryStatus::NoMembers
        } else if party.expenses.is_empty() {
            SummaryStatus::NoExpenses
        } else if debts.is_empty() {
            SummaryStatus::Settled
        } else {
            SummaryStatus::Outstanding
        };

        Self {
            balances: member_balances,
            debts,
            status,
            config: config.clone(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.debts.is_empty()
    }
}

impl fmt::Display for BalanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            SummaryStatus::NoMembers => write!(f, "Add friends to see balances."),
            SummaryStatus::NoExpenses => write!(f, "Add an expense to start splitting."),
            SummaryStatus::Settled => write!(f, "All settled up!"),
            SummaryStatus::Outstanding => {
                let lines: Vec<String> = self
                    .debts
                    .iter()
                    .map(|d| {
                        format!(
                            "{} owes {} {}",
                            d.from,
                            d.to,
                            self.config.format_amount(&d.amount)
                        )
                    })
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn party_with(members: &[(&str, &str)], expenses: Vec<Expense>) -> Party {
        let mut party = Party::new(
            "p1".to_string(),
            "Trip".to_string(),
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        );
        party.members = members.iter().map(|(id, name)| Member::new(*id, *name)).collect();
        party.expenses = expenses;
        party
    }

    fn equal(id: &str, amount: i64, paid_by: &str, participants: &[&str]) -> Expense {
        Expense::new(
            id.to_string(),
            "Fuel".to_string(),
            BigDecimal::from(amount),
            paid_by.to_string(),
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            Split::Equal(participants.iter().map(|p| p.to_string()).collect()),
        )
    }

    #[test]
    fn test_outstanding_summary_renders_names() {
        let party = party_with(
            &[("a", "Alice"), ("b", "Bob")],
            vec![equal("e1", 100, "a", &["a", "b"])],
        );

        let summary = BalanceSummary::from_party(&party, &LedgerConfig::default());

        assert_eq!(summary.status, SummaryStatus::Outstanding);
        assert_eq!(summary.balances[0].name, "Alice");
        assert_eq!(summary.balances[0].amount, BigDecimal::from(50));
        assert_eq!(summary.balances[1].amount, BigDecimal::from(-50));
        assert_eq!(summary.to_string(), "Bob owes Alice ₹50.00");
    }

    #[test]
    fn test_balances_sorted_highest_first() {
        let party = party_with(
            &[("a", "Alice"), ("b", "Bob"), ("c", "Carol")],
            vec![equal("e1", 90, "c", &["a", "b", "c"])],
        );

        let summary = BalanceSummary::from_party(&party, &LedgerConfig::default());

        let names: Vec<&str> = summary.balances.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
    }

    #[test]
    fn test_removed_member_shows_as_unknown() {
        let party = party_with(&[("a", "Alice")], vec![equal("e1", 100, "a", &["a", "gone"])]);

        let summary = BalanceSummary::from_party(&party, &LedgerConfig::default());

        assert_eq!(summary.debts.len(), 1);
        assert_eq!(summary.debts[0].from, "Unknown");
        assert_eq!(summary.debts[0].from_id, "gone");
        assert_eq!(summary.debts[0].to, "Alice");
    }

    #[test]
    fn test_empty_states() {
        let config = LedgerConfig::default();

        let empty = BalanceSummary::from_party(&party_with(&[], Vec::new()), &config);
        assert_eq!(empty.status, SummaryStatus::NoMembers);
        assert_eq!(empty.to_string(), "Add friends to see balances.");

        let idle = BalanceSummary::from_party(&party_with(&[("a", "Alice")], Vec::new()), &config);
        assert_eq!(idle.status, SummaryStatus::NoExpenses);

        let settled = BalanceSummary::from_party(
            &party_with(&[("a", "Alice")], vec![equal("e1", 10, "a", &["a"])]),
            &config,
        );
        assert_eq!(settled.status, SummaryStatus::Settled);
        assert_eq!(settled.to_string(), "All settled up!");
        assert!(settled.is_settled());
    }

    #[test]
    fn test_currency_symbol_from_config() {
        let party = party_with(
            &[("a", "Alice"), ("b", "Bob")],
            vec![equal("e1", 30, "b", &["a", "b"])],
        );
        let config = LedgerConfig::default().with_currency_symbol("$");

        let summary = BalanceSummary::from_party(&party, &config);

        assert_eq!(summary.to_string(), "Alice owes Bob $15.00");
    }
}
