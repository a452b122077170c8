//! Persisted record shape of an expense
//!
//! Stores keep the split as a flat `splitType` tag plus a list of
//! `splitBetween` details whose optional fields are meaningful only for
//! some tags. [`Expense`] serializes through [`ExpenseRecord`] so that a
//! stored [`crate::Party`] round-trips in that shape, while the rest of the
//! crate works with the tagged [`Split`].

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// One entry of `splitBetween`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitDetailRecord {
    pub friend_id: MemberId,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "bigdecimal::serde::json_num_option"
    )]
    pub amount: Option<BigDecimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "bigdecimal::serde::json_num_option"
    )]
    pub percentage: Option<BigDecimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<u32>,
}

impl SplitDetailRecord {
    fn member(friend_id: &str) -> Self {
        Self {
            friend_id: friend_id.to_string(),
            amount: None,
            percentage: None,
            shares: None,
        }
    }
}

/// Expense as written by the persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: String,
    pub description: String,
    #[serde(with = "bigdecimal::serde::json_num")]
    pub amount: BigDecimal,
    pub paid_by_id: MemberId,
    pub date: NaiveDate,
    pub split_type: SplitType,
    #[serde(default)]
    pub split_between: Vec<SplitDetailRecord>,
}

impl From<ExpenseRecord> for Expense {
    fn from(record: ExpenseRecord) -> Self {
        let details = record.split_between;
        // Fields that don't belong to the tag are dropped, missing ones read as zero.
        let split = match record.split_type {
            SplitType::Equal => Split::Equal(details.into_iter().map(|d| d.friend_id).collect()),
            SplitType::ByAmount => Split::ByAmount(
                details
                    .into_iter()
                    .map(|d| AmountSplit {
                        member_id: d.friend_id,
                        amount: d.amount.unwrap_or_else(|| BigDecimal::from(0)),
                    })
                    .collect(),
            ),
            SplitType::ByPercentage => Split::ByPercentage(
                details
                    .into_iter()
                    .map(|d| PercentageSplit {
                        member_id: d.friend_id,
                        percentage: d.percentage.unwrap_or_else(|| BigDecimal::from(0)),
                    })
                    .collect(),
            ),
            SplitType::ByShares => Split::ByShares(
                details
                    .into_iter()
                    .map(|d| ShareSplit {
                        member_id: d.friend_id,
                        shares: d.shares.unwrap_or(0),
                    })
                    .collect(),
            ),
        };

        Expense {
            id: record.id,
            description: record.description,
            amount: record.amount,
            paid_by: record.paid_by_id,
            date: record.date,
            split,
        }
    }
}

impl From<Expense> for ExpenseRecord {
    fn from(expense: Expense) -> Self {
        let split_type = expense.split.split_type();
        let split_between = match expense.split {
            Split::Equal(ids) => ids.iter().map(|id| SplitDetailRecord::member(id)).collect(),
            Split::ByAmount(splits) => splits
                .into_iter()
                .map(|s| SplitDetailRecord {
                    amount: Some(s.amount),
                    ..SplitDetailRecord::member(&s.member_id)
                })
                .collect(),
            Split::ByPercentage(splits) => splits
                .into_iter()
                .map(|s| SplitDetailRecord {
                    percentage: Some(s.percentage),
                    ..SplitDetailRecord::member(&s.member_id)
                })
                .collect(),
            Split::ByShares(splits) => splits
                .into_iter()
                .map(|s| SplitDetailRecord {
                    shares: Some(s.shares),
                    ..SplitDetailRecord::member(&s.member_id)
                })
                .collect(),
        };

        ExpenseRecord {
            id: expense.id,
            description: expense.description,
            amount: expense.amount,
            paid_by_id: expense.paid_by,
            date: expense.date,
            split_type,
            split_between,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_shares_split_reads_missing_fields_as_zero() {
        let json = r#"{
            "id": "e1",
            "description": "Snacks",
            "amount": 90,
            "paidById": "alice",
            "date": "2024-03-01",
            "splitType": "by_shares",
            "splitBetween": [
                {"friendId": "alice", "shares": 1, "amount": 999},
                {"friendId": "bob"}
            ]
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();

        assert_eq!(expense.paid_by, "alice");
        assert_eq!(
            expense.split,
            Split::ByShares(vec![
                ShareSplit {
                    member_id: "alice".to_string(),
                    shares: 1,
                },
                ShareSplit {
                    member_id: "bob".to_string(),
                    shares: 0,
                },
            ])
        );
    }

    #[test]
    fn test_decimal_amounts_are_written_back_unchanged() {
        let json = r#"{
            "id": "e1",
            "description": "Taxi",
            "amount": 33.33,
            "paidById": "alice",
            "date": "2024-03-01",
            "splitType": "by_percentage",
            "splitBetween": [
                {"friendId": "alice", "percentage": 12.5},
                {"friendId": "bob", "percentage": 87.5}
            ]
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount, BigDecimal::from_str("33.33").unwrap());

        let written = serde_json::to_string(&expense).unwrap();
        assert!(written.contains(r#""amount":33.33"#));
        assert!(written.contains(r#""percentage":12.5"#));
        assert!(written.contains(r#""percentage":87.5"#));

        let reparsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        let original: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_upper_case_split_tags_are_accepted() {
        let json = r#"{
            "id": "e1",
            "description": "Cab",
            "amount": 30,
            "paidById": "bob",
            "date": "2024-03-01",
            "splitType": "EQUAL",
            "splitBetween": [{"friendId": "alice"}, {"friendId": "bob"}]
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(
            expense.split,
            Split::Equal(vec!["alice".to_string(), "bob".to_string()])
        );
    }

    #[test]
    fn test_written_record_only_carries_fields_of_its_method() {
        let expense = Expense::new(
            "e2".to_string(),
            "Dinner".to_string(),
            BigDecimal::from(100),
            "alice".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            Split::ByPercentage(vec![PercentageSplit {
                member_id: "bob".to_string(),
                percentage: BigDecimal::from(100),
            }]),
        );

        let value = serde_json::to_value(&expense).unwrap();

        assert_eq!(value["splitType"], "by_percentage");
        assert_eq!(value["paidById"], "alice");
        assert_eq!(value["date"], "2024-03-02");
        let detail = &value["splitBetween"][0];
        assert_eq!(detail["friendId"], "bob");
        assert!(detail["percentage"].is_number());
        assert_eq!(detail["percentage"], 100);
        assert!(value["amount"].is_number());
        assert!(detail.get("amount").is_none());
        assert!(detail.get("shares").is_none());
    }
}
