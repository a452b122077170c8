//! Core types and data structures for the party ledger

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::ExpenseRecord;

/// Identifier of a party member. Opaque, caller generated.
pub type MemberId = String;

/// A person taking part in a party's shared expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier, used as the join key for payers and participants
    pub id: MemberId,
    /// Display name
    pub name: String,
}

impl Member {
    /// Create a new member
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A to-do item attached to a party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub description: String,
    /// Member the task is assigned to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(
        id: String,
        description: String,
        assigned_to: Option<MemberId>,
        deadline: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            description,
            assigned_to,
            deadline,
            completed: false,
        }
    }
}

/// Split methods, as tagged in the persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitType {
    #[serde(rename = "equally", alias = "EQUAL")]
    Equal,
    #[serde(rename = "by_amount", alias = "BY_AMOUNT")]
    ByAmount,
    #[serde(rename = "by_percentage", alias = "BY_PERCENTAGE")]
    ByPercentage,
    #[serde(rename = "by_shares", alias = "BY_SHARES")]
    ByShares,
}

/// Fixed amount owed by one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountSplit {
    pub member_id: MemberId,
    #[serde(with = "bigdecimal::serde::json_num")]
    pub amount: BigDecimal,
}

/// Percentage of the expense owed by one participant (0..=100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageSplit {
    pub member_id: MemberId,
    #[serde(with = "bigdecimal::serde::json_num")]
    pub percentage: BigDecimal,
}

/// Proportional shares held by one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSplit {
    pub member_id: MemberId,
    pub shares: u32,
}

/// How an expense is divided among its participants.
///
/// Each variant carries only the per-participant data its method uses.
/// Participant order is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Split {
    /// Everyone owes `amount / participants`
    Equal(Vec<MemberId>),
    /// Everyone owes their stated amount
    ByAmount(Vec<AmountSplit>),
    /// Everyone owes `amount * percentage / 100`
    ByPercentage(Vec<PercentageSplit>),
    /// Everyone owes `amount * shares / total_shares`
    ByShares(Vec<ShareSplit>),
}

impl Split {
    /// The split method of this variant
    pub fn split_type(&self) -> SplitType {
        match self {
            Split::Equal(_) => SplitType::Equal,
            Split::ByAmount(_) => SplitType::ByAmount,
            Split::ByPercentage(_) => SplitType::ByPercentage,
            Split::ByShares(_) => SplitType::ByShares,
        }
    }

    /// Participant ids, in declaration order
    pub fn participants(&self) -> Vec<&str> {
        match self {
            Split::Equal(ids) => ids.iter().map(String::as_str).collect(),
            Split::ByAmount(splits) => splits.iter().map(|s| s.member_id.as_str()).collect(),
            Split::ByPercentage(splits) => splits.iter().map(|s| s.member_id.as_str()).collect(),
            Split::ByShares(splits) => splits.iter().map(|s| s.member_id.as_str()).collect(),
        }
    }

    pub fn participant_count(&self) -> usize {
        match self {
            Split::Equal(ids) => ids.len(),
            Split::ByAmount(splits) => splits.len(),
            Split::ByPercentage(splits) => splits.len(),
            Split::ByShares(splits) => splits.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.participant_count() == 0
    }
}

/// A single shared expense. Edits replace the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExpenseRecord", into = "ExpenseRecord")]
pub struct Expense {
    pub id: String,
    pub description: String,
    /// Total cost, expected to be positive
    pub amount: BigDecimal,
    /// Member who paid the full amount
    pub paid_by: MemberId,
    pub date: NaiveDate,
    pub split: Split,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        id: String,
        description: String,
        amount: BigDecimal,
        paid_by: MemberId,
        date: NaiveDate,
        split: Split,
    ) -> Self {
        Self {
            id,
            description,
            amount,
            paid_by,
            date,
            split,
        }
    }
}

/// Expense data supplied by a caller before an id is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: BigDecimal,
    pub paid_by: MemberId,
    pub date: NaiveDate,
    pub split: Split,
}

impl NewExpense {
    /// Attach an id, producing a storable expense
    pub fn with_id(self, id: String) -> Expense {
        Expense::new(
            id,
            self.description,
            self.amount,
            self.paid_by,
            self.date,
            self.split,
        )
    }
}

/// The aggregate stored and loaded by a [`crate::PartyStorage`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "friends", default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Party {
    /// Create an empty party
    pub fn new(id: String, name: String, date: NaiveDate) -> Self {
        Self {
            id,
            name,
            date,
            members: Vec::new(),
            tasks: Vec::new(),
            expenses: Vec::new(),
        }
    }

    /// Look up a member's display name
    pub fn member_name(&self, member_id: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.id == member_id)
            .map(|m| m.name.as_str())
    }
}

/// One recommended payment: `from` pays `to` the given amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementTransaction {
    pub from: MemberId,
    pub to: MemberId,
    #[serde(with = "bigdecimal::serde::json_num")]
    pub amount: BigDecimal,
}

/// A member's net position, with the name resolved for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberBalance {
    pub member_id: MemberId,
    pub name: String,
    /// Positive: owed money by the group. Negative: owes the group.
    #[serde(with = "bigdecimal::serde::json_num")]
    pub amount: BigDecimal,
}

/// Errors that can occur while managing parties
#[derive(Debug, thiserror::Error)]
pub enum PartyError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Party not found: {0}")]
    PartyNotFound(String),
    #[error("Member not found: {0}")]
    MemberNotFound(String),
    #[error("Task not found: {0}")]
    TaskNotFound(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for party operations
pub type PartyResult<T> = Result<T, PartyError>;
