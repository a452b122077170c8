//! Traits for storage abstraction and input validation

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::config::default_epsilon;
use crate::types::*;

/// Storage abstraction for party aggregates
///
/// This trait allows the party ledger to work with any backend (a remote
/// REST resource, a document store, a local file, in-memory, etc.). Parties
/// are always loaded and stored whole; the last write wins.
#[async_trait]
pub trait PartyStorage: Send + Sync {
    /// List all parties, in creation order
    async fn list_parties(&self) -> PartyResult<Vec<Party>>;

    /// Get a party by ID
    async fn get_party(&self, party_id: &str) -> PartyResult<Option<Party>>;

    /// Store a new party
    async fn save_party(&mut self, party: &Party) -> PartyResult<()>;

    /// Replace an existing party
    async fn update_party(&mut self, party: &Party) -> PartyResult<()>;

    /// Delete a party
    async fn delete_party(&mut self, party_id: &str) -> PartyResult<()>;
}

/// Trait for implementing expense validation rules
///
/// Validation happens before an expense reaches storage. The ledger engine
/// trusts whatever it is given.
pub trait ExpenseValidator: Send + Sync {
    /// Validate an expense against the party roster
    fn validate_expense(&self, expense: &Expense, members: &[Member]) -> PartyResult<()>;
}

/// Default expense validator with the basic submission rules
pub struct DefaultExpenseValidator {
    pub epsilon: BigDecimal,
}

impl Default for DefaultExpenseValidator {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
        }
    }
}

impl ExpenseValidator for DefaultExpenseValidator {
    fn validate_expense(&self, expense: &Expense, _members: &[Member]) -> PartyResult<()> {
        if expense.description.trim().is_empty() {
            return Err(PartyError::Validation(
                "Expense description cannot be empty".to_string(),
            ));
        }

        if expense.amount <= BigDecimal::from(0) {
            return Err(PartyError::Validation(
                "Expense amount must be positive".to_string(),
            ));
        }

        if expense.paid_by.trim().is_empty() {
            return Err(PartyError::Validation(
                "Expense must have a payer".to_string(),
            ));
        }

        if expense.split.is_empty() {
            return Err(PartyError::Validation(
                "Expense must be split between at least one member".to_string(),
            ));
        }

        if let Split::ByAmount(splits) = &expense.split {
            let total: BigDecimal = splits.iter().map(|s| &s.amount).sum();
            if (&total - &expense.amount).abs() > self.epsilon {
                return Err(PartyError::Validation(format!(
                    "Amounts must add up to {}. Current total: {}",
                    expense.amount.with_scale(2),
                    total.with_scale(2)
                )));
            }
        }

        Ok(())
    }
}
