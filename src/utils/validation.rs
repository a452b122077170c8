//! Validation utilities

use bigdecimal::BigDecimal;
use std::collections::HashSet;

use crate::config::default_epsilon;
use crate::traits::*;
use crate::types::*;

/// Validate a party name
pub fn validate_party_name(name: &str) -> PartyResult<()> {
    if name.trim().is_empty() {
        return Err(PartyError::Validation(
            "Party name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(PartyError::Validation(
            "Party name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a member name
pub fn validate_member_name(name: &str) -> PartyResult<()> {
    if name.trim().is_empty() {
        return Err(PartyError::Validation(
            "Member name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(PartyError::Validation(
            "Member name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a task description
pub fn validate_task_description(description: &str) -> PartyResult<()> {
    if description.trim().is_empty() {
        return Err(PartyError::Validation(
            "Task description cannot be empty".to_string(),
        ));
    }

    if description.len() > 500 {
        return Err(PartyError::Validation(
            "Task description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that percentages are in range and add up to 100
pub fn validate_percentages(splits: &[PercentageSplit], epsilon: &BigDecimal) -> PartyResult<()> {
    let hundred = BigDecimal::from(100);

    for split in splits {
        if split.percentage < BigDecimal::from(0) || split.percentage > hundred {
            return Err(PartyError::Validation(format!(
                "Percentage for member '{}' must be between 0 and 100",
                split.member_id
            )));
        }
    }

    let total: BigDecimal = splits.iter().map(|s| &s.percentage).sum();
    if (&total - &hundred).abs() > *epsilon {
        return Err(PartyError::Validation(format!(
            "Percentages must add up to 100. Current total: {}",
            total
        )));
    }

    Ok(())
}

/// Enhanced expense validator with detailed checks
pub struct EnhancedExpenseValidator {
    basic: DefaultExpenseValidator,
}

impl EnhancedExpenseValidator {
    pub fn new(epsilon: BigDecimal) -> Self {
        Self {
            basic: DefaultExpenseValidator { epsilon },
        }
    }
}

impl Default for EnhancedExpenseValidator {
    fn default() -> Self {
        Self::new(default_epsilon())
    }
}

impl ExpenseValidator for EnhancedExpenseValidator {
    fn validate_expense(&self, expense: &Expense, members: &[Member]) -> PartyResult<()> {
        // Basic validation
        self.basic.validate_expense(expense, members)?;

        let roster: HashSet<&str> = members.iter().map(|m| m.id.as_str()).collect();

        if !roster.contains(expense.paid_by.as_str()) {
            return Err(PartyError::MemberNotFound(expense.paid_by.clone()));
        }

        let mut seen = HashSet::new();
        for participant in expense.split.participants() {
            if !roster.contains(participant) {
                return Err(PartyError::MemberNotFound(participant.to_string()));
            }
            if !seen.insert(participant) {
                return Err(PartyError::Validation(format!(
                    "Member '{}' appears more than once in the split",
                    participant
                )));
            }
        }

        match &expense.split {
            Split::ByPercentage(splits) => validate_percentages(splits, &self.basic.epsilon)?,
            Split::ByShares(splits) => {
                if splits.iter().all(|s| s.shares == 0) {
                    return Err(PartyError::Validation(
                        "At least one member must hold a share".to_string(),
                    ));
                }
            }
            Split::Equal(_) | Split::ByAmount(_) => {}
        }

        Ok(())
    }
}
