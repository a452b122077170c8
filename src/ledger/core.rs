//! Party orchestrator that coordinates storage, validation and the ledger engine

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::ledger::{compute_balances, simplify_with_epsilon, Balances};
use crate::report::BalanceSummary;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::{validate_member_name, validate_party_name, validate_task_description};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Party manager: every edit loads the whole aggregate, changes it, and
/// writes it back.
pub struct PartyLedger<S: PartyStorage> {
    storage: S,
    validator: Box<dyn ExpenseValidator>,
    config: LedgerConfig,
}

impl<S: PartyStorage> PartyLedger<S> {
    /// Create a new party ledger with the default configuration
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, LedgerConfig::default())
    }

    /// Create a new party ledger with a custom configuration
    pub fn with_config(storage: S, config: LedgerConfig) -> Self {
        let validator = DefaultExpenseValidator {
            epsilon: config.epsilon.clone(),
        };
        Self::with_validator(storage, config, Box::new(validator))
    }

    /// Create a new party ledger with a custom expense validator
    pub fn with_validator(
        storage: S,
        config: LedgerConfig,
        validator: Box<dyn ExpenseValidator>,
    ) -> Self {
        Self {
            storage,
            validator,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // Party operations
    /// Create a new, empty party
    pub async fn create_party(&mut self, name: String, date: NaiveDate) -> PartyResult<Party> {
        validate_party_name(&name)?;

        let party = Party::new(new_id(), name.trim().to_string(), date);
        self.storage.save_party(&party).await?;

        tracing::info!(party_id = %party.id, name = %party.name, "party created");
        Ok(party)
    }

    /// Get a party by ID
    pub async fn get_party(&self, party_id: &str) -> PartyResult<Option<Party>> {
        self.storage.get_party(party_id).await
    }

    /// Get a party by ID, returning an error if not found
    pub async fn get_party_required(&self, party_id: &str) -> PartyResult<Party> {
        self.storage
            .get_party(party_id)
            .await?
            .ok_or_else(|| PartyError::PartyNotFound(party_id.to_string()))
    }

    /// List all parties
    pub async fn list_parties(&self) -> PartyResult<Vec<Party>> {
        self.storage.list_parties().await
    }

    /// Replace a whole party
    pub async fn update_party(&mut self, party: &Party) -> PartyResult<()> {
        validate_party_name(&party.name)?;
        self.store(party).await
    }

    /// Delete a party
    pub async fn delete_party(&mut self, party_id: &str) -> PartyResult<()> {
        self.storage.delete_party(party_id).await?;
        tracing::info!(party_id, "party deleted");
        Ok(())
    }

    // Roster operations
    /// Add a member to a party
    pub async fn add_member(&mut self, party_id: &str, name: &str) -> PartyResult<Member> {
        validate_member_name(name)?;

        let mut party = self.get_party_required(party_id).await?;
        let member = Member::new(new_id(), name.trim());
        party.members.push(member.clone());
        self.store(&party).await?;

        Ok(member)
    }

    /// Remove a member from the roster.
    ///
    /// Expenses that reference the member are left untouched; their
    /// balance keeps showing up under the old id.
    pub async fn remove_member(&mut self, party_id: &str, member_id: &str) -> PartyResult<()> {
        let mut party = self.get_party_required(party_id).await?;

        let before = party.members.len();
        party.members.retain(|m| m.id != member_id);
        if party.members.len() == before {
            return Err(PartyError::MemberNotFound(member_id.to_string()));
        }

        self.store(&party).await
    }

    // Task operations
    /// Add a task to a party
    pub async fn add_task(
        &mut self,
        party_id: &str,
        description: &str,
        assigned_to: Option<MemberId>,
        deadline: Option<NaiveDate>,
    ) -> PartyResult<Task> {
        validate_task_description(description)?;

        let mut party = self.get_party_required(party_id).await?;
        let task = Task::new(
            new_id(),
            description.trim().to_string(),
            assigned_to,
            deadline,
        );
        party.tasks.push(task.clone());
        self.store(&party).await?;

        Ok(task)
    }

    /// Replace a task
    pub async fn update_task(&mut self, party_id: &str, task: &Task) -> PartyResult<()> {
        validate_task_description(&task.description)?;

        let mut party = self.get_party_required(party_id).await?;
        let existing = party
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| PartyError::TaskNotFound(task.id.clone()))?;
        *existing = task.clone();

        self.store(&party).await
    }

    /// Flip a task between done and not done
    pub async fn toggle_task(&mut self, party_id: &str, task_id: &str) -> PartyResult<Task> {
        let mut party = self.get_party_required(party_id).await?;
        let task = party
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| PartyError::TaskNotFound(task_id.to_string()))?;
        task.completed = !task.completed;
        let toggled = task.clone();

        self.store(&party).await?;
        Ok(toggled)
    }

    /// Delete a task
    pub async fn delete_task(&mut self, party_id: &str, task_id: &str) -> PartyResult<()> {
        let mut party = self.get_party_required(party_id).await?;

        let before = party.tasks.len();
        party.tasks.retain(|t| t.id != task_id);
        if party.tasks.len() == before {
            return Err(PartyError::TaskNotFound(task_id.to_string()));
        }

        self.store(&party).await
    }

    // Expense operations
    /// Record a new expense
    pub async fn add_expense(
        &mut self,
        party_id: &str,
        expense: NewExpense,
    ) -> PartyResult<Expense> {
        let mut party = self.get_party_required(party_id).await?;
        let expense = expense.with_id(new_id());

        self.check_expense(&expense, &party.members)?;
        party.expenses.push(expense.clone());
        self.store(&party).await?;

        Ok(expense)
    }

    /// Replace an existing expense
    pub async fn update_expense(&mut self, party_id: &str, expense: &Expense) -> PartyResult<()> {
        let mut party = self.get_party_required(party_id).await?;

        if !party.expenses.iter().any(|e| e.id == expense.id) {
            return Err(PartyError::ExpenseNotFound(expense.id.clone()));
        }
        self.check_expense(expense, &party.members)?;

        for existing in party.expenses.iter_mut().filter(|e| e.id == expense.id) {
            *existing = expense.clone();
        }

        self.store(&party).await
    }

    /// Delete an expense
    pub async fn delete_expense(&mut self, party_id: &str, expense_id: &str) -> PartyResult<()> {
        let mut party = self.get_party_required(party_id).await?;

        let before = party.expenses.len();
        party.expenses.retain(|e| e.id != expense_id);
        if party.expenses.len() == before {
            return Err(PartyError::ExpenseNotFound(expense_id.to_string()));
        }

        self.store(&party).await
    }

    /// Expenses, newest first
    pub async fn expenses_by_date(&self, party_id: &str) -> PartyResult<Vec<Expense>> {
        let mut expenses = self.get_party_required(party_id).await?.expenses;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    // Balance operations
    /// Net balance per member
    pub async fn balances(&self, party_id: &str) -> PartyResult<Balances> {
        let party = self.get_party_required(party_id).await?;
        Ok(compute_balances(&party.members, &party.expenses))
    }

    /// Payments that would settle the party
    pub async fn settlements(&self, party_id: &str) -> PartyResult<Vec<SettlementTransaction>> {
        let balances = self.balances(party_id).await?;
        Ok(simplify_with_epsilon(&balances, &self.config.epsilon))
    }

    /// Named balances and settlements for display
    pub async fn balance_summary(&self, party_id: &str) -> PartyResult<BalanceSummary> {
        let party = self.get_party_required(party_id).await?;
        Ok(BalanceSummary::from_party(&party, &self.config))
    }

    fn check_expense(&self, expense: &Expense, members: &[Member]) -> PartyResult<()> {
        self.validator
            .validate_expense(expense, members)
            .inspect_err(|e| {
                tracing::warn!(expense_id = %expense.id, error = %e, "expense rejected");
            })
    }

    async fn store(&mut self, party: &Party) -> PartyResult<()> {
        self.storage.update_party(party).await?;
        tracing::info!(
            party_id = %party.id,
            members = party.members.len(),
            tasks = party.tasks.len(),
            expenses = party.expenses.len(),
            "party saved"
        );
        Ok(())
    }
}
