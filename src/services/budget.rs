//! Budget service
//!
//! The funding engine: earmarking income to budgets (allocation),
//! moving funded money between budgets (reallocation), and the derived
//! queries over unallocated income. All funding state changes go
//! through here so the conservation invariant holds: the total
//! allocated across incomes always equals the total funded across
//! budgets.

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Budget, BudgetAllocation, BudgetId, BudgetPeriod, Income, IncomeId, Money};
use crate::storage::Storage;

/// Service for budget management and funding
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new budget
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub name: String,
    pub category: Option<String>,
    pub amount: Money,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Input for updating a budget. Funding fields (funded, spent,
/// allocations, status) are engine-owned and cannot be set here.
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Money>,
    pub period: Option<BudgetPeriod>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// Result of an allocate call. `allocated < requested` signals partial
/// fulfillment; that is expected behavior, not an error.
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    pub requested: Money,
    pub allocated: Money,
    pub allocations: Vec<BudgetAllocation>,
}

impl AllocationOutcome {
    /// Whether less was allocated than requested
    pub fn is_partial(&self) -> bool {
        self.allocated < self.requested
    }
}

/// A suggested funding amount for one underfunded budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationSuggestion {
    pub budget_id: BudgetId,
    pub suggested_amount: Money,
}

/// A budget with funded money still available to spend
#[derive(Debug, Clone)]
pub struct AvailableBudget {
    pub id: BudgetId,
    pub name: String,
    pub category: Option<String>,
    pub available_amount: Money,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new budget, starting unfunded
    pub fn create(&self, input: CreateBudgetInput) -> FintrackResult<Budget> {
        let mut budget = Budget::new(input.name, input.amount, input.start_date);
        budget.category = input.category;
        budget.period = input.period;
        budget.end_date = input.end_date;

        budget
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        Ok(budget)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> FintrackResult<Budget> {
        self.storage
            .budgets
            .get(id)?
            .ok_or_else(|| FintrackError::budget_not_found(id.to_string()))
    }

    /// List all budgets, earliest start date first
    pub fn list(&self) -> FintrackResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Update a budget's descriptive fields. Changing the target
    /// rederives the status.
    pub fn update(&self, id: BudgetId, input: UpdateBudgetInput) -> FintrackResult<Budget> {
        let mut budget = self.get(id)?;

        if let Some(name) = input.name {
            budget.name = name;
        }
        if let Some(category) = input.category {
            budget.category = Some(category);
        }
        if let Some(amount) = input.amount {
            budget.amount = amount;
            budget.refresh_status();
        }
        if let Some(period) = input.period {
            budget.period = period;
        }
        if let Some(start_date) = input.start_date {
            budget.start_date = start_date;
        }
        if let Some(end_date) = input.end_date {
            budget.end_date = Some(end_date);
        }
        if let Some(is_active) = input.is_active {
            budget.is_active = is_active;
        }

        budget
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        Ok(budget)
    }

    /// Delete a budget, reversing its funding: every backing income
    /// gets its allocated amount reduced by the budget's net
    /// contribution from that income.
    pub fn delete(&self, id: BudgetId) -> FintrackResult<()> {
        let budget = self.get(id)?;

        for (income_id, net) in budget.contributions_by_income() {
            if let Some(mut income) = self.storage.incomes.get(income_id)? {
                income.allocated_amount -= net;
                self.storage.incomes.upsert(income)?;
            }
        }

        self.storage.budgets.delete(id)?;
        self.storage.budgets.save()?;
        self.storage.incomes.save()?;

        Ok(())
    }

    /// Earmark income to a budget.
    ///
    /// Draws greedily from incomes with available balance, oldest
    /// income first (FIFO), creating one allocation record per income
    /// drawn. Allocates less than requested when available income runs
    /// out; see [`AllocationOutcome::is_partial`].
    pub fn allocate(&self, budget_id: BudgetId, amount: Money) -> FintrackResult<AllocationOutcome> {
        if !amount.is_positive() {
            return Err(FintrackError::Validation(
                "Allocation amount must be positive".into(),
            ));
        }

        let mut budget = self.get(budget_id)?;

        let mut remaining = amount;
        let mut new_allocations = Vec::new();
        let mut touched_incomes = Vec::new();

        // get_all returns incomes in date order, oldest first
        for mut income in self.storage.incomes.get_all()? {
            if remaining.is_zero() {
                break;
            }
            if !income.has_available() {
                continue;
            }

            let draw = income.available().min(remaining);
            new_allocations.push(BudgetAllocation::new(income.id, draw));
            income.allocated_amount += draw;
            remaining -= draw;
            touched_incomes.push(income);
        }

        let allocated = amount - remaining;

        if allocated.is_positive() {
            for income in touched_incomes {
                self.storage.incomes.upsert(income)?;
            }

            budget.allocations.extend(new_allocations.iter().cloned());
            budget.funded_amount += allocated;
            budget.refresh_status();
            self.storage.budgets.upsert(budget)?;

            self.storage.incomes.save()?;
            self.storage.budgets.save()?;
        }

        Ok(AllocationOutcome {
            requested: amount,
            allocated,
            allocations: new_allocations,
        })
    }

    /// Move already-funded money from one budget to another.
    ///
    /// Rejected atomically with `InsufficientFunds` when the source
    /// holds less than `amount`. Provenance records stay immutable:
    /// the source gets offsetting negative (transfer-out) records and
    /// the target gets matching positive records attributed to the
    /// same originating incomes, oldest income first. Income
    /// allocations are untouched, so total funded money is conserved.
    pub fn reallocate(
        &self,
        from_id: BudgetId,
        to_id: BudgetId,
        amount: Money,
    ) -> FintrackResult<()> {
        if !amount.is_positive() {
            return Err(FintrackError::Validation(
                "Reallocation amount must be positive".into(),
            ));
        }
        if from_id == to_id {
            return Err(FintrackError::Validation(
                "Cannot reallocate a budget to itself".into(),
            ));
        }

        let mut from_budget = self.get(from_id)?;
        let mut to_budget = self.get(to_id)?;

        if from_budget.funded_amount < amount {
            return Err(FintrackError::InsufficientFunds {
                budget: from_budget.name.clone(),
                requested_cents: amount.cents(),
                available_cents: from_budget.funded_amount.cents(),
            });
        }

        let mut remaining = amount;
        for (income_id, net) in self.source_contributions(&from_budget)? {
            if remaining.is_zero() {
                break;
            }
            let draw = net.min(remaining);
            if !draw.is_positive() {
                continue;
            }

            from_budget
                .allocations
                .push(BudgetAllocation::new(income_id, -draw));
            to_budget
                .allocations
                .push(BudgetAllocation::new(income_id, draw));
            remaining -= draw;
        }

        // funded == sum(records) guarantees the contributions cover it
        debug_assert!(remaining.is_zero());

        from_budget.funded_amount -= amount;
        from_budget.refresh_status();
        to_budget.funded_amount += amount;
        to_budget.refresh_status();

        self.storage.budgets.upsert(from_budget)?;
        self.storage.budgets.upsert(to_budget)?;
        self.storage.budgets.save()?;

        Ok(())
    }

    /// Net per-income contributions of a budget, ordered by income
    /// date ascending. Contributions from incomes missing in the store
    /// come last, so a consistent store always drains oldest first.
    fn source_contributions(
        &self,
        budget: &Budget,
    ) -> FintrackResult<Vec<(IncomeId, Money)>> {
        let mut by_income = budget.contributions_by_income();
        let mut ordered = Vec::with_capacity(by_income.len());

        for income in self.storage.incomes.get_all()? {
            if let Some(net) = by_income.remove(&income.id) {
                ordered.push((income.id, net));
            }
        }
        ordered.extend(by_income);

        Ok(ordered)
    }

    /// Total income not yet earmarked to any budget
    pub fn unallocated_income(&self) -> FintrackResult<Money> {
        Ok(self
            .storage
            .incomes
            .get_all()?
            .iter()
            .map(|i| i.available())
            .sum())
    }

    /// Incomes with a positive available balance, oldest first
    pub fn available_incomes(&self) -> FintrackResult<Vec<Income>> {
        Ok(self
            .storage
            .incomes
            .get_all()?
            .into_iter()
            .filter(Income::has_available)
            .collect())
    }

    /// Suggest how to spread the current unallocated income across
    /// underfunded budgets, earliest-starting first. Read-only: the
    /// caller commits a suggestion by calling [`allocate`].
    ///
    /// [`allocate`]: BudgetService::allocate
    pub fn suggest_allocations(&self) -> FintrackResult<Vec<AllocationSuggestion>> {
        let mut remaining = self.unallocated_income()?;
        let mut suggestions = Vec::new();

        // get_all returns budgets ordered by start date
        for budget in self.storage.budgets.get_all()? {
            if !remaining.is_positive() {
                break;
            }
            if !budget.is_underfunded() {
                continue;
            }

            let suggested = budget.needed().min(remaining);
            suggestions.push(AllocationSuggestion {
                budget_id: budget.id,
                suggested_amount: suggested,
            });
            remaining -= suggested;
        }

        Ok(suggestions)
    }

    /// Active budgets with funded money left to spend
    pub fn available_budgets(&self) -> FintrackResult<Vec<AvailableBudget>> {
        Ok(self
            .storage
            .budgets
            .get_all()?
            .into_iter()
            .filter(|b| b.is_active && b.available().is_positive())
            .map(|b| AvailableBudget {
                id: b.id,
                name: b.name,
                category: b.category,
                available_amount: b.funded_amount - b.spent_amount,
            })
            .collect())
    }

    /// Conservation check: total allocated across incomes equals total
    /// funded across budgets
    pub fn funding_is_conserved(&self) -> FintrackResult<bool> {
        let allocated: Money = self
            .storage
            .incomes
            .get_all()?
            .iter()
            .map(|i| i.allocated_amount)
            .sum();
        let funded: Money = self
            .storage
            .budgets
            .get_all()?
            .iter()
            .map(|b| b.funded_amount)
            .sum();
        Ok(allocated == funded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::BudgetStatus;
    use crate::services::income::{CreateIncomeInput, IncomeService};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add_income(storage: &Storage, cents: i64, on: NaiveDate) -> IncomeId {
        let service = IncomeService::new(storage);
        let income = service
            .create(CreateIncomeInput {
                amount: Money::from_cents(cents),
                date: Some(on),
                source: None,
                category: String::new(),
                description: String::new(),
            })
            .unwrap();
        income.id
    }

    fn add_budget(storage: &Storage, name: &str, cents: i64, start: NaiveDate) -> BudgetId {
        let service = BudgetService::new(storage);
        let budget = service
            .create(CreateBudgetInput {
                name: name.into(),
                category: None,
                amount: Money::from_cents(cents),
                period: BudgetPeriod::Monthly,
                start_date: start,
                end_date: None,
            })
            .unwrap();
        budget.id
    }

    #[test]
    fn test_allocate_fifo_order() {
        let (_temp_dir, storage) = create_test_storage();
        let january = add_income(&storage, 10000, date(2024, 1, 1));
        let february = add_income(&storage, 10000, date(2024, 2, 1));
        let budget_id = add_budget(&storage, "Rent", 20000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        let outcome = service.allocate(budget_id, Money::from_cents(15000)).unwrap();

        assert_eq!(outcome.allocated.cents(), 15000);
        assert!(!outcome.is_partial());
        assert_eq!(outcome.allocations.len(), 2);
        // January drained in full before February is touched
        assert_eq!(outcome.allocations[0].income_id, january);
        assert_eq!(outcome.allocations[0].amount.cents(), 10000);
        assert_eq!(outcome.allocations[1].income_id, february);
        assert_eq!(outcome.allocations[1].amount.cents(), 5000);

        let jan = storage.incomes.get(january).unwrap().unwrap();
        let feb = storage.incomes.get(february).unwrap().unwrap();
        assert_eq!(jan.allocated_amount.cents(), 10000);
        assert_eq!(feb.allocated_amount.cents(), 5000);
    }

    #[test]
    fn test_allocate_partial_fulfillment() {
        let (_temp_dir, storage) = create_test_storage();
        add_income(&storage, 3000, date(2024, 1, 1));
        let budget_id = add_budget(&storage, "Travel", 10000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        let outcome = service.allocate(budget_id, Money::from_cents(10000)).unwrap();

        assert_eq!(outcome.allocated.cents(), 3000);
        assert!(outcome.is_partial());

        let budget = service.get(budget_id).unwrap();
        assert_eq!(budget.funded_amount.cents(), 3000);
        assert_eq!(budget.status, BudgetStatus::PartiallyFunded);
        assert!(budget.funding_reconciles());
    }

    #[test]
    fn test_allocate_with_no_income_changes_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let budget_id = add_budget(&storage, "Empty", 5000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        let outcome = service.allocate(budget_id, Money::from_cents(5000)).unwrap();

        assert!(outcome.allocated.is_zero());
        assert!(outcome.allocations.is_empty());
        let budget = service.get(budget_id).unwrap();
        assert_eq!(budget.status, BudgetStatus::Unfunded);
    }

    #[test]
    fn test_allocate_rejects_non_positive_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let budget_id = add_budget(&storage, "Rent", 5000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        let result = service.allocate(budget_id, Money::zero());
        assert!(matches!(result, Err(FintrackError::Validation(_))));
    }

    #[test]
    fn test_allocate_missing_budget_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        add_income(&storage, 1000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        let result = service.allocate(BudgetId::new(), Money::from_cents(100));
        assert!(matches!(result, Err(FintrackError::NotFound { .. })));
        // nothing was drawn
        assert_eq!(service.unallocated_income().unwrap().cents(), 1000);
    }

    #[test]
    fn test_reallocate_conserves_totals() {
        let (_temp_dir, storage) = create_test_storage();
        add_income(&storage, 12000, date(2024, 1, 1));
        let a = add_budget(&storage, "A", 10000, date(2024, 1, 1));
        let b = add_budget(&storage, "B", 10000, date(2024, 2, 1));

        let service = BudgetService::new(&storage);
        service.allocate(a, Money::from_cents(10000)).unwrap();
        service.allocate(b, Money::from_cents(2000)).unwrap();

        service.reallocate(a, b, Money::from_cents(4000)).unwrap();

        let from = service.get(a).unwrap();
        let to = service.get(b).unwrap();
        assert_eq!(from.funded_amount.cents(), 6000);
        assert_eq!(to.funded_amount.cents(), 6000);
        assert!(from.funding_reconciles());
        assert!(to.funding_reconciles());
        assert!(service.funding_is_conserved().unwrap());
    }

    #[test]
    fn test_reallocate_insufficient_funds_is_atomic() {
        let (_temp_dir, storage) = create_test_storage();
        add_income(&storage, 5000, date(2024, 1, 1));
        let a = add_budget(&storage, "A", 10000, date(2024, 1, 1));
        let b = add_budget(&storage, "B", 10000, date(2024, 2, 1));

        let service = BudgetService::new(&storage);
        service.allocate(a, Money::from_cents(3000)).unwrap();

        let result = service.reallocate(a, b, Money::from_cents(4000));
        assert!(matches!(result, Err(FintrackError::InsufficientFunds { .. })));

        // no partial movement
        assert_eq!(service.get(a).unwrap().funded_amount.cents(), 3000);
        assert_eq!(service.get(b).unwrap().funded_amount.cents(), 0);
    }

    #[test]
    fn test_reallocate_keeps_provenance_records() {
        let (_temp_dir, storage) = create_test_storage();
        let income = add_income(&storage, 10000, date(2024, 1, 1));
        let a = add_budget(&storage, "A", 10000, date(2024, 1, 1));
        let b = add_budget(&storage, "B", 10000, date(2024, 2, 1));

        let service = BudgetService::new(&storage);
        service.allocate(a, Money::from_cents(8000)).unwrap();
        service.reallocate(a, b, Money::from_cents(3000)).unwrap();

        let from = service.get(a).unwrap();
        // original record untouched, offsetting record appended
        assert_eq!(from.allocations.len(), 2);
        assert_eq!(from.allocations[0].amount.cents(), 8000);
        assert_eq!(from.allocations[1].amount.cents(), -3000);
        assert_eq!(from.allocations[1].income_id, income);

        let to = service.get(b).unwrap();
        assert_eq!(to.allocations.len(), 1);
        assert_eq!(to.allocations[0].income_id, income);
        assert_eq!(to.allocations[0].amount.cents(), 3000);

        // income-side bookkeeping untouched by a budget-to-budget move
        let backing = storage.incomes.get(income).unwrap().unwrap();
        assert_eq!(backing.allocated_amount.cents(), 8000);
    }

    #[test]
    fn test_reallocate_to_self_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        add_income(&storage, 5000, date(2024, 1, 1));
        let a = add_budget(&storage, "A", 10000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        service.allocate(a, Money::from_cents(5000)).unwrap();
        let result = service.reallocate(a, a, Money::from_cents(1000));
        assert!(matches!(result, Err(FintrackError::Validation(_))));
    }

    #[test]
    fn test_unallocated_income() {
        let (_temp_dir, storage) = create_test_storage();
        add_income(&storage, 10000, date(2024, 1, 1));
        add_income(&storage, 5000, date(2024, 2, 1));
        let budget_id = add_budget(&storage, "Rent", 20000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        assert_eq!(service.unallocated_income().unwrap().cents(), 15000);

        service.allocate(budget_id, Money::from_cents(12000)).unwrap();
        assert_eq!(service.unallocated_income().unwrap().cents(), 3000);

        let available = service.available_incomes().unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].available().cents(), 3000);
    }

    #[test]
    fn test_suggest_allocations_orders_by_start_date() {
        let (_temp_dir, storage) = create_test_storage();
        add_income(&storage, 12000, date(2024, 1, 1));
        let later = add_budget(&storage, "Later", 10000, date(2024, 3, 1));
        let earlier = add_budget(&storage, "Earlier", 10000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        let suggestions = service.suggest_allocations().unwrap();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].budget_id, earlier);
        assert_eq!(suggestions[0].suggested_amount.cents(), 10000);
        assert_eq!(suggestions[1].budget_id, later);
        assert_eq!(suggestions[1].suggested_amount.cents(), 2000);
    }

    #[test]
    fn test_suggest_allocations_is_read_only() {
        let (_temp_dir, storage) = create_test_storage();
        add_income(&storage, 12000, date(2024, 1, 1));
        let budget_id = add_budget(&storage, "Rent", 10000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        let first = service.suggest_allocations().unwrap();
        let second = service.suggest_allocations().unwrap();
        assert_eq!(first, second);

        // nothing moved
        assert_eq!(service.unallocated_income().unwrap().cents(), 12000);
        let budget = service.get(budget_id).unwrap();
        assert!(budget.funded_amount.is_zero());
        assert!(budget.allocations.is_empty());
    }

    #[test]
    fn test_available_budgets_filters_inactive_and_spent() {
        let (_temp_dir, storage) = create_test_storage();
        add_income(&storage, 20000, date(2024, 1, 1));
        let active = add_budget(&storage, "Active", 10000, date(2024, 1, 1));
        let inactive = add_budget(&storage, "Inactive", 10000, date(2024, 1, 1));
        let unfunded = add_budget(&storage, "Unfunded", 10000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        service.allocate(active, Money::from_cents(5000)).unwrap();
        service.allocate(inactive, Money::from_cents(5000)).unwrap();
        service
            .update(
                inactive,
                UpdateBudgetInput {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        let available = service.available_budgets().unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, active);
        assert_eq!(available[0].available_amount.cents(), 5000);
        assert!(!available.iter().any(|b| b.id == unfunded));
    }

    #[test]
    fn test_delete_budget_reverses_funding() {
        let (_temp_dir, storage) = create_test_storage();
        let income = add_income(&storage, 10000, date(2024, 1, 1));
        let budget_id = add_budget(&storage, "Rent", 10000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        service.allocate(budget_id, Money::from_cents(7000)).unwrap();
        assert_eq!(
            storage.incomes.get(income).unwrap().unwrap().allocated_amount.cents(),
            7000
        );

        service.delete(budget_id).unwrap();

        let backing = storage.incomes.get(income).unwrap().unwrap();
        assert_eq!(backing.allocated_amount.cents(), 0);
        assert!(service.get(budget_id).is_err());
        assert!(service.funding_is_conserved().unwrap());
    }

    #[test]
    fn test_update_amount_rederives_status() {
        let (_temp_dir, storage) = create_test_storage();
        add_income(&storage, 10000, date(2024, 1, 1));
        let budget_id = add_budget(&storage, "Rent", 10000, date(2024, 1, 1));

        let service = BudgetService::new(&storage);
        service.allocate(budget_id, Money::from_cents(10000)).unwrap();
        assert_eq!(service.get(budget_id).unwrap().status, BudgetStatus::FullyFunded);

        let updated = service
            .update(
                budget_id,
                UpdateBudgetInput {
                    amount: Some(Money::from_cents(20000)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, BudgetStatus::PartiallyFunded);
    }

    #[test]
    fn test_conservation_over_operation_sequence() {
        let (_temp_dir, storage) = create_test_storage();
        add_income(&storage, 50000, date(2024, 1, 1));
        add_income(&storage, 30000, date(2024, 2, 1));
        let a = add_budget(&storage, "A", 40000, date(2024, 1, 1));
        let b = add_budget(&storage, "B", 40000, date(2024, 2, 1));
        let c = add_budget(&storage, "C", 40000, date(2024, 3, 1));

        let service = BudgetService::new(&storage);
        service.allocate(a, Money::from_cents(35000)).unwrap();
        assert!(service.funding_is_conserved().unwrap());
        service.allocate(b, Money::from_cents(25000)).unwrap();
        assert!(service.funding_is_conserved().unwrap());
        service.reallocate(a, c, Money::from_cents(15000)).unwrap();
        assert!(service.funding_is_conserved().unwrap());
        service.reallocate(b, a, Money::from_cents(5000)).unwrap();
        assert!(service.funding_is_conserved().unwrap());
        // over-ask: partial fulfillment of whatever is left (20000)
        let outcome = service.allocate(c, Money::from_cents(99999)).unwrap();
        assert_eq!(outcome.allocated.cents(), 20000);
        assert!(service.funding_is_conserved().unwrap());
        assert_eq!(service.unallocated_income().unwrap().cents(), 0);
    }
}
