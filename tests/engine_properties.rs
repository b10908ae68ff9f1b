//! End-to-end checks of the funding engine across service boundaries:
//! conservation of money, FIFO draw order, cascade behavior and the
//! persistence of all of it across a reload.

use chrono::NaiveDate;
use tempfile::TempDir;

use fintrack_cli::config::FintrackPaths;
use fintrack_cli::models::{BudgetId, BudgetPeriod, BudgetStatus, IncomeId, Money};
use fintrack_cli::services::budget::{BudgetService, CreateBudgetInput};
use fintrack_cli::services::expense::{CreateExpenseInput, ExpenseService};
use fintrack_cli::services::income::{CreateIncomeInput, IncomeService};
use fintrack_cli::storage::Storage;

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

fn income(storage: &Storage, cents: i64, on: NaiveDate) -> IncomeId {
    IncomeService::new(storage)
        .create(CreateIncomeInput {
            amount: Money::from_cents(cents),
            date: Some(on),
            source: None,
            category: "Salary".into(),
            description: String::new(),
        })
        .unwrap()
        .id
}

fn budget(storage: &Storage, name: &str, cents: i64, start: NaiveDate) -> BudgetId {
    BudgetService::new(storage)
        .create(CreateBudgetInput {
            name: name.into(),
            category: None,
            amount: Money::from_cents(cents),
            period: BudgetPeriod::Monthly,
            start_date: start,
            end_date: None,
        })
        .unwrap()
        .id
}

#[test]
fn reallocation_moves_exactly_the_requested_amount() {
    let (_temp_dir, storage) = create_test_storage();
    income(&storage, 12000, date(2024, 1, 1));
    let a = budget(&storage, "A", 10000, date(2024, 1, 1));
    let b = budget(&storage, "B", 10000, date(2024, 1, 1));

    let service = BudgetService::new(&storage);
    service.allocate(a, Money::from_cents(10000)).unwrap();
    service.allocate(b, Money::from_cents(2000)).unwrap();

    // 100/20 -> 60/60
    service.reallocate(a, b, Money::from_cents(4000)).unwrap();
    assert_eq!(service.get(a).unwrap().funded_amount.cents(), 6000);
    assert_eq!(service.get(b).unwrap().funded_amount.cents(), 6000);
    assert!(service.funding_is_conserved().unwrap());
}

#[test]
fn income_deletion_cascades_into_budgets() {
    let (_temp_dir, storage) = create_test_storage();
    let old = income(&storage, 5000, date(2024, 1, 1));
    income(&storage, 5000, date(2024, 2, 1));
    let b = budget(&storage, "Groceries", 10000, date(2024, 1, 1));

    let budgets = BudgetService::new(&storage);
    budgets.allocate(b, Money::from_cents(8000)).unwrap();

    IncomeService::new(&storage).delete(old).unwrap();

    let after = budgets.get(b).unwrap();
    // only the second income's 3000 remains
    assert_eq!(after.funded_amount.cents(), 3000);
    assert!(after.allocations.iter().all(|r| r.income_id != old));
    assert!(after.funding_reconciles());
    assert!(budgets.funding_is_conserved().unwrap());
}

#[test]
fn budget_deletion_frees_income_for_new_allocations() {
    let (_temp_dir, storage) = create_test_storage();
    income(&storage, 10000, date(2024, 1, 1));
    let doomed = budget(&storage, "Doomed", 10000, date(2024, 1, 1));
    let survivor = budget(&storage, "Survivor", 10000, date(2024, 1, 1));

    let service = BudgetService::new(&storage);
    service.allocate(doomed, Money::from_cents(10000)).unwrap();
    assert_eq!(service.unallocated_income().unwrap().cents(), 0);

    service.delete(doomed).unwrap();
    assert_eq!(service.unallocated_income().unwrap().cents(), 10000);

    // freed money is immediately allocatable again
    let outcome = service.allocate(survivor, Money::from_cents(10000)).unwrap();
    assert!(!outcome.is_partial());
    assert!(service.funding_is_conserved().unwrap());
}

#[test]
fn status_is_a_pure_function_of_amounts() {
    let (_temp_dir, storage) = create_test_storage();
    income(&storage, 10000, date(2024, 1, 1));
    let b = budget(&storage, "Rent", 10000, date(2024, 1, 1));

    let budgets = BudgetService::new(&storage);
    budgets.allocate(b, Money::from_cents(10000)).unwrap();

    let expenses = ExpenseService::new(&storage);
    let spent = expenses
        .create(CreateExpenseInput {
            amount: Money::from_cents(11000),
            date: Some(date(2024, 1, 5)),
            category: "Housing".into(),
            description: String::new(),
            vendor: None,
            budget_id: Some(b),
        })
        .unwrap();
    assert_eq!(budgets.get(b).unwrap().status, BudgetStatus::Overspent);

    // deleting the expense walks the status back deterministically
    expenses.delete(spent.id).unwrap();
    assert_eq!(budgets.get(b).unwrap().status, BudgetStatus::FullyFunded);

    // re-deriving from the same amounts never changes anything
    let mut snapshot = budgets.get(b).unwrap();
    let before = snapshot.status;
    snapshot.refresh_status();
    assert_eq!(snapshot.status, before);
}

#[test]
fn state_survives_a_reload_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

    let (income_id, budget_id);
    {
        let storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        income_id = income(&storage, 20000, date(2024, 1, 1));
        budget_id = budget(&storage, "Rent", 15000, date(2024, 1, 1));
        BudgetService::new(&storage)
            .allocate(budget_id, Money::from_cents(15000))
            .unwrap();
    }

    let storage = Storage::new(paths).unwrap();
    storage.load_all().unwrap();
    let budgets = BudgetService::new(&storage);

    let reloaded = budgets.get(budget_id).unwrap();
    assert_eq!(reloaded.funded_amount.cents(), 15000);
    assert_eq!(reloaded.status, BudgetStatus::FullyFunded);
    assert_eq!(reloaded.allocations.len(), 1);
    assert_eq!(reloaded.allocations[0].income_id, income_id);
    assert!(budgets.funding_is_conserved().unwrap());

    // cascades still work against reloaded state
    IncomeService::new(&storage).delete(income_id).unwrap();
    let after = budgets.get(budget_id).unwrap();
    assert_eq!(after.status, BudgetStatus::Unfunded);
    assert!(after.allocations.is_empty());
}

#[test]
fn interleaved_operations_keep_the_ledger_balanced() {
    let (_temp_dir, storage) = create_test_storage();
    let incomes = IncomeService::new(&storage);
    let budgets = BudgetService::new(&storage);
    let expenses = ExpenseService::new(&storage);

    let jan = income(&storage, 300000, date(2024, 1, 1));
    income(&storage, 150000, date(2024, 2, 1));
    let rent = budget(&storage, "Rent", 120000, date(2024, 1, 1));
    let food = budget(&storage, "Food", 60000, date(2024, 1, 1));
    let travel = budget(&storage, "Travel", 200000, date(2024, 3, 1));

    budgets.allocate(rent, Money::from_cents(120000)).unwrap();
    budgets.allocate(food, Money::from_cents(60000)).unwrap();
    budgets.allocate(travel, Money::from_cents(150000)).unwrap();
    assert!(budgets.funding_is_conserved().unwrap());

    expenses
        .create(CreateExpenseInput {
            amount: Money::from_cents(45000),
            date: Some(date(2024, 1, 20)),
            category: "Food".into(),
            description: String::new(),
            vendor: None,
            budget_id: Some(food),
        })
        .unwrap();

    budgets.reallocate(travel, food, Money::from_cents(30000)).unwrap();
    assert!(budgets.funding_is_conserved().unwrap());

    // suggestions reflect the current gaps without touching anything
    let before = budgets.list().unwrap();
    budgets.suggest_allocations().unwrap();
    let after = budgets.list().unwrap();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.funded_amount, a.funded_amount);
        assert_eq!(b.allocations.len(), a.allocations.len());
    }

    incomes.delete(jan).unwrap();
    assert!(budgets.funding_is_conserved().unwrap());
    for b in budgets.list().unwrap() {
        assert!(b.funding_reconciles());
        assert!(!b.funded_amount.is_negative());
    }
}
