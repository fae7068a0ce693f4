#![allow(dead_code)]

use chrono::NaiveDate;
use installment_engine::domain::{
    Category, CategoryKind, InstallmentPlan, PaymentMethod, Transaction, TransactionKind,
};
use once_cell::sync::Lazy;

/// Category fixtures shared by every test in a binary so ids stay stable.
static CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        Category::new("Salary", CategoryKind::Revenue),
        Category::new("Housing", CategoryKind::Expense),
        Category::new("Groceries", CategoryKind::Expense),
        Category::new("Education", CategoryKind::Expense),
        Category::new("Health", CategoryKind::Expense),
    ]
});

pub fn categories() -> Vec<Category> {
    CATEGORIES.clone()
}

pub fn category(name: &str) -> Category {
    CATEGORIES
        .iter()
        .find(|c| c.name == name)
        .cloned()
        .unwrap_or_else(|| panic!("unknown fixture category {name}"))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

pub fn single(
    kind: TransactionKind,
    amount: f64,
    on: NaiveDate,
    description: &str,
    category_name: &str,
) -> Transaction {
    Transaction::new(
        kind,
        amount,
        on,
        description,
        category(category_name).id,
        PaymentMethod::Debit,
    )
}

pub fn installment(
    amount: f64,
    recorded: NaiveDate,
    description: &str,
    category_name: &str,
    plan: InstallmentPlan,
) -> Transaction {
    Transaction::new(
        TransactionKind::Expense,
        amount,
        recorded,
        description,
        category(category_name).id,
        PaymentMethod::Credit,
    )
    .with_installments(plan)
}

/// 2400 over 12 months from 2024-06-10, two periods paid.
pub fn english_course() -> Transaction {
    installment(
        2400.0,
        date(2024, 5, 20),
        "English course",
        "Education",
        InstallmentPlan::new(12, date(2024, 6, 10)).with_paid(2),
    )
}

/// 3000 over 6 months from 2024-03-25, three periods paid.
pub fn laptop() -> Transaction {
    installment(
        3000.0,
        date(2024, 2, 15),
        "New laptop",
        "Education",
        InstallmentPlan::new(6, date(2024, 3, 25)).with_paid(3),
    )
}

/// 1200 over 6 months from 2024-01-15, fully paid.
pub fn gym_plan() -> Transaction {
    installment(
        1200.0,
        date(2024, 1, 10),
        "Gym (annual plan)",
        "Health",
        InstallmentPlan::new(6, date(2024, 1, 15)).with_paid(6),
    )
}

/// Salary, rent and groceries in July 2024 plus the three installment plans.
pub fn sample_ledger() -> Vec<Transaction> {
    vec![
        single(TransactionKind::Revenue, 5000.0, date(2024, 7, 5), "Monthly salary", "Salary"),
        single(TransactionKind::Expense, 1500.0, date(2024, 7, 10), "Rent", "Housing"),
        single(TransactionKind::Expense, 800.0, date(2024, 7, 15), "Groceries", "Groceries"),
        english_course(),
        laptop(),
        gym_plan(),
    ]
}
