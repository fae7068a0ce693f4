use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use installment_engine::domain::{
    Category, CategoryKind, InstallmentPlan, PaymentMethod, Transaction, TransactionKind,
};
use installment_engine::ledger::{build_monthly_view, plan_catalog, MonthRef};
use installment_engine::EngineConfig;

fn build_sample_ledger(txn_count: usize) -> (Vec<Transaction>, Vec<Category>) {
    let salary = Category::new("Salary", CategoryKind::Revenue);
    let groceries = Category::new("Groceries", CategoryKind::Expense);
    let start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let mut transactions = Vec::with_capacity(txn_count);
    for idx in 0..txn_count {
        let date = start_date + Duration::days((idx % 365) as i64);
        let txn = match idx % 5 {
            0 => Transaction::new(
                TransactionKind::Revenue,
                3000.0,
                date,
                "Salary",
                salary.id,
                PaymentMethod::Transfer,
            ),
            1 => Transaction::new(
                TransactionKind::Expense,
                1200.0 + idx as f64,
                date,
                "Appliance",
                groceries.id,
                PaymentMethod::Credit,
            )
            .with_installments(
                InstallmentPlan::new(2 + (idx % 22) as u32, date).with_paid((idx % 3) as u32),
            ),
            _ => Transaction::new(
                TransactionKind::Expense,
                50.0 + (idx % 100) as f64,
                date,
                "Groceries",
                groceries.id,
                PaymentMethod::Debit,
            ),
        };
        transactions.push(txn);
    }
    (transactions, vec![salary, groceries])
}

fn bench_engine(c: &mut Criterion) {
    let (transactions, categories) = build_sample_ledger(black_box(500));
    let config = EngineConfig::default();
    let month = MonthRef::new(2024, 7).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 7, 20).unwrap();

    c.bench_function("monthly_view_500", |b| {
        b.iter(|| build_monthly_view(&transactions, month, &categories, &config).expect("view"))
    });

    c.bench_function("plan_catalog_500", |b| {
        b.iter(|| plan_catalog(&transactions, today, &categories, &config).expect("catalog"))
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
