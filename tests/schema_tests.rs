mod common;

use common::*;
use installment_engine::domain::{PaymentMethod, Transaction, TransactionKind};
use installment_engine::ledger::{build_monthly_view, MonthRef, MonthlyEntry, MonthlyView};
use installment_engine::EngineConfig;
use serde_json::{json, Value};

#[test]
fn camel_case_shape_deserializes() {
    let category_id = category("Education").id;
    let raw = json!({
        "id": "5b1e7c1a-8f0e-4c6e-9f1a-0d6f6f3b2a11",
        "type": "expense",
        "amount": 2400.0,
        "date": "2024-05-20",
        "description": "English course",
        "categoryId": category_id,
        "paymentMethod": "booklet",
        "isInstallment": true,
        "installmentPlan": {
            "totalPeriods": 12,
            "paidPeriods": 2,
            "startDate": "2024-06-10"
        }
    });
    let txn: Transaction = serde_json::from_value(raw).unwrap();
    assert_eq!(txn.kind, TransactionKind::Expense);
    assert_eq!(txn.payment_method, PaymentMethod::Booklet);
    assert!(!txn.is_recurrent);
    assert_eq!(txn.installments().unwrap().total_periods, 12);
    assert!(txn.validate().is_ok());
}

#[test]
fn legacy_snake_case_shape_deserializes_to_the_same_record() {
    let category_id = category("Education").id;
    let raw = json!({
        "id": "5b1e7c1a-8f0e-4c6e-9f1a-0d6f6f3b2a11",
        "type": "expense",
        "amount": 2400.0,
        "transaction_date": "2024-05-20",
        "description": "English course",
        "category_id": category_id,
        "payment_method": "Carnê",
        "is_installment": true,
        "is_recurrent": false,
        "installments": {
            "totalInstallments": 12,
            "paidInstallments": 2,
            "startDate": "2024-06-10"
        }
    });
    let legacy: Transaction = serde_json::from_value(raw).unwrap();

    let canonical = serde_json::to_value(&legacy).unwrap();
    assert_eq!(canonical["date"], "2024-05-20");
    assert_eq!(canonical["categoryId"], json!(category_id));
    assert_eq!(canonical["paymentMethod"], "booklet");
    assert_eq!(canonical["installmentPlan"]["totalPeriods"], 12);
    assert!(canonical.get("recurrenceStartDate").is_none());

    let reparsed: Transaction = serde_json::from_value(canonical).unwrap();
    assert_eq!(reparsed, legacy);
}

#[test]
fn monthly_entries_carry_an_explicit_tag() {
    let view = build_monthly_view(
        &sample_ledger(),
        MonthRef::new(2024, 7).unwrap(),
        &categories(),
        &EngineConfig::default(),
    )
    .unwrap();
    let value = serde_json::to_value(&view).unwrap();

    let tags: Vec<&str> = value["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["entryType"].as_str().unwrap())
        .collect();
    assert_eq!(
        tags,
        vec!["installment", "transaction", "transaction", "installment", "transaction"]
    );
    assert_eq!(value["summary"]["totalExpense"], json!(3000.0));
    assert_eq!(value["month"], json!({ "year": 2024, "month": 7 }));

    let back: MonthlyView = serde_json::from_value(value).unwrap();
    assert!(matches!(back.entries[0], MonthlyEntry::Installment(_)));
    assert_eq!(back, view);
}

#[test]
fn unknown_payment_labels_are_rejected() {
    let raw: Value = json!("Bitcoin");
    assert!(serde_json::from_value::<PaymentMethod>(raw).is_err());
}
