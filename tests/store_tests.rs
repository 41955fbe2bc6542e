// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneymind::models::{
    Asset, Debt, Expense, ExpensePatch, Income, IncomePatch, Investment, RecordKind,
};
use moneymind::store::Store;
use rust_decimal::Decimal;
use std::fs;
use tempfile::tempdir;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn income(date: &str, source: &str, amount: &str) -> Income {
    Income {
        id: 0,
        date: date.into(),
        source: source.into(),
        amount: dec(amount),
        notes: None,
        recurring: false,
    }
}

fn expense(date: &str, category: &str, amount: &str) -> Expense {
    Expense {
        id: 0,
        date: date.into(),
        category: category.into(),
        amount: dec(amount),
        description: None,
        is_tax_deductible: false,
        recurring: false,
        receipts: Vec::new(),
    }
}

#[test]
fn ids_are_one_plus_max_even_after_deletes() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));

    assert_eq!(store.add_income(income("2025-01-01", "Job", "100")), 1);
    assert_eq!(store.add_income(income("2025-01-02", "Job", "100")), 2);
    assert_eq!(store.add_income(income("2025-01-03", "Job", "100")), 3);

    // Deleting from the middle leaves a gap; the next id still counts
    // up from the max.
    assert!(store.delete(RecordKind::Income, 2));
    assert_eq!(store.add_income(income("2025-01-04", "Job", "100")), 4);
    let ids: Vec<i64> = store.income().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);

    // Ids are per collection, not global.
    assert_eq!(store.add_expense(expense("2025-01-01", "Food", "10")), 1);
}

#[test]
fn empty_store_starts_ids_at_one() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));
    assert_eq!(store.add_expense(expense("2025-01-01", "Food", "10")), 1);
}

#[test]
fn empty_patch_is_a_noop_and_partial_patch_touches_only_given_fields() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));
    let id = store.add_income(Income {
        id: 0,
        date: "2025-03-01".into(),
        source: "Employer".into(),
        amount: dec("2500"),
        notes: Some("march pay".into()),
        recurring: true,
    });

    assert!(store.update_income(id, IncomePatch::default()));
    let e = &store.income()[0];
    assert_eq!(e.date, "2025-03-01");
    assert_eq!(e.source, "Employer");
    assert_eq!(e.amount, dec("2500"));
    assert_eq!(e.notes.as_deref(), Some("march pay"));
    assert!(e.recurring);

    assert!(store.update_income(
        id,
        IncomePatch {
            amount: Some(dec("2600")),
            ..Default::default()
        }
    ));
    let e = &store.income()[0];
    assert_eq!(e.amount, dec("2600"));
    assert_eq!(e.source, "Employer");
    assert_eq!(e.notes.as_deref(), Some("march pay"));
}

#[test]
fn update_unknown_id_fails_without_saving() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("moneymind.json");
    let mut store = Store::open_at(&path);
    store.add_expense(expense("2025-01-01", "Food", "10"));
    let before = fs::read_to_string(&path).unwrap();

    assert!(!store.update_expense(
        99,
        ExpensePatch {
            amount: Some(dec("1")),
            ..Default::default()
        }
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn delete_unknown_id_leaves_collection_untouched() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));
    store.add_income(income("2025-01-01", "Job", "100"));

    assert!(!store.delete(RecordKind::Income, 42));
    assert_eq!(store.income().len(), 1);

    assert!(store.delete(RecordKind::Income, 1));
    assert!(store.income().is_empty());
}

#[test]
fn save_then_load_round_trips_all_collections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("moneymind.json");
    let mut store = Store::open_at(&path);

    store.add_income(Income {
        id: 0,
        date: "2025-01-15".into(),
        source: "Employer".into(),
        amount: dec("2500.50"),
        notes: Some("salary".into()),
        recurring: true,
    });
    store.add_expense(Expense {
        id: 0,
        date: "2025-01-20".into(),
        category: "Groceries".into(),
        amount: dec("82.13"),
        description: Some("weekly run".into()),
        is_tax_deductible: false,
        recurring: false,
        receipts: Vec::new(),
    });
    store.add_debt(Debt {
        id: 0,
        name: "Car loan".into(),
        r#type: "auto".into(),
        original_amount: dec("20000"),
        current_amount: dec("12500"),
        interest_rate: dec("4.9"),
        minimum_payment: dec("310"),
        due_date: "2025-02-01".into(),
        notes: None,
    });
    store.add_asset(Asset {
        id: 0,
        name: "House".into(),
        r#type: "real_estate".into(),
        value: dec("350000"),
        date_updated: "2025-01-01".into(),
        notes: None,
    });
    store.add_investment(Investment {
        id: 0,
        asset_id: Some(1),
        name: "Index fund".into(),
        r#type: "etf".into(),
        quantity: dec("10.5"),
        purchase_price: dec("100"),
        current_price: dec("112.40"),
        date_purchased: "2024-06-01".into(),
        last_updated: "2025-01-01".into(),
        notes: Some("taxable".into()),
    });

    let reloaded = Store::open_at(&path);
    assert_eq!(reloaded.income().len(), 1);
    let i = &reloaded.income()[0];
    assert_eq!(i.id, 1);
    assert_eq!(i.date, "2025-01-15");
    assert_eq!(i.source, "Employer");
    assert_eq!(i.amount, dec("2500.50"));
    assert_eq!(i.notes.as_deref(), Some("salary"));
    assert!(i.recurring);

    let e = &reloaded.expenses()[0];
    assert_eq!(e.category, "Groceries");
    assert_eq!(e.amount, dec("82.13"));
    assert!(e.receipts.is_empty());

    let d = &reloaded.debts()[0];
    assert_eq!(d.name, "Car loan");
    assert_eq!(d.current_amount, dec("12500"));
    assert_eq!(d.interest_rate, dec("4.9"));

    let a = &reloaded.assets()[0];
    assert_eq!(a.value, dec("350000"));

    let v = &reloaded.investments()[0];
    assert_eq!(v.asset_id, Some(1));
    assert_eq!(v.quantity, dec("10.5"));
    assert_eq!(v.current_price, dec("112.40"));
}

#[test]
fn missing_file_is_established_on_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("moneymind.json");
    assert!(!path.exists());

    let store = Store::open_at(&path);
    assert!(path.exists());
    assert!(store.income().is_empty());

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(parsed["income"].as_array().unwrap().is_empty());
    assert!(parsed["investments"].as_array().unwrap().is_empty());
}

#[test]
fn corrupt_file_recovers_empty_and_is_repaired_on_next_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("moneymind.json");
    fs::write(&path, "{ not json").unwrap();

    let mut store = Store::open_at(&path);
    assert!(store.income().is_empty());
    // The corrupt content stays on disk until something saves.
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");

    store.add_income(income("2025-01-01", "Job", "100"));
    let reloaded = Store::open_at(&path);
    assert_eq!(reloaded.income().len(), 1);
}

#[test]
fn attach_receipt_copies_into_receipts_dir() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("moneymind.json");
    let mut store = Store::open_at(&path);
    let id = store.add_expense(expense("2025-01-01", "Food", "10"));

    let source = dir.path().join("receipt.pdf");
    fs::write(&source, b"pdf bytes").unwrap();

    assert!(store.attach_receipt(id, &source));
    let receipts = store.receipts_for_expense(id);
    assert_eq!(receipts.len(), 1);
    let copied = std::path::Path::new(&receipts[0]);
    assert!(copied.exists());
    assert!(copied.parent().unwrap().ends_with("receipts"));
    let name = copied.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with("_receipt.pdf"));

    // Attachment survives a reload.
    let reloaded = Store::open_at(&path);
    assert_eq!(reloaded.receipts_for_expense(id).len(), 1);
}

#[test]
fn attach_receipt_to_unknown_expense_fails_and_references_nothing() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));
    store.add_expense(expense("2025-01-01", "Food", "10"));

    let source = dir.path().join("receipt.pdf");
    fs::write(&source, b"pdf bytes").unwrap();

    assert!(!store.attach_receipt(99, &source));
    for e in store.expenses() {
        assert!(e.receipts.is_empty());
    }
    // The copy is not rolled back; the orphan stays in receipts/.
    let orphans: Vec<_> = fs::read_dir(dir.path().join("receipts"))
        .unwrap()
        .collect();
    assert_eq!(orphans.len(), 1);
}

#[test]
fn attach_receipt_with_missing_source_fails() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));
    let id = store.add_expense(expense("2025-01-01", "Food", "10"));

    assert!(!store.attach_receipt(id, &dir.path().join("nope.pdf")));
    assert!(store.receipts_for_expense(id).is_empty());
}

#[test]
fn detach_receipt_removes_reference_and_optionally_file() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));
    let id = store.add_expense(expense("2025-01-01", "Food", "10"));

    let source = dir.path().join("receipt.pdf");
    fs::write(&source, b"pdf bytes").unwrap();
    assert!(store.attach_receipt(id, &source));
    let copied = store.receipts_for_expense(id)[0].clone();

    // Detach without deleting keeps the file.
    assert!(store.detach_receipt(id, &copied, false));
    assert!(store.receipts_for_expense(id).is_empty());
    assert!(std::path::Path::new(&copied).exists());

    // Re-attach, then detach with delete.
    assert!(store.attach_receipt(id, &source));
    let copied = store.receipts_for_expense(id)[0].clone();
    assert!(store.detach_receipt(id, &copied, true));
    assert!(!std::path::Path::new(&copied).exists());

    // Unknown path or expense is a plain failure.
    assert!(!store.detach_receipt(id, "no/such/path", false));
    assert!(!store.detach_receipt(77, &copied, false));
}
