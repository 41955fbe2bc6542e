// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneymind::cli;
use moneymind::commands::{expense, income};
use moneymind::store::Store;
use tempfile::tempdir;

fn dispatch(store: &mut Store, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("income", sub)) => income::handle(store, sub),
        Some(("expense", sub)) => expense::handle(store, sub),
        other => panic!("unexpected subcommand {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn income_add_validates_and_records() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));

    dispatch(
        &mut store,
        &[
            "moneymind", "income", "add", "--date", "2025-03-01", "--source", "Employer",
            "--amount", "2500", "--recurring",
        ],
    )
    .unwrap();

    assert_eq!(store.income().len(), 1);
    let e = &store.income()[0];
    assert_eq!(e.id, 1);
    assert_eq!(e.source, "Employer");
    assert!(e.recurring);

    // Bad date is rejected at the CLI boundary; nothing is recorded.
    assert!(dispatch(
        &mut store,
        &[
            "moneymind", "income", "add", "--date", "03/01/2025", "--source", "x", "--amount",
            "1",
        ],
    )
    .is_err());
    assert_eq!(store.income().len(), 1);

    // So is a bad amount.
    assert!(dispatch(
        &mut store,
        &[
            "moneymind", "income", "add", "--date", "2025-03-02", "--source", "x", "--amount",
            "lots",
        ],
    )
    .is_err());
    assert_eq!(store.income().len(), 1);
}

#[test]
fn income_edit_builds_a_partial_patch() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));
    dispatch(
        &mut store,
        &[
            "moneymind", "income", "add", "--date", "2025-03-01", "--source", "Employer",
            "--amount", "2500", "--notes", "march",
        ],
    )
    .unwrap();

    dispatch(
        &mut store,
        &["moneymind", "income", "edit", "1", "--amount", "2600"],
    )
    .unwrap();
    let e = &store.income()[0];
    assert_eq!(e.amount, "2600".parse().unwrap());
    assert_eq!(e.source, "Employer");
    assert_eq!(e.notes.as_deref(), Some("march"));
    assert!(!e.recurring);

    dispatch(
        &mut store,
        &["moneymind", "income", "edit", "1", "--recurring", "true"],
    )
    .unwrap();
    assert!(store.income()[0].recurring);

    // Unknown id surfaces as an error.
    assert!(dispatch(
        &mut store,
        &["moneymind", "income", "edit", "99", "--amount", "1"],
    )
    .is_err());
}

#[test]
fn income_rm_on_missing_id_errors() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));
    assert!(dispatch(&mut store, &["moneymind", "income", "rm", "5"]).is_err());
}

#[test]
fn expense_receipt_attach_and_rm_through_cli() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));
    dispatch(
        &mut store,
        &[
            "moneymind", "expense", "add", "--date", "2025-03-01", "--category", "Office",
            "--amount", "99", "--deductible",
        ],
    )
    .unwrap();
    assert!(store.expenses()[0].is_tax_deductible);

    let source = dir.path().join("scan.png");
    std::fs::write(&source, b"png").unwrap();
    let source_str = source.to_string_lossy().to_string();

    dispatch(
        &mut store,
        &["moneymind", "expense", "receipt", "attach", "1", &source_str],
    )
    .unwrap();
    assert_eq!(store.receipts_for_expense(1).len(), 1);

    let copied = store.receipts_for_expense(1)[0].clone();
    dispatch(
        &mut store,
        &[
            "moneymind",
            "expense",
            "receipt",
            "rm",
            "1",
            &copied,
            "--delete-file",
        ],
    )
    .unwrap();
    assert!(store.receipts_for_expense(1).is_empty());
    assert!(!std::path::Path::new(&copied).exists());

    // Attaching to an id that does not exist errors.
    assert!(dispatch(
        &mut store,
        &["moneymind", "expense", "receipt", "attach", "7", &source_str],
    )
    .is_err());
}

#[test]
fn expense_list_filters_by_category() {
    let dir = tempdir().unwrap();
    let mut store = Store::open_at(dir.path().join("moneymind.json"));
    for (date, cat) in [
        ("2025-01-01", "Food"),
        ("2025-01-02", "Food"),
        ("2025-01-03", "Rent"),
    ] {
        dispatch(
            &mut store,
            &[
                "moneymind", "expense", "add", "--date", date, "--category", cat, "--amount",
                "10",
            ],
        )
        .unwrap();
    }
    // The list command itself prints; here we just make sure the filter
    // plumbing accepts the flags.
    dispatch(
        &mut store,
        &[
            "moneymind", "expense", "list", "--category", "Food", "--from", "2025-01-01",
            "--to", "2025-01-31",
        ],
    )
    .unwrap();
    assert_eq!(store.expenses().len(), 3);
}
