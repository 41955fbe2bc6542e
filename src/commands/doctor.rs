// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::parse_entry_date;
use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;
use std::path::Path;

/// Read-only consistency sweep. None of these findings are errors to the
/// store itself; they are the soft spots of a format with no referential
/// integrity.
pub fn handle(store: &Store) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Investments pointing at assets that no longer exist
    for inv in store.investments() {
        if let Some(aid) = inv.asset_id {
            if !store.assets().iter().any(|a| a.id == aid) {
                rows.push(vec![
                    "dangling_asset_ref".into(),
                    format!("investment #{} -> asset #{}", inv.id, aid),
                ]);
            }
        }
    }

    // 2) Receipt paths whose file is gone from disk
    for e in store.expenses() {
        for r in &e.receipts {
            if !Path::new(r).exists() {
                rows.push(vec![
                    "missing_receipt_file".into(),
                    format!("expense #{}: {}", e.id, r),
                ]);
            }
        }
    }

    // 3) Dates that will not parse; these pass every range filter
    for (kind, id, date) in store
        .income()
        .iter()
        .map(|e| ("income", e.id, e.date.as_str()))
        .chain(
            store
                .expenses()
                .iter()
                .map(|e| ("expense", e.id, e.date.as_str())),
        )
        .chain(store.debts().iter().map(|d| ("debt", d.id, d.due_date.as_str())))
        .chain(
            store
                .assets()
                .iter()
                .map(|a| ("asset", a.id, a.date_updated.as_str())),
        )
        .chain(
            store
                .investments()
                .iter()
                .map(|i| ("investment", i.id, i.date_purchased.as_str())),
        )
    {
        if parse_entry_date(date).is_none() {
            rows.push(vec![
                "unparseable_date".into(),
                format!("{} #{}: '{}'", kind, id, date),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
