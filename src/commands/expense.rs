// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::filter_by_date;
use crate::models::{Expense, ExpensePatch, RecordKind};
use crate::store::Store;
use crate::utils::{
    fmt_opt, maybe_print_json, parse_date, parse_decimal, pretty_table, range_from_args,
};
use anyhow::{bail, Result};
use std::path::Path;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("receipt", sub)) => match sub.subcommand() {
            Some(("attach", s)) => attach(store, s)?,
            Some(("rm", s)) => detach(store, s)?,
            Some(("list", s)) => receipts(store, s)?,
            _ => {}
        },
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").map(|s| s.to_string());
    let is_tax_deductible = sub.get_flag("deductible");
    let recurring = sub.get_flag("recurring");

    let id = store.add_expense(Expense {
        id: 0,
        date: date.to_string(),
        category: category.to_string(),
        amount,
        description,
        is_tax_deductible,
        recurring,
        receipts: Vec::new(),
    });
    println!("Recorded expense #{}: {} {} on {}", id, category, amount, date);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (start, end) = range_from_args(sub)?;
    let category = sub.get_one::<String>("category");

    let mut entries = filter_by_date(store.expenses(), start, end);
    if let Some(cat) = category {
        entries.retain(|e| &e.category == cat);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &entries)? {
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.clone(),
                    e.category.clone(),
                    format!("{:.2}", e.amount),
                    if e.is_tax_deductible { "yes".into() } else { "".into() },
                    if e.recurring { "yes".into() } else { "".into() },
                    e.receipts.len().to_string(),
                    fmt_opt(&e.description),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Date",
                    "Category",
                    "Amount",
                    "Deductible",
                    "Recurring",
                    "Receipts",
                    "Description",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut patch = ExpensePatch::default();
    if let Some(d) = sub.get_one::<String>("date") {
        patch.date = Some(parse_date(d)?.to_string());
    }
    if let Some(c) = sub.get_one::<String>("category") {
        patch.category = Some(c.to_string());
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        patch.amount = Some(parse_decimal(a)?);
    }
    if let Some(d) = sub.get_one::<String>("description") {
        patch.description = Some(d.to_string());
    }
    if let Some(t) = sub.get_one::<bool>("deductible") {
        patch.is_tax_deductible = Some(*t);
    }
    if let Some(r) = sub.get_one::<bool>("recurring") {
        patch.recurring = Some(*r);
    }
    if !store.update_expense(id, patch) {
        bail!("Expense #{} not found", id);
    }
    println!("Updated expense #{}", id);
    Ok(())
}

fn rm(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !store.delete(RecordKind::Expenses, id) {
        bail!("Expense #{} not found", id);
    }
    println!("Deleted expense #{}", id);
    Ok(())
}

fn attach(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let file = sub.get_one::<String>("file").unwrap();
    if !store.attach_receipt(id, Path::new(file)) {
        bail!("Could not attach receipt to expense #{}", id);
    }
    println!("Attached receipt to expense #{}", id);
    Ok(())
}

fn detach(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let path = sub.get_one::<String>("path").unwrap();
    let delete_file = sub.get_flag("delete-file");
    if !store.detach_receipt(id, path, delete_file) {
        bail!("No such receipt on expense #{}", id);
    }
    println!("Removed receipt from expense #{}", id);
    Ok(())
}

fn receipts(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    for path in store.receipts_for_expense(id) {
        println!("{}", path);
    }
    Ok(())
}
