// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Debt, DebtPatch, RecordKind};
use crate::store::Store;
use crate::utils::{fmt_opt, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{bail, Result};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = sub.get_one::<String>("type").unwrap();
    let original_amount = parse_decimal(sub.get_one::<String>("original").unwrap())?;
    let current_amount = parse_decimal(sub.get_one::<String>("current").unwrap())?;
    let interest_rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    let minimum_payment = parse_decimal(sub.get_one::<String>("min-payment").unwrap())?;
    let due_date = parse_date(sub.get_one::<String>("due").unwrap())?;
    let notes = sub.get_one::<String>("notes").map(|s| s.to_string());

    let id = store.add_debt(Debt {
        id: 0,
        name: name.to_string(),
        r#type: kind.to_string(),
        original_amount,
        current_amount,
        interest_rate,
        minimum_payment,
        due_date: due_date.to_string(),
        notes,
    });
    println!("Recorded debt #{}: {} {}", id, name, current_amount);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &store.debts())? {
        let rows: Vec<Vec<String>> = store
            .debts()
            .iter()
            .map(|d| {
                vec![
                    d.id.to_string(),
                    d.name.clone(),
                    d.r#type.clone(),
                    format!("{:.2}", d.original_amount),
                    format!("{:.2}", d.current_amount),
                    format!("{}%", d.interest_rate),
                    format!("{:.2}", d.minimum_payment),
                    d.due_date.clone(),
                    fmt_opt(&d.notes),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Name", "Type", "Original", "Current", "Rate", "Min Payment", "Due",
                    "Notes",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut patch = DebtPatch::default();
    if let Some(n) = sub.get_one::<String>("name") {
        patch.name = Some(n.to_string());
    }
    if let Some(t) = sub.get_one::<String>("type") {
        patch.r#type = Some(t.to_string());
    }
    if let Some(a) = sub.get_one::<String>("original") {
        patch.original_amount = Some(parse_decimal(a)?);
    }
    if let Some(a) = sub.get_one::<String>("current") {
        patch.current_amount = Some(parse_decimal(a)?);
    }
    if let Some(r) = sub.get_one::<String>("rate") {
        patch.interest_rate = Some(parse_decimal(r)?);
    }
    if let Some(p) = sub.get_one::<String>("min-payment") {
        patch.minimum_payment = Some(parse_decimal(p)?);
    }
    if let Some(d) = sub.get_one::<String>("due") {
        patch.due_date = Some(parse_date(d)?.to_string());
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        patch.notes = Some(n.to_string());
    }
    if !store.update_debt(id, patch) {
        bail!("Debt #{} not found", id);
    }
    println!("Updated debt #{}", id);
    Ok(())
}

fn rm(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !store.delete(RecordKind::Debts, id) {
        bail!("Debt #{} not found", id);
    }
    println!("Deleted debt #{}", id);
    Ok(())
}
