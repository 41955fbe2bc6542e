// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::filter_by_date;
use crate::models::{Income, IncomePatch, RecordKind};
use crate::store::Store;
use crate::utils::{
    fmt_opt, maybe_print_json, parse_date, parse_decimal, pretty_table, range_from_args,
};
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
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let source = sub.get_one::<String>("source").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let notes = sub.get_one::<String>("notes").map(|s| s.to_string());
    let recurring = sub.get_flag("recurring");

    let id = store.add_income(Income {
        id: 0,
        date: date.to_string(),
        source: source.to_string(),
        amount,
        notes,
        recurring,
    });
    println!("Recorded income #{}: {} {} on {}", id, source, amount, date);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (start, end) = range_from_args(sub)?;

    let entries = filter_by_date(store.income(), start, end);
    if !maybe_print_json(json_flag, jsonl_flag, &entries)? {
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.clone(),
                    e.source.clone(),
                    format!("{:.2}", e.amount),
                    if e.recurring { "yes".into() } else { "".into() },
                    fmt_opt(&e.notes),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Source", "Amount", "Recurring", "Notes"], rows)
        );
    }
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut patch = IncomePatch::default();
    if let Some(d) = sub.get_one::<String>("date") {
        patch.date = Some(parse_date(d)?.to_string());
    }
    if let Some(s) = sub.get_one::<String>("source") {
        patch.source = Some(s.to_string());
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        patch.amount = Some(parse_decimal(a)?);
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        patch.notes = Some(n.to_string());
    }
    if let Some(r) = sub.get_one::<bool>("recurring") {
        patch.recurring = Some(*r);
    }
    if !store.update_income(id, patch) {
        bail!("Income #{} not found", id);
    }
    println!("Updated income #{}", id);
    Ok(())
}

fn rm(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !store.delete(RecordKind::Income, id) {
        bail!("Income #{} not found", id);
    }
    println!("Deleted income #{}", id);
    Ok(())
}
