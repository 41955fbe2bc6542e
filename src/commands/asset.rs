// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Asset, AssetPatch, RecordKind};
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
    let value = parse_decimal(sub.get_one::<String>("value").unwrap())?;
    let date_updated = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?.to_string(),
        None => chrono::Utc::now().date_naive().to_string(),
    };
    let notes = sub.get_one::<String>("notes").map(|s| s.to_string());

    let id = store.add_asset(Asset {
        id: 0,
        name: name.to_string(),
        r#type: kind.to_string(),
        value,
        date_updated,
        notes,
    });
    println!("Recorded asset #{}: {} {}", id, name, value);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &store.assets())? {
        let rows: Vec<Vec<String>> = store
            .assets()
            .iter()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    a.name.clone(),
                    a.r#type.clone(),
                    format!("{:.2}", a.value),
                    a.date_updated.clone(),
                    fmt_opt(&a.notes),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Name", "Type", "Value", "Updated", "Notes"], rows)
        );
    }
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut patch = AssetPatch::default();
    if let Some(n) = sub.get_one::<String>("name") {
        patch.name = Some(n.to_string());
    }
    if let Some(t) = sub.get_one::<String>("type") {
        patch.r#type = Some(t.to_string());
    }
    if let Some(v) = sub.get_one::<String>("value") {
        patch.value = Some(parse_decimal(v)?);
    }
    if let Some(d) = sub.get_one::<String>("date") {
        patch.date_updated = Some(parse_date(d)?.to_string());
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        patch.notes = Some(n.to_string());
    }
    if !store.update_asset(id, patch) {
        bail!("Asset #{} not found", id);
    }
    println!("Updated asset #{}", id);
    Ok(())
}

fn rm(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !store.delete(RecordKind::Assets, id) {
        bail!("Asset #{} not found", id);
    }
    println!("Deleted asset #{}", id);
    Ok(())
}
