// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Investment, InvestmentPatch, RecordKind};
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
    let quantity = parse_decimal(sub.get_one::<String>("quantity").unwrap())?;
    let purchase_price = parse_decimal(sub.get_one::<String>("purchase-price").unwrap())?;
    let current_price = parse_decimal(sub.get_one::<String>("current-price").unwrap())?;
    let date_purchased = parse_date(sub.get_one::<String>("purchased").unwrap())?;
    let last_updated = match sub.get_one::<String>("updated") {
        Some(d) => parse_date(d)?.to_string(),
        None => chrono::Utc::now().date_naive().to_string(),
    };
    let asset_id = sub.get_one::<i64>("asset").copied();
    let notes = sub.get_one::<String>("notes").map(|s| s.to_string());

    let id = store.add_investment(Investment {
        id: 0,
        asset_id,
        name: name.to_string(),
        r#type: kind.to_string(),
        quantity,
        purchase_price,
        current_price,
        date_purchased: date_purchased.to_string(),
        last_updated,
        notes,
    });
    println!("Recorded investment #{}: {} x{}", id, name, quantity);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &store.investments())? {
        let rows: Vec<Vec<String>> = store
            .investments()
            .iter()
            .map(|i| {
                vec![
                    i.id.to_string(),
                    i.name.clone(),
                    i.r#type.clone(),
                    i.quantity.to_string(),
                    format!("{:.2}", i.purchase_price),
                    format!("{:.2}", i.current_price),
                    i.date_purchased.clone(),
                    i.last_updated.clone(),
                    i.asset_id.map(|a| a.to_string()).unwrap_or_default(),
                    fmt_opt(&i.notes),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Name",
                    "Type",
                    "Qty",
                    "Bought At",
                    "Now At",
                    "Purchased",
                    "Updated",
                    "Asset",
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
    let mut patch = InvestmentPatch::default();
    if let Some(a) = sub.get_one::<i64>("asset") {
        patch.asset_id = Some(*a);
    }
    if let Some(n) = sub.get_one::<String>("name") {
        patch.name = Some(n.to_string());
    }
    if let Some(t) = sub.get_one::<String>("type") {
        patch.r#type = Some(t.to_string());
    }
    if let Some(q) = sub.get_one::<String>("quantity") {
        patch.quantity = Some(parse_decimal(q)?);
    }
    if let Some(p) = sub.get_one::<String>("purchase-price") {
        patch.purchase_price = Some(parse_decimal(p)?);
    }
    if let Some(p) = sub.get_one::<String>("current-price") {
        patch.current_price = Some(parse_decimal(p)?);
    }
    if let Some(d) = sub.get_one::<String>("purchased") {
        patch.date_purchased = Some(parse_date(d)?.to_string());
    }
    if let Some(d) = sub.get_one::<String>("updated") {
        patch.last_updated = Some(parse_date(d)?.to_string());
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        patch.notes = Some(n.to_string());
    }
    if !store.update_investment(id, patch) {
        bail!("Investment #{} not found", id);
    }
    println!("Updated investment #{}", id);
    Ok(())
}

fn rm(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !store.delete(RecordKind::Investments, id) {
        bail!("Investment #{} not found", id);
    }
    println!("Deleted investment #{}", id);
    Ok(())
}
