// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::{filter_by_date, in_range};
use crate::store::Store;
use crate::utils::{fmt_opt, range_from_args};
use anyhow::{bail, Result};
use chrono::NaiveDate;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let what = m.get_one::<String>("collection").unwrap().as_str();
    let fmt = m.get_one::<String>("format").unwrap().to_lowercase();
    let out = m.get_one::<String>("out").unwrap();
    let (start, end) = range_from_args(m)?;

    match fmt.as_str() {
        "csv" => export_csv(store, what, out, start, end)?,
        "json" => export_json(store, what, out, start, end)?,
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} to {}", what, out);
    Ok(())
}

fn export_csv(
    store: &Store,
    what: &str,
    out: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    match what {
        "income" => {
            wtr.write_record(["id", "date", "source", "amount", "notes", "recurring"])?;
            for e in filter_by_date(store.income(), start, end) {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.clone(),
                    e.source.clone(),
                    e.amount.to_string(),
                    fmt_opt(&e.notes),
                    e.recurring.to_string(),
                ])?;
            }
        }
        "expenses" => {
            wtr.write_record([
                "id",
                "date",
                "category",
                "amount",
                "description",
                "is_tax_deductible",
                "recurring",
                "receipts",
            ])?;
            for e in filter_by_date(store.expenses(), start, end) {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.clone(),
                    e.category.clone(),
                    e.amount.to_string(),
                    fmt_opt(&e.description),
                    e.is_tax_deductible.to_string(),
                    e.recurring.to_string(),
                    e.receipts.join(";"),
                ])?;
            }
        }
        "debts" => {
            wtr.write_record([
                "id",
                "name",
                "type",
                "original_amount",
                "current_amount",
                "interest_rate",
                "minimum_payment",
                "due_date",
                "notes",
            ])?;
            for d in store.debts() {
                wtr.write_record([
                    d.id.to_string(),
                    d.name.clone(),
                    d.r#type.clone(),
                    d.original_amount.to_string(),
                    d.current_amount.to_string(),
                    d.interest_rate.to_string(),
                    d.minimum_payment.to_string(),
                    d.due_date.clone(),
                    fmt_opt(&d.notes),
                ])?;
            }
        }
        "assets" => {
            wtr.write_record(["id", "name", "type", "value", "date_updated", "notes"])?;
            for a in store.assets() {
                wtr.write_record([
                    a.id.to_string(),
                    a.name.clone(),
                    a.r#type.clone(),
                    a.value.to_string(),
                    a.date_updated.clone(),
                    fmt_opt(&a.notes),
                ])?;
            }
        }
        "investments" => {
            wtr.write_record([
                "id",
                "asset_id",
                "name",
                "type",
                "quantity",
                "purchase_price",
                "current_price",
                "date_purchased",
                "last_updated",
                "notes",
            ])?;
            for i in store.investments() {
                wtr.write_record([
                    i.id.to_string(),
                    i.asset_id.map(|a| a.to_string()).unwrap_or_default(),
                    i.name.clone(),
                    i.r#type.clone(),
                    i.quantity.to_string(),
                    i.purchase_price.to_string(),
                    i.current_price.to_string(),
                    i.date_purchased.clone(),
                    i.last_updated.clone(),
                    fmt_opt(&i.notes),
                ])?;
            }
        }
        _ => bail!("CSV export needs a single collection, not '{}'", what),
    }
    wtr.flush()?;
    Ok(())
}

fn export_json(
    store: &Store,
    what: &str,
    out: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<()> {
    let value = match what {
        "income" => serde_json::to_value(filter_by_date(store.income(), start, end))?,
        "expenses" => serde_json::to_value(filter_by_date(store.expenses(), start, end))?,
        "debts" => serde_json::to_value(store.debts())?,
        "assets" => serde_json::to_value(store.assets())?,
        "investments" => serde_json::to_value(store.investments())?,
        "all" => {
            // The date range narrows the dated collections; the rest
            // export whole.
            let mut doc = store.document().clone();
            doc.income.retain(|i| in_range(&i.date, start, end));
            doc.expenses.retain(|e| in_range(&e.date, start, end));
            serde_json::to_value(doc)?
        }
        _ => bail!("Unknown collection: {}", what),
    };
    std::fs::write(out, serde_json::to_string_pretty(&value)?)?;
    Ok(())
}
