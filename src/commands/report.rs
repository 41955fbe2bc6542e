// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, range_from_args};
use anyhow::Result;
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::BTreeSet;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("net-worth", sub)) => net_worth(store, sub)?,
        Some(("cashflow", sub)) => cashflow(store, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(store, sub)?,
        Some(("deductible", sub)) => deductible(store, sub)?,
        Some(("projection", sub)) => projection(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn net_worth(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let assets: Decimal = store.assets().iter().map(|a| a.value).sum();
    let debts: Decimal = store.debts().iter().map(|d| d.current_amount).sum();
    let net = analysis::net_worth(store.assets(), store.debts());

    let payload = json!({
        "assets": assets,
        "debts": debts,
        "net_worth": net,
    });
    if !maybe_print_json(json_flag, jsonl_flag, &payload)? {
        println!("Total assets:  {}", fmt_money(&assets));
        println!("Total debts:   {}", fmt_money(&debts));
        println!("Net worth:     {}", fmt_money(&net));
    }
    Ok(())
}

fn cashflow(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (start, end) = range_from_args(sub)?;

    let income = analysis::income_by_date(analysis::filter_by_date(store.income(), start, end));
    let expenses =
        analysis::expenses_by_date(analysis::filter_by_date(store.expenses(), start, end));

    let mut dates: BTreeSet<String> = income.keys().cloned().collect();
    dates.extend(expenses.keys().cloned());

    let data: Vec<Vec<String>> = dates
        .iter()
        .map(|d| {
            vec![
                d.clone(),
                format!("{:.2}", income.get(d).copied().unwrap_or(Decimal::ZERO)),
                format!("{:.2}", expenses.get(d).copied().unwrap_or(Decimal::ZERO)),
            ]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Date", "Income", "Expense"], data));
    }
    Ok(())
}

fn spend_by_category(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (start, end) = range_from_args(sub)?;

    let totals =
        analysis::spend_by_category(analysis::filter_by_date(store.expenses(), start, end));
    let data: Vec<Vec<String>> = totals
        .iter()
        .map(|(cat, amt)| vec![cat.clone(), format!("{:.2}", amt)])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}

fn deductible(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (start, end) = range_from_args(sub)?;

    let entries: Vec<_> = analysis::filter_by_date(store.expenses(), start, end)
        .into_iter()
        .filter(|e| e.is_tax_deductible)
        .collect();
    let total = analysis::deductible_total(entries.iter().copied());

    if !maybe_print_json(json_flag, jsonl_flag, &entries)? {
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.clone(),
                    e.category.clone(),
                    format!("{:.2}", e.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Date", "Category", "Amount"], rows));
        println!("Deductible total: {}", fmt_money(&total));
    }
    Ok(())
}

fn projection(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let today = chrono::Utc::now().date_naive();
    let proj = analysis::project_net_worth(store.document(), today);

    if !maybe_print_json(json_flag, jsonl_flag, &proj)? {
        if !proj.recurring_only {
            println!("No recurring entries in the trailing year; projecting from all entries.");
        }
        println!("Monthly income:   {}", fmt_money(&proj.monthly_income));
        println!("Monthly expenses: {}", fmt_money(&proj.monthly_expenses));
        println!("Monthly net:      {}", fmt_money(&proj.monthly_net));
        println!("Net worth today:  {}", fmt_money(&proj.starting_net_worth));
        let rows: Vec<Vec<String>> = proj
            .balances
            .iter()
            .enumerate()
            .map(|(i, b)| vec![format!("+{}", i + 1), format!("{:.2}", b)])
            .collect();
        println!("{}", pretty_table(&["Month", "Projected Net Worth"], rows));
    }
    Ok(())
}
