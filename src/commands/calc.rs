// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::{
    compare_refinance, mortgage_payment, project_ira, project_retirement, RefinanceInputs,
};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{bail, Result};
use serde_json::json;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("mortgage", sub)) => mortgage(sub)?,
        Some(("refinance", sub)) => refinance(sub)?,
        Some(("ira", sub)) => ira(sub)?,
        Some(("retirement", sub)) => retirement(sub)?,
        _ => {}
    }
    Ok(())
}

fn mortgage(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let principal = *sub.get_one::<f64>("principal").unwrap();
    let rate_pct = *sub.get_one::<f64>("rate").unwrap();
    let years = *sub.get_one::<u32>("years").unwrap();
    if rate_pct < 0.0 {
        bail!("Interest rate cannot be negative");
    }
    if years == 0 {
        bail!("Term must be at least one year");
    }

    let payment = mortgage_payment(principal, rate_pct / 100.0 / 12.0, years * 12);
    let payload = json!({ "monthly_payment": payment });
    if !maybe_print_json(json_flag, jsonl_flag, &payload)? {
        println!("Monthly payment: ${:.2}", payment);
    }
    Ok(())
}

fn refinance(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let inputs = RefinanceInputs {
        current_balance: *sub.get_one::<f64>("balance").unwrap(),
        original_term_years: *sub.get_one::<u32>("original-term").unwrap(),
        original_rate_pct: *sub.get_one::<f64>("original-rate").unwrap(),
        new_rate_pct: *sub.get_one::<f64>("new-rate").unwrap(),
        new_term_years: *sub.get_one::<u32>("new-term").unwrap(),
        refinance_costs: *sub.get_one::<f64>("costs").unwrap(),
    };
    if inputs.original_term_years == 0 || inputs.new_term_years == 0 {
        bail!("Loan terms must be at least one year");
    }
    if inputs.original_rate_pct < 0.0 || inputs.new_rate_pct < 0.0 {
        bail!("Interest rates cannot be negative");
    }

    let cmp = compare_refinance(&inputs);
    if !maybe_print_json(json_flag, jsonl_flag, &cmp)? {
        println!("Original monthly payment: ${:.2}", cmp.original_payment);
        println!("New monthly payment:      ${:.2}", cmp.new_payment);
        println!("Monthly savings:          ${:.2}", cmp.monthly_savings);
        println!(
            "Total interest saved (estimate): ${:.2}",
            cmp.total_interest_saved
        );
        if cmp.breakeven_months.is_infinite() {
            println!("Break-even point: never (no monthly savings)");
        } else if cmp.breakeven_months <= 0.0 {
            println!("Break-even point: immediately");
        } else {
            println!("Break-even point: {:.1} months", cmp.breakeven_months);
        }
    }
    Ok(())
}

fn years_to_retirement(sub: &clap::ArgMatches) -> Result<u32> {
    let age = *sub.get_one::<u32>("age").unwrap();
    let retirement_age = *sub.get_one::<u32>("retirement-age").unwrap();
    if retirement_age <= age {
        bail!("Retirement age must be greater than current age");
    }
    Ok(retirement_age - age)
}

fn ira(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let years = years_to_retirement(sub)?;
    let balance = *sub.get_one::<f64>("balance").unwrap();
    let contribution = *sub.get_one::<f64>("contribution").unwrap();
    let rate_pct = *sub.get_one::<f64>("rate").unwrap();
    if rate_pct < 0.0 {
        bail!("Annual rate of return cannot be negative");
    }

    let proj = project_ira(balance, contribution, rate_pct, years);
    if !maybe_print_json(json_flag, jsonl_flag, &proj)? {
        println!("Projected balance at retirement: ${:.2}", proj.projected_balance);
        println!("Total contributions:             ${:.2}", proj.total_contributions);
        println!("Total interest earned:           ${:.2}", proj.total_interest);
    }
    Ok(())
}

fn retirement(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let years = years_to_retirement(sub)?;
    let balance = *sub.get_one::<f64>("balance").unwrap();
    let contribution = *sub.get_one::<f64>("contribution").unwrap();
    let rate_pct = *sub.get_one::<f64>("rate").unwrap();
    let inflation_pct = *sub.get_one::<f64>("inflation").unwrap();
    if rate_pct < 0.0 {
        bail!("Annual rate of return cannot be negative");
    }
    if inflation_pct < 0.0 {
        bail!("Inflation rate cannot be negative");
    }

    let proj = project_retirement(balance, contribution, rate_pct, inflation_pct, years);
    if !maybe_print_json(json_flag, jsonl_flag, &proj)? {
        println!(
            "{} years to retirement, {}% inflation",
            proj.years, proj.inflation_rate_pct
        );
        let rows: Vec<Vec<String>> = proj
            .scenarios
            .iter()
            .map(|s| {
                vec![
                    format!("{}%", s.annual_rate_pct),
                    format!("{:.2}", s.nominal_balance),
                    format!("{:.2}", s.real_balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Rate", "Nominal Balance", "Real (today's $)"], rows)
        );
    }
    Ok(())
}
