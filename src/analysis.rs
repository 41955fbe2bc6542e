// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Asset, Debt, Document, Expense, Income};

/// Anything carrying an entry date as a raw `YYYY-MM-DD` string.
pub trait Dated {
    fn date(&self) -> &str;
}

impl Dated for Income {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for Expense {
    fn date(&self) -> &str {
        &self.date
    }
}

pub fn parse_entry_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Inclusive on both bounds; a `None` bound is open. An entry whose date
/// does not parse always passes: an ambiguous date must never silently
/// drop a record from a report.
pub fn in_range(date: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    let Some(d) = parse_entry_date(date) else {
        return true;
    };
    if let Some(s) = start {
        if d < s {
            return false;
        }
    }
    if let Some(e) = end {
        if d > e {
            return false;
        }
    }
    true
}

pub fn filter_by_date<'a, T: Dated>(
    items: &'a [T],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|i| in_range(i.date(), start, end))
        .collect()
}

pub fn spend_by_category<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for e in expenses {
        *totals.entry(e.category.clone()).or_insert(Decimal::ZERO) += e.amount;
    }
    totals
}

pub fn income_by_date<'a>(
    income: impl IntoIterator<Item = &'a Income>,
) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for i in income {
        *totals.entry(i.date.clone()).or_insert(Decimal::ZERO) += i.amount;
    }
    totals
}

pub fn expenses_by_date<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for e in expenses {
        *totals.entry(e.date.clone()).or_insert(Decimal::ZERO) += e.amount;
    }
    totals
}

pub fn deductible_total<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Decimal {
    expenses
        .into_iter()
        .filter(|e| e.is_tax_deductible)
        .map(|e| e.amount)
        .sum()
}

/// Snapshot, deliberately unfiltered by date: total asset value minus
/// total outstanding debt.
pub fn net_worth(assets: &[Asset], debts: &[Debt]) -> Decimal {
    let assets: Decimal = assets.iter().map(|a| a.value).sum();
    let debts: Decimal = debts.iter().map(|d| d.current_amount).sum();
    assets - debts
}

// Heuristic vocabulary for entries that repeat but were never flagged.
// The explicit `recurring` flag always wins; this only widens the set.
static RECURRING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(monthly|weekly|biweekly|quarterly|annual|salary|payroll|pension|rent|mortgage|subscription|insurance|utilities)\b",
    )
    .unwrap()
});

pub fn is_recurring_income(entry: &Income) -> bool {
    entry.recurring
        || RECURRING_RE.is_match(&entry.source)
        || entry
            .notes
            .as_deref()
            .is_some_and(|n| RECURRING_RE.is_match(n))
}

pub fn is_recurring_expense(entry: &Expense) -> bool {
    entry.recurring
        || RECURRING_RE.is_match(&entry.category)
        || entry
            .description
            .as_deref()
            .is_some_and(|d| RECURRING_RE.is_match(d))
}

#[derive(Debug, Clone, Serialize)]
pub struct NetWorthProjection {
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub monthly_net: Decimal,
    pub starting_net_worth: Decimal,
    /// Projected net worth at the end of months 1..=12.
    pub balances: Vec<Decimal>,
    /// False when no windowed entry classified as recurring and the
    /// projection fell back to the full trailing-year window.
    pub recurring_only: bool,
}

/// Rolling 12-month linear projection: average the trailing year's
/// (preferably recurring) cash flow into a monthly run rate, then walk
/// the net-worth snapshot forward one month at a time. Not a forecast;
/// no seasonality, no variance.
pub fn project_net_worth(doc: &Document, today: NaiveDate) -> NetWorthProjection {
    let start = today
        .checked_sub_days(Days::new(365))
        .unwrap_or(NaiveDate::MIN);
    let window_income = filter_by_date(&doc.income, Some(start), Some(today));
    let window_expenses = filter_by_date(&doc.expenses, Some(start), Some(today));

    let recurring_income: Vec<&Income> = window_income
        .iter()
        .copied()
        .filter(|i| is_recurring_income(i))
        .collect();
    let recurring_expenses: Vec<&Expense> = window_expenses
        .iter()
        .copied()
        .filter(|e| is_recurring_expense(e))
        .collect();

    // A store with no recurring entries at all still gets a projection
    // from whatever the trailing year holds.
    let recurring_only = !(recurring_income.is_empty() && recurring_expenses.is_empty());
    let (income_set, expense_set) = if recurring_only {
        (recurring_income, recurring_expenses)
    } else {
        (window_income, window_expenses)
    };

    let months = Decimal::from(12);
    let monthly_income = income_set.iter().map(|i| i.amount).sum::<Decimal>() / months;
    let monthly_expenses = expense_set.iter().map(|e| e.amount).sum::<Decimal>() / months;
    let monthly_net = monthly_income - monthly_expenses;

    let starting_net_worth = net_worth(&doc.assets, &doc.debts);
    let mut balances = Vec::with_capacity(12);
    let mut balance = starting_net_worth;
    for _ in 0..12 {
        balance += monthly_net;
        balances.push(balance);
    }

    NetWorthProjection {
        monthly_income,
        monthly_expenses,
        monthly_net,
        starting_net_worth,
        balances,
        recurring_only,
    }
}
