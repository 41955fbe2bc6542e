// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Date fields are raw `YYYY-MM-DD` strings. The store never validates
/// them; the CLI does, and the report filters tolerate anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub date: String,
    pub source: String,
    pub amount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub recurring: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_tax_deductible: bool,
    #[serde(default)]
    pub recurring: bool,
    /// Paths of copied receipt files. Only attach/detach touch this.
    #[serde(default)]
    pub receipts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    pub name: String,
    pub r#type: String,
    pub original_amount: Decimal,
    pub current_amount: Decimal,
    pub interest_rate: Decimal,
    pub minimum_payment: Decimal,
    pub due_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub r#type: String,
    pub value: Decimal,
    pub date_updated: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    /// Weak reference to an [`Asset`]; never enforced.
    #[serde(default)]
    pub asset_id: Option<i64>,
    pub name: String,
    pub r#type: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub current_price: Decimal,
    pub date_purchased: String,
    pub last_updated: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The persisted state: five independent collections, one JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub income: Vec<Income>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub investments: Vec<Investment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Income,
    Expenses,
    Debts,
    Assets,
    Investments,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expenses => "expenses",
            RecordKind::Debts => "debts",
            RecordKind::Assets => "assets",
            RecordKind::Investments => "investments",
        }
    }

    pub fn parse(s: &str) -> Option<RecordKind> {
        match s {
            "income" => Some(RecordKind::Income),
            "expenses" => Some(RecordKind::Expenses),
            "debts" => Some(RecordKind::Debts),
            "assets" => Some(RecordKind::Assets),
            "investments" => Some(RecordKind::Investments),
            _ => None,
        }
    }
}

// Partial updates. `None` leaves the stored field untouched; a patch of
// all `None`s is a valid no-op.

#[derive(Debug, Clone, Default)]
pub struct IncomePatch {
    pub date: Option<String>,
    pub source: Option<String>,
    pub amount: Option<Decimal>,
    pub notes: Option<String>,
    pub recurring: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub is_tax_deductible: Option<bool>,
    pub recurring: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct DebtPatch {
    pub name: Option<String>,
    pub r#type: Option<String>,
    pub original_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub interest_rate: Option<Decimal>,
    pub minimum_payment: Option<Decimal>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AssetPatch {
    pub name: Option<String>,
    pub r#type: Option<String>,
    pub value: Option<Decimal>,
    pub date_updated: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InvestmentPatch {
    pub asset_id: Option<i64>,
    pub name: Option<String>,
    pub r#type: Option<String>,
    pub quantity: Option<Decimal>,
    pub purchase_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub date_purchased: Option<String>,
    pub last_updated: Option<String>,
    pub notes: Option<String>,
}
