// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{
    Asset, AssetPatch, Debt, DebtPatch, Document, Expense, ExpensePatch, Income, IncomePatch,
    Investment, InvestmentPatch, RecordKind,
};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("io.tmtlabs", "MoneyMind", "moneymind"));

pub fn data_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moneymind.json"))
}

/// Owns the five record collections and the JSON file backing them.
///
/// Every successful mutation rewrites the whole file. Disk failures are
/// reported on stderr and swallowed; the in-memory state stays
/// authoritative and the next successful save catches the file up.
/// Domain failures (unknown id, failed attach) are `bool` returns, not
/// errors. Single-process, single-user: no locking, last writer wins.
pub struct Store {
    path: PathBuf,
    doc: Document,
}

impl Store {
    pub fn open_or_init() -> Result<Store> {
        Ok(Store::open_at(data_path()?))
    }

    /// Load the document at `path`. A missing file is created empty on
    /// the spot; an unreadable or corrupt one is left on disk as-is and
    /// the store starts empty in memory.
    pub fn open_at(path: impl Into<PathBuf>) -> Store {
        let path = path.into();
        match fs::read_to_string(&path) {
            Ok(text) => {
                let doc = match serde_json::from_str(&text) {
                    Ok(doc) => doc,
                    Err(e) => {
                        eprintln!(
                            "Could not parse {}: {}. Starting with empty data.",
                            path.display(),
                            e
                        );
                        Document::default()
                    }
                };
                Store { path, doc }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let store = Store {
                    path,
                    doc: Document::default(),
                };
                // Establish the file on first run.
                store.save();
                store
            }
            Err(e) => {
                eprintln!(
                    "Could not read {}: {}. Starting with empty data.",
                    path.display(),
                    e
                );
                Store {
                    path,
                    doc: Document::default(),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn income(&self) -> &[Income] {
        &self.doc.income
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.doc.expenses
    }

    pub fn debts(&self) -> &[Debt] {
        &self.doc.debts
    }

    pub fn assets(&self) -> &[Asset] {
        &self.doc.assets
    }

    pub fn investments(&self) -> &[Investment] {
        &self.doc.investments
    }

    /// Whole-document overwrite, pretty-printed. Best effort: a failed
    /// write is reported and the store keeps operating in memory.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            eprintln!("Failed to save {}: {}", self.path.display(), e);
        }
    }

    fn try_save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.doc)?;
        fs::write(&self.path, text)
            .with_context(|| format!("Write {}", self.path.display()))?;
        Ok(())
    }

    pub fn add_income(&mut self, mut entry: Income) -> i64 {
        entry.id = next_id(self.doc.income.iter().map(|e| e.id));
        let id = entry.id;
        self.doc.income.push(entry);
        self.save();
        id
    }

    pub fn add_expense(&mut self, mut entry: Expense) -> i64 {
        entry.id = next_id(self.doc.expenses.iter().map(|e| e.id));
        entry.receipts = Vec::new();
        let id = entry.id;
        self.doc.expenses.push(entry);
        self.save();
        id
    }

    pub fn add_debt(&mut self, mut entry: Debt) -> i64 {
        entry.id = next_id(self.doc.debts.iter().map(|e| e.id));
        let id = entry.id;
        self.doc.debts.push(entry);
        self.save();
        id
    }

    pub fn add_asset(&mut self, mut entry: Asset) -> i64 {
        entry.id = next_id(self.doc.assets.iter().map(|e| e.id));
        let id = entry.id;
        self.doc.assets.push(entry);
        self.save();
        id
    }

    pub fn add_investment(&mut self, mut entry: Investment) -> i64 {
        entry.id = next_id(self.doc.investments.iter().map(|e| e.id));
        let id = entry.id;
        self.doc.investments.push(entry);
        self.save();
        id
    }

    pub fn update_income(&mut self, id: i64, patch: IncomePatch) -> bool {
        let Some(entry) = self.doc.income.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some(date) = patch.date {
            entry.date = date;
        }
        if let Some(source) = patch.source {
            entry.source = source;
        }
        if let Some(amount) = patch.amount {
            entry.amount = amount;
        }
        if let Some(notes) = patch.notes {
            entry.notes = Some(notes);
        }
        if let Some(recurring) = patch.recurring {
            entry.recurring = recurring;
        }
        self.save();
        true
    }

    pub fn update_expense(&mut self, id: i64, patch: ExpensePatch) -> bool {
        let Some(entry) = self.doc.expenses.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some(date) = patch.date {
            entry.date = date;
        }
        if let Some(category) = patch.category {
            entry.category = category;
        }
        if let Some(amount) = patch.amount {
            entry.amount = amount;
        }
        if let Some(description) = patch.description {
            entry.description = Some(description);
        }
        if let Some(deductible) = patch.is_tax_deductible {
            entry.is_tax_deductible = deductible;
        }
        if let Some(recurring) = patch.recurring {
            entry.recurring = recurring;
        }
        self.save();
        true
    }

    pub fn update_debt(&mut self, id: i64, patch: DebtPatch) -> bool {
        let Some(entry) = self.doc.debts.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(kind) = patch.r#type {
            entry.r#type = kind;
        }
        if let Some(original) = patch.original_amount {
            entry.original_amount = original;
        }
        if let Some(current) = patch.current_amount {
            entry.current_amount = current;
        }
        if let Some(rate) = patch.interest_rate {
            entry.interest_rate = rate;
        }
        if let Some(minimum) = patch.minimum_payment {
            entry.minimum_payment = minimum;
        }
        if let Some(due) = patch.due_date {
            entry.due_date = due;
        }
        if let Some(notes) = patch.notes {
            entry.notes = Some(notes);
        }
        self.save();
        true
    }

    pub fn update_asset(&mut self, id: i64, patch: AssetPatch) -> bool {
        let Some(entry) = self.doc.assets.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(kind) = patch.r#type {
            entry.r#type = kind;
        }
        if let Some(value) = patch.value {
            entry.value = value;
        }
        if let Some(date) = patch.date_updated {
            entry.date_updated = date;
        }
        if let Some(notes) = patch.notes {
            entry.notes = Some(notes);
        }
        self.save();
        true
    }

    pub fn update_investment(&mut self, id: i64, patch: InvestmentPatch) -> bool {
        let Some(entry) = self.doc.investments.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some(asset_id) = patch.asset_id {
            entry.asset_id = Some(asset_id);
        }
        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(kind) = patch.r#type {
            entry.r#type = kind;
        }
        if let Some(quantity) = patch.quantity {
            entry.quantity = quantity;
        }
        if let Some(price) = patch.purchase_price {
            entry.purchase_price = price;
        }
        if let Some(price) = patch.current_price {
            entry.current_price = price;
        }
        if let Some(date) = patch.date_purchased {
            entry.date_purchased = date;
        }
        if let Some(date) = patch.last_updated {
            entry.last_updated = date;
        }
        if let Some(notes) = patch.notes {
            entry.notes = Some(notes);
        }
        self.save();
        true
    }

    /// Remove one record by id. Persists only when something was removed.
    pub fn delete(&mut self, kind: RecordKind, id: i64) -> bool {
        let removed = match kind {
            RecordKind::Income => remove_by_id(&mut self.doc.income, id, |e| e.id),
            RecordKind::Expenses => remove_by_id(&mut self.doc.expenses, id, |e| e.id),
            RecordKind::Debts => remove_by_id(&mut self.doc.debts, id, |e| e.id),
            RecordKind::Assets => remove_by_id(&mut self.doc.assets, id, |e| e.id),
            RecordKind::Investments => remove_by_id(&mut self.doc.investments, id, |e| e.id),
        };
        if removed {
            self.save();
        }
        removed
    }

    /// Copy `source` into the receipts directory next to the data file
    /// and record the copy on the expense. The copy is not rolled back
    /// when the expense turns out not to exist; the file stays in
    /// `receipts/` unreferenced.
    pub fn attach_receipt(&mut self, expense_id: i64, source: &Path) -> bool {
        let receipts_dir = match self.path.parent() {
            Some(dir) => dir.join("receipts"),
            None => PathBuf::from("receipts"),
        };
        if let Err(e) = fs::create_dir_all(&receipts_dir) {
            eprintln!(
                "Failed to create receipts dir {}: {}",
                receipts_dir.display(),
                e
            );
            return false;
        }

        let base = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "receipt".to_string());
        // Millisecond prefix keeps repeated basenames from colliding.
        let dest = receipts_dir.join(format!("{}_{}", crate::utils::epoch_millis(), base));
        if let Err(e) = fs::copy(source, &dest) {
            eprintln!("Failed to copy receipt {}: {}", source.display(), e);
            return false;
        }

        let Some(entry) = self.doc.expenses.iter_mut().find(|e| e.id == expense_id) else {
            return false;
        };
        entry.receipts.push(dest.to_string_lossy().into_owned());
        self.save();
        true
    }

    /// Drop a receipt path from an expense. With `delete_file` the file
    /// itself is unlinked best-effort; a failed unlink never blocks the
    /// detach.
    pub fn detach_receipt(&mut self, expense_id: i64, receipt_path: &str, delete_file: bool) -> bool {
        let Some(entry) = self.doc.expenses.iter_mut().find(|e| e.id == expense_id) else {
            return false;
        };
        let before = entry.receipts.len();
        entry.receipts.retain(|p| p != receipt_path);
        if entry.receipts.len() == before {
            return false;
        }
        if delete_file {
            let _ = fs::remove_file(receipt_path);
        }
        self.save();
        true
    }

    pub fn receipts_for_expense(&self, expense_id: i64) -> &[String] {
        self.doc
            .expenses
            .iter()
            .find(|e| e.id == expense_id)
            .map(|e| e.receipts.as_slice())
            .unwrap_or(&[])
    }
}

/// Ids count up from the historical maximum and are never reused, so a
/// collection can have gaps after deletes.
fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |m| m + 1)
}

fn remove_by_id<T>(items: &mut Vec<T>, id: i64, key: impl Fn(&T) -> i64) -> bool {
    let before = items.len();
    items.retain(|e| key(e) != id);
    items.len() < before
}
