pub mod export;
pub mod forecast;
pub mod invoice;
pub mod mileage;
pub mod report;
pub mod schema;
pub mod settings;
pub mod summary;
pub mod tax;
pub mod transactions;
pub mod vat;

use crate::core::{display_gbp, parse_amount, Category, Transaction, TransactionKind, MAX_AMOUNT};
use crate::store::{self, FileStore};
use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// State shared by every command: the data store and the clock
pub struct Context {
    pub store: FileStore,
    /// Reference date for period, set-aside and forecast calculations
    pub today: NaiveDate,
    /// Creation timestamp for new records
    pub now: DateTime<Utc>,
}

impl Context {
    pub fn transactions(&self) -> anyhow::Result<Vec<Transaction>> {
        Ok(store::get_transactions(&self.store)?)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

/// Look up a category id, listing the valid ids for the kind on failure
pub fn parse_category(kind: TransactionKind, id: &str) -> anyhow::Result<Category> {
    Category::parse(kind, id).map_err(|e| {
        let valid: Vec<_> = Category::all(kind).iter().map(|c| c.id()).collect();
        anyhow::anyhow!("{e} (expected one of: {})", valid.join(", "))
    })
}

/// Lenient calculator input that refuses figures above `MAX_AMOUNT`
pub fn parse_bounded_amount(input: &str) -> anyhow::Result<Decimal> {
    let amount = parse_amount(input);
    if amount.abs() > MAX_AMOUNT {
        anyhow::bail!(
            "{} is above the limit of {}",
            input.trim(),
            display_gbp(MAX_AMOUNT)
        );
    }
    Ok(amount)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Rounded table with right-aligned body cells
pub fn table<I, T>(rows: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Tabled,
{
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}
