//! CSV export of transactions
//!
//! Columns are `Date,Type,Category,Description,Amount`. Fields containing
//! commas or quotes are quoted by the CSV writer.

use crate::core::{Category, Transaction, TransactionError, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::{Read, Write};
use std::str::FromStr;
use tradetax_derive::CsvSchema;

/// Column description generated by `#[derive(CsvSchema)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvColumn {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// One exported row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, CsvSchema)]
pub struct ExportRecord {
    /// Date the transaction is attributed to (YYYY-MM-DD)
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// income or expense
    #[serde(rename = "Type")]
    pub kind: TransactionKind,
    /// Category id, e.g. client, sale, materials, travel
    #[serde(rename = "Category")]
    pub category: String,
    /// Free text description
    #[serde(rename = "Description")]
    pub description: Option<String>,
    /// Amount in pounds
    #[serde(rename = "Amount", deserialize_with = "decimal_text")]
    pub amount: Decimal,
}

impl From<&Transaction> for ExportRecord {
    fn from(tx: &Transaction) -> Self {
        ExportRecord {
            date: tx.date,
            kind: tx.kind(),
            category: tx.category.id().to_string(),
            description: tx.description.clone(),
            amount: tx.amount,
        }
    }
}

impl ExportRecord {
    pub fn category(&self) -> Result<Category, TransactionError> {
        Category::parse(self.kind, &self.category)
    }
}

/// Parse the field text directly so the written scale survives (`12.50` stays `12.50`)
fn decimal_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let text = String::deserialize(deserializer)?;
    Decimal::from_str(text.trim()).map_err(serde::de::Error::custom)
}

/// Write transactions as CSV in the order given
pub fn write_transactions_csv<'a, I, W>(transactions: I, writer: W) -> anyhow::Result<usize>
where
    I: IntoIterator<Item = &'a Transaction>,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    let mut count = 0;
    for tx in transactions {
        wtr.serialize(ExportRecord::from(tx))?;
        count += 1;
    }
    if count == 0 {
        // serialize() writes the header with the first row only
        wtr.write_record(ExportRecord::csv_columns().iter().map(|c| c.name))?;
    }
    wtr.flush()?;
    log::info!("Exported {} transactions", count);
    Ok(count)
}

/// Parse a previously exported CSV
pub fn read_transactions_csv<R: Read>(reader: R) -> anyhow::Result<Vec<ExportRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: ExportRecord = result?;
        records.push(record);
    }
    Ok(records)
}
