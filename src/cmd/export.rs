//! Export and import of transactions as CSV

use super::Context;
use crate::core::NewTransaction;
use crate::export::{read_transactions_csv, write_transactions_csv};
use crate::store;
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// File to write, defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ExportCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let transactions = ctx.transactions()?;
        match &self.output {
            Some(path) => {
                let count = write_transactions_csv(&transactions, BufWriter::new(File::create(path)?))?;
                eprintln!("Exported {} transactions to {}", count, path.display());
            }
            None => {
                write_transactions_csv(&transactions, io::stdout().lock())?;
            }
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ImportCommand {
    /// CSV file in the export format
    input: PathBuf,
}

impl ImportCommand {
    /// Record every row as a new transaction. Rows are validated up front so
    /// a bad file adds nothing.
    pub fn exec(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let records = read_transactions_csv(BufReader::new(File::open(&self.input)?))?;

        let mut new_transactions = Vec::with_capacity(records.len());
        for (i, record) in records.into_iter().enumerate() {
            let new = NewTransaction {
                category: record.category()?,
                amount: record.amount,
                description: record.description,
                date: record.date,
            };
            // Header is line 1
            new.validate()
                .map_err(|e| anyhow::anyhow!("line {}: {}", i + 2, e))?;
            new_transactions.push(new);
        }

        // Oldest first, so the list ends up in file order
        let count = new_transactions.len();
        for (offset, new) in new_transactions.into_iter().rev().enumerate() {
            let created_at = ctx.now + chrono::Duration::nanoseconds(offset as i64);
            store::save_transaction(&mut ctx.store, new, created_at)?;
        }
        println!("Imported {} transactions from {}", count, self.input.display());
        Ok(())
    }
}
