//! Schema command - describe the stored documents and the CSV export

use crate::core::{MileageTrip, RecurringItem, StoredTransaction, TaxSettings};
use crate::export::ExportRecord;
use clap::{Args, ValueEnum};
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,

    /// Stored document to describe with json-schema
    #[arg(short, long, value_enum, default_value = "transactions")]
    document: Document,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for a stored document
    JsonSchema,
    /// CSV header row of the export
    CsvHeader,
    /// CSV export column descriptions
    CsvFields,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Document {
    Transactions,
    Settings,
    Recurring,
    Trips,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => {
                println!("{}", ExportRecord::csv_header());
                Ok(())
            }
            SchemaFormat::CsvFields => {
                print_csv_fields();
                Ok(())
            }
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = match self.document {
            Document::Transactions => schema_for!(Vec<StoredTransaction>),
            Document::Settings => schema_for!(TaxSettings),
            Document::Recurring => schema_for!(Vec<RecurringItem>),
            Document::Trips => schema_for!(Vec<MileageTrip>),
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}

fn print_csv_fields() {
    println!("CSV Export Format");
    println!("=================");
    println!();
    for column in ExportRecord::csv_columns() {
        let req = if column.required { "required" } else { "optional" };
        println!("{:12} ({:8})  {}", column.name, req, column.description);
    }
    println!();
    println!("Amounts are positive; Type gives the direction of the money.");
}
