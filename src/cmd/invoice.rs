//! Invoice command - line items with VAT totals

use super::{print_json, table, Context};
use crate::core::{display_gbp, invoice_totals, validate_items, InvoiceItem, InvoiceTotals};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct InvoiceCommand {
    /// Client the invoice is addressed to
    #[arg(short, long)]
    client: String,

    /// Invoice number, e.g. INV-001
    #[arg(short, long)]
    number: Option<String>,

    /// Line item as DESCRIPTION:QUANTITY:RATE; repeat for more lines
    #[arg(short, long = "item", required = true)]
    items: Vec<InvoiceItem>,

    #[arg(long)]
    notes: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Invoice<'a> {
    number: Option<&'a str>,
    client: &'a str,
    date: chrono::NaiveDate,
    items: &'a [InvoiceItem],
    notes: Option<&'a str>,
    #[serde(flatten)]
    totals: InvoiceTotals,
}

#[derive(Debug, Clone, Tabled)]
struct LineRow {
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl InvoiceCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        if self.client.trim().is_empty() {
            anyhow::bail!("An invoice needs a client name");
        }
        validate_items(&self.items)?;

        let invoice = Invoice {
            number: self.number.as_deref(),
            client: self.client.trim(),
            date: ctx.today,
            items: &self.items,
            notes: self.notes.as_deref(),
            totals: invoice_totals(&self.items),
        };

        if self.json {
            return print_json(&invoice);
        }

        println!();
        match invoice.number {
            Some(number) => println!("INVOICE {number}"),
            None => println!("INVOICE"),
        }
        println!("  To:   {}", invoice.client);
        println!("  Date: {}", invoice.date);
        println!();

        let rows = invoice.items.iter().map(|item| LineRow {
            description: item.description.clone(),
            quantity: item.quantity.normalize().to_string(),
            rate: display_gbp(item.rate),
            amount: display_gbp(item.line_total()),
        });
        println!("{}", table(rows));
        println!();
        println!("  Subtotal:  {}", display_gbp(invoice.totals.subtotal));
        println!("  VAT (20%): {}", display_gbp(invoice.totals.vat));
        println!("  Total:     {}", display_gbp(invoice.totals.total));
        if let Some(notes) = invoice.notes {
            println!();
            println!("  {notes}");
        }
        println!();
        Ok(())
    }
}
