//! Tax command - income tax liability for an annual figure

use super::{parse_bounded_amount, print_json, table, Context};
use crate::core::{compute_liability, display_gbp, TaxBand, TaxSettings};
use crate::store;
use clap::Args;
use rust_decimal_macros::dec;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct TaxCommand {
    /// Annual income (or profit) in pounds
    #[arg(short, long)]
    income: String,

    /// JSON file of tax settings to use instead of the stored ones
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    band: &'static str,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl TaxCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let settings = match &self.settings {
            Some(path) => TaxSettings::read_json(BufReader::new(File::open(path)?))?,
            None => store::get_tax_settings(&ctx.store)?,
        };
        let income = parse_bounded_amount(&self.income)?;
        let result = compute_liability(income, &settings);

        if self.json {
            return print_json(&result);
        }

        println!();
        println!("INCOME TAX on {}", display_gbp(income));
        println!();
        println!("  Personal allowance: {}", display_gbp(result.personal_allowance));
        println!("  Taxable income:     {}", display_gbp(result.taxable_income));
        println!();

        let rows = TaxBand::ALL.iter().map(|&band| BandRow {
            band: band.name(),
            rate: format!("{}%", (settings.rate(band) * dec!(100)).normalize()),
            tax: display_gbp(result.breakdown.get(band)),
        });
        println!("{}", table(rows));
        println!();
        println!(
            "TOTAL TAX: {} (effective rate {}%)",
            display_gbp(result.total_tax),
            result.effective_rate
        );
        println!("Set aside: {}", display_gbp(result.set_aside_amount));
        println!();
        Ok(())
    }
}
