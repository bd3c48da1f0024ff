//! Summary command - headline totals and the monthly amount to set aside

use super::{print_json, Context};
use crate::core::period::months_remaining_in_year;
use crate::core::{display_gbp, summarize};
use crate::store;
use clap::Args;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl SummaryCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let transactions = ctx.transactions()?;
        let settings = store::get_tax_settings(&ctx.store)?;
        let summary = summarize(&transactions, &settings, ctx.today);

        if self.json {
            return print_json(&summary);
        }

        println!();
        println!("SUMMARY (as of {})", ctx.today);
        println!();
        println!("  Income:        {}", display_gbp(summary.total_income));
        println!("  Expenses:      {}", display_gbp(summary.total_expenses));
        println!("  Net profit:    {}", display_gbp(summary.net_profit));
        println!();
        println!("  Estimated tax: {}", display_gbp(summary.estimated_tax));
        println!(
            "  Set aside:     {} per month ({} months left this year)",
            display_gbp(summary.set_aside_per_month),
            months_remaining_in_year(ctx.today)
        );
        println!();
        Ok(())
    }
}
