//! Report command - totals and category breakdowns for the current period

use super::{print_json, table, Context};
use crate::core::report::CategoryShare;
use crate::core::{display_gbp, period_report, Period, TransactionKind};
use clap::{Args, ValueEnum};
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// Period ending today to report on
    #[arg(short, long, value_enum, default_value = "month")]
    period: PeriodArg,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Month,
    Quarter,
    Year,
}

impl From<PeriodArg> for Period {
    fn from(period: PeriodArg) -> Self {
        match period {
            PeriodArg::Month => Period::Month,
            PeriodArg::Quarter => Period::Quarter,
            PeriodArg::Year => Period::Year,
        }
    }
}

impl ReportCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let transactions = ctx.transactions()?;
        let report = period_report(&transactions, self.period.into(), ctx.today);

        if self.json {
            return print_json(&report);
        }

        println!();
        println!(
            "REPORT - {} (from {}, {} transactions)",
            report.period.display(),
            report.start_date,
            report.transaction_count
        );
        println!();
        println!(
            "  Income: {} | Expenses: {} | Net: {}",
            display_gbp(report.income),
            display_gbp(report.expenses),
            display_gbp(report.net)
        );
        println!("  Average income per transaction: {}", display_gbp(report.daily_average));
        println!();

        if !report.income_sources.is_empty() {
            println!("INCOME SOURCES");
            println!("{}", table(report.income_sources.iter().map(ShareRow::from)));
            println!();
        }
        if !report.expense_breakdown.is_empty() {
            println!("EXPENSES");
            println!("{}", table(report.expense_breakdown.iter().map(ShareRow::from)));
            println!();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Deductible")]
    deductible: String,
}

impl From<&CategoryShare> for ShareRow {
    fn from(share: &CategoryShare) -> Self {
        let deductible = match share.category.kind() {
            TransactionKind::Income => "-",
            TransactionKind::Expense if share.category.is_deductible() => "yes",
            TransactionKind::Expense => "no",
        };
        ShareRow {
            category: share.category.name().to_string(),
            amount: display_gbp(share.amount),
            share: format!("{}%", share.percentage),
            deductible: deductible.to_string(),
        }
    }
}
