//! Forecast command and recurring item management

use super::{print_json, table, Context, KindArg};
use crate::core::{
    display_gbp, forecast, parse_amount, Frequency, RecurringItem, TransactionKind,
    DEFAULT_HORIZON_MONTHS, MAX_HORIZON_MONTHS,
};
use crate::store;
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct ForecastCommand {
    /// Number of months to project, starting with the current month
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_HORIZON_MONTHS,
        value_parser = clap::value_parser!(u32).range(1..=MAX_HORIZON_MONTHS as i64)
    )]
    months: u32,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct ForecastRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expense: String,
    #[tabled(rename = "Net")]
    net: String,
}

impl ForecastCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let transactions = ctx.transactions()?;
        let recurring = store::get_recurring_items(&ctx.store)?;
        let result = forecast(&transactions, &recurring, self.months, ctx.today);

        if self.json {
            return print_json(&result);
        }

        println!();
        println!(
            "CASH FLOW FORECAST ({} months from {})",
            self.months,
            ctx.today.format("%b %Y")
        );
        println!();
        println!(
            "  Monthly averages: income {} | expenses {} (over {} months)",
            display_gbp(result.averages.income),
            display_gbp(result.averages.expense),
            result.averages.months
        );
        println!();

        if !result.points.is_empty() {
            let rows = result.points.iter().map(|p| ForecastRow {
                month: p.month.label(),
                income: display_gbp(p.income),
                expense: display_gbp(p.expense),
                net: display_gbp(p.net),
            });
            println!("{}", table(rows));
            println!();
        }

        let eoy = &result.end_of_year;
        println!("YEAR TO DATE");
        println!(
            "  Income: {} | Expenses: {} | Net: {}",
            display_gbp(result.year_to_date.income),
            display_gbp(result.year_to_date.expense),
            display_gbp(result.year_to_date.net)
        );
        println!();
        println!("ANNUAL PROJECTION ({} months remaining)", eoy.months_remaining);
        println!(
            "  Income: {} | Expenses: {} | Net: {}",
            display_gbp(eoy.projected_income),
            display_gbp(eoy.projected_expense),
            display_gbp(eoy.projected_net)
        );
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RecurringCommand {
    #[command(subcommand)]
    command: RecurringSubcommand,
}

#[derive(Subcommand, Debug)]
enum RecurringSubcommand {
    /// Add a recurring income or expense
    Add {
        #[arg(value_enum)]
        kind: KindArg,
        #[arg(short, long)]
        description: String,
        #[arg(short, long)]
        amount: String,
        #[arg(short, long, value_enum, default_value = "monthly")]
        frequency: FrequencyArg,
        /// First occurrence, defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// List recurring items
    List {
        #[arg(long)]
        json: bool,
    },
    /// Remove a recurring item
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FrequencyArg {
    Weekly,
    Monthly,
    Quarterly,
    Annually,
}

impl From<FrequencyArg> for Frequency {
    fn from(frequency: FrequencyArg) -> Self {
        match frequency {
            FrequencyArg::Weekly => Frequency::Weekly,
            FrequencyArg::Monthly => Frequency::Monthly,
            FrequencyArg::Quarterly => Frequency::Quarterly,
            FrequencyArg::Annually => Frequency::Annually,
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct RecurringRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Starts")]
    start_date: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&RecurringItem> for RecurringRow {
    fn from(item: &RecurringItem) -> Self {
        RecurringRow {
            id: item.id.clone(),
            kind: item.kind.to_string(),
            description: item.description.clone(),
            frequency: format!("{:?}", item.frequency).to_lowercase(),
            start_date: item.start_date.to_string(),
            amount: display_gbp(item.amount),
        }
    }
}

impl RecurringCommand {
    pub fn exec(&self, ctx: &mut Context) -> anyhow::Result<()> {
        match &self.command {
            RecurringSubcommand::Add {
                kind,
                description,
                amount,
                frequency,
                start,
            } => {
                let item = store::add_recurring_item(
                    &mut ctx.store,
                    TransactionKind::from(*kind),
                    description.clone(),
                    parse_amount(amount),
                    (*frequency).into(),
                    start.unwrap_or(ctx.today),
                    ctx.now,
                )?;
                println!(
                    "Added recurring {} '{}' of {} [{}]",
                    item.kind,
                    item.description,
                    display_gbp(item.amount),
                    item.id
                );
                if item.frequency != Frequency::Monthly {
                    println!("Note: only monthly items are included in the forecast");
                }
                Ok(())
            }
            RecurringSubcommand::List { json } => {
                let items = store::get_recurring_items(&ctx.store)?;
                if *json {
                    return print_json(&items);
                }
                if items.is_empty() {
                    println!("No recurring items");
                } else {
                    println!("{}", table(items.iter().map(RecurringRow::from)));
                }
                Ok(())
            }
            RecurringSubcommand::Delete { id } => {
                if !store::delete_recurring_item(&mut ctx.store, id)? {
                    anyhow::bail!("No recurring item with id {id}");
                }
                println!("Deleted {id}");
                Ok(())
            }
        }
    }
}
