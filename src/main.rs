mod cmd;
mod core;
mod export;
mod store;

use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use cmd::{
    export::{ExportCommand, ImportCommand},
    forecast::{ForecastCommand, RecurringCommand},
    invoice::InvoiceCommand,
    mileage::MileageCommand,
    report::ReportCommand,
    schema::SchemaCommand,
    settings::SettingsCommand,
    summary::SummaryCommand,
    tax::TaxCommand,
    transactions::{
        AddCommand, CategoriesCommand, ClearCommand, DeleteCommand, ListCommand, UpdateCommand,
    },
    vat::VatCommand,
    Context,
};
use std::path::PathBuf;
use store::FileStore;

#[derive(Parser, Debug)]
#[command(name = "tradetax", version, about = "UK sole trader tax, VAT, mileage and cash-flow calculator")]
struct Opts {
    /// Directory holding the data files
    #[arg(long, global = true, env = "TRADETAX_DATA_DIR", default_value = ".tradetax")]
    data_dir: PathBuf,

    /// Reference date for calculations (YYYY-MM-DD), defaults to today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record an income or expense transaction
    Add(AddCommand),
    /// List transactions, newest first
    List(ListCommand),
    /// Change fields of a transaction
    Update(UpdateCommand),
    /// Delete a transaction
    Delete(DeleteCommand),
    /// List the income and expense categories
    Categories(CategoriesCommand),
    /// Totals, estimated tax and the monthly set-aside
    Summary(SummaryCommand),
    /// Totals and category breakdowns for this month, quarter or year
    Report(ReportCommand),
    /// Income tax liability for an annual income
    Tax(TaxCommand),
    /// Project cash flow over the coming months
    Forecast(ForecastCommand),
    /// Manage recurring income and expenses
    Recurring(RecurringCommand),
    /// Compare the standard and flat-rate VAT schemes
    Vat(VatCommand),
    /// Record business mileage and total the deduction
    Mileage(MileageCommand),
    /// Total an invoice with VAT
    Invoice(InvoiceCommand),
    /// Show or change tax settings
    Settings(SettingsCommand),
    /// Export transactions as CSV
    Export(ExportCommand),
    /// Record transactions from a CSV in the export format
    Import(ImportCommand),
    /// Print the stored document schemas or the CSV export format
    Schema(SchemaCommand),
    /// Remove all transactions and tax settings
    Clear(ClearCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let mut ctx = Context {
        store: FileStore::new(&opts.data_dir),
        today: opts.today.unwrap_or_else(|| Local::now().date_naive()),
        now: Utc::now(),
    };
    log::debug!("Using data in {} as of {}", ctx.store.dir().display(), ctx.today);

    match opts.command {
        Command::Add(add) => add.exec(&mut ctx),
        Command::List(list) => list.exec(&ctx),
        Command::Update(update) => update.exec(&mut ctx),
        Command::Delete(delete) => delete.exec(&mut ctx),
        Command::Categories(categories) => categories.exec(),
        Command::Summary(summary) => summary.exec(&ctx),
        Command::Report(report) => report.exec(&ctx),
        Command::Tax(tax) => tax.exec(&ctx),
        Command::Forecast(forecast) => forecast.exec(&ctx),
        Command::Recurring(recurring) => recurring.exec(&mut ctx),
        Command::Vat(vat) => vat.exec(),
        Command::Mileage(mileage) => mileage.exec(&mut ctx),
        Command::Invoice(invoice) => invoice.exec(&ctx),
        Command::Settings(settings) => settings.exec(&mut ctx),
        Command::Export(export) => export.exec(&ctx),
        Command::Import(import) => import.exec(&mut ctx),
        Command::Schema(schema) => schema.exec(),
        Command::Clear(clear) => clear.exec(&mut ctx),
    }
}
