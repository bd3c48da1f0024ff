//! Transaction commands - add, list, update, delete, clear and category listing

use super::{parse_category, print_json, table, Context, KindArg};
use crate::core::{
    display_gbp, parse_amount, Category, NewTransaction, Transaction, TransactionKind, TransactionUpdate,
};
use crate::store;
use chrono::NaiveDate;
use clap::Args;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct AddCommand {
    /// Whether money came in or went out
    #[arg(value_enum)]
    kind: KindArg,

    /// Amount in pounds, e.g. 250 or 1,200.50
    #[arg(short, long)]
    amount: String,

    /// Category id (e.g. client, sale, materials, travel)
    #[arg(short, long)]
    category: String,

    #[arg(short, long)]
    description: Option<String>,

    /// Transaction date, defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl AddCommand {
    pub fn exec(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let kind = TransactionKind::from(self.kind);
        let new = NewTransaction {
            category: parse_category(kind, &self.category)?,
            amount: parse_amount(&self.amount),
            description: self.description.clone(),
            date: self.date.unwrap_or(ctx.today),
        };
        let transaction = store::save_transaction(&mut ctx.store, new, ctx.now)?;
        println!(
            "Added {} of {} ({}) on {} [{}]",
            transaction.kind(),
            display_gbp(transaction.amount),
            transaction.category.name(),
            transaction.date,
            transaction.id
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Only show one kind of transaction
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,

    /// Output as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl ListCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let kind = self.kind.map(TransactionKind::from);
        let transactions: Vec<Transaction> = ctx
            .transactions()?
            .into_iter()
            .filter(|t| kind.is_none_or(|k| t.kind() == k))
            .collect();

        if self.json {
            return print_json(&transactions);
        }
        if transactions.is_empty() {
            println!("No transactions recorded");
            return Ok(());
        }
        println!("{}", table(transactions.iter().map(TransactionRow::from)));
        Ok(())
    }
}

#[derive(Debug, Clone, Tabled)]
struct TransactionRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        let amount = match t.kind() {
            TransactionKind::Income => display_gbp(t.amount),
            TransactionKind::Expense => display_gbp(-t.amount),
        };
        TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            kind: t.kind().to_string(),
            category: t.category.name().to_string(),
            description: t.description.clone().unwrap_or_default(),
            amount,
        }
    }
}

#[derive(Args, Debug)]
pub struct UpdateCommand {
    /// Id of the transaction to change
    id: String,

    #[arg(short, long)]
    amount: Option<String>,

    /// New category id; must belong to the transaction's kind
    #[arg(short, long)]
    category: Option<String>,

    /// New description; an empty string clears it
    #[arg(short, long)]
    description: Option<String>,

    #[arg(long)]
    date: Option<NaiveDate>,
}

impl UpdateCommand {
    pub fn exec(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let existing = ctx
            .transactions()?
            .into_iter()
            .find(|t| t.id == self.id)
            .ok_or_else(|| anyhow::anyhow!("No transaction with id {}", self.id))?;

        let update = TransactionUpdate {
            category: self
                .category
                .as_deref()
                .map(|id| parse_category(existing.kind(), id))
                .transpose()?,
            amount: self.amount.as_deref().map(parse_amount),
            description: self.description.clone(),
            date: self.date,
        };

        match store::update_transaction(&mut ctx.store, &self.id, update)? {
            Some(t) => {
                println!(
                    "Updated {}: {} {} ({}) on {}",
                    t.id,
                    t.kind(),
                    display_gbp(t.amount),
                    t.category.name(),
                    t.date
                );
                Ok(())
            }
            None => anyhow::bail!("No transaction with id {}", self.id),
        }
    }
}

#[derive(Args, Debug)]
pub struct DeleteCommand {
    /// Id of the transaction to remove
    id: String,
}

impl DeleteCommand {
    pub fn exec(&self, ctx: &mut Context) -> anyhow::Result<()> {
        if !store::delete_transaction(&mut ctx.store, &self.id)? {
            anyhow::bail!("No transaction with id {}", self.id);
        }
        println!("Deleted {}", self.id);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ClearCommand {
    /// Confirm removal of all transactions and tax settings
    #[arg(long)]
    yes: bool,
}

impl ClearCommand {
    pub fn exec(&self, ctx: &mut Context) -> anyhow::Result<()> {
        if !self.yes {
            anyhow::bail!("This removes all transactions and tax settings; pass --yes to confirm");
        }
        store::clear_all_data(&mut ctx.store)?;
        println!("Cleared all transactions and tax settings");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct CategoriesCommand {
    /// Only show categories for one kind
    #[arg(value_enum)]
    kind: Option<KindArg>,
}

#[derive(Debug, Clone, Tabled)]
struct CategoryRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Id")]
    id: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Icon")]
    icon: &'static str,
    #[tabled(rename = "Deductible")]
    deductible: &'static str,
}

impl CategoriesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let kinds = match self.kind {
            Some(kind) => vec![TransactionKind::from(kind)],
            None => vec![TransactionKind::Income, TransactionKind::Expense],
        };
        let rows = kinds.into_iter().flat_map(Category::all).map(|c| CategoryRow {
            kind: c.kind().to_string(),
            id: c.id(),
            name: c.name(),
            icon: c.icon(),
            deductible: match c.kind() {
                TransactionKind::Income => "-",
                TransactionKind::Expense if c.is_deductible() => "yes",
                TransactionKind::Expense => "no",
            },
        });
        println!("{}", table(rows));
        Ok(())
    }
}
