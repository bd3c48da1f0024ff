use super::money::round_money;
use super::period::Period;
use super::summary::total_by_kind;
use super::transaction::{Category, Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::HashMap;

/// Amount attributed to one category within a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    #[serde(serialize_with = "serialize_category")]
    pub category: Category,
    pub amount: Decimal,
    /// Share of the kind's total, as a percentage
    pub percentage: Decimal,
}

/// Totals and breakdowns for the current month, quarter or year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodReport {
    pub period: Period,
    pub start_date: NaiveDate,
    pub transaction_count: usize,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub expense_breakdown: Vec<CategoryShare>,
    pub income_sources: Vec<CategoryShare>,
    /// Period income divided by the number of transactions in the period
    pub daily_average: Decimal,
}

/// Build a report over transactions dated on or after the start of `period`
pub fn period_report(
    transactions: &[Transaction],
    period: Period,
    reference_date: NaiveDate,
) -> PeriodReport {
    let start_date = period.start_date(reference_date);
    let in_period: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.date >= start_date)
        .collect();

    let income = total_by_kind(in_period.iter().copied(), TransactionKind::Income);
    let expenses = total_by_kind(in_period.iter().copied(), TransactionKind::Expense);

    let transaction_count = in_period.len();
    let daily_average = income / Decimal::from(transaction_count.max(1));

    PeriodReport {
        period,
        start_date,
        transaction_count,
        income: round_money(income),
        expenses: round_money(expenses),
        net: round_money(income - expenses),
        expense_breakdown: breakdown(&in_period, TransactionKind::Expense, expenses),
        income_sources: breakdown(&in_period, TransactionKind::Income, income),
        daily_average: round_money(daily_average),
    }
}

/// Per-category totals, largest first
fn breakdown(transactions: &[&Transaction], kind: TransactionKind, total: Decimal) -> Vec<CategoryShare> {
    let mut by_category: HashMap<Category, Decimal> = HashMap::new();
    for t in transactions.iter().filter(|t| t.kind() == kind) {
        *by_category.entry(t.category).or_default() += t.amount;
    }

    let mut shares: Vec<CategoryShare> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount: round_money(amount),
            percentage: if total > Decimal::ZERO {
                (amount / total * dec!(100)).round_dp(1)
            } else {
                Decimal::ZERO
            },
        })
        .collect();
    // Ties broken by category so output is stable
    shares.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));
    shares
}

fn serialize_category<S: serde::Serializer>(category: &Category, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(category.name())
}
