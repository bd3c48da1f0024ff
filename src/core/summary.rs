use super::liability::compute_liability;
use super::money::round_money;
use super::period::months_remaining_in_year;
use super::settings::TaxSettings;
use super::transaction::{Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline figures for a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// Income minus expenses; negative for a loss
    pub net_profit: Decimal,
    /// Tax on net profit
    pub estimated_tax: Decimal,
    /// Estimated tax spread over the months left in the calendar year
    pub set_aside_per_month: Decimal,
}

/// Sum of amounts for one kind of transaction
pub fn total_by_kind<'a, I>(transactions: I, kind: TransactionKind) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.kind() == kind)
        .map(|t| t.amount)
        .sum()
}

/// Summarise transactions, estimating tax on net profit.
///
/// Tax is assessed on profit rather than gross income, so a loss gives zero
/// tax. The monthly set-aside divides by the months left in the reference
/// date's calendar year, including the current month.
pub fn summarize(
    transactions: &[Transaction],
    settings: &TaxSettings,
    reference_date: NaiveDate,
) -> Summary {
    let income = total_by_kind(transactions, TransactionKind::Income);
    let expenses = total_by_kind(transactions, TransactionKind::Expense);
    let net_profit = income - expenses;

    let liability = compute_liability(net_profit, settings);
    let months_remaining = months_remaining_in_year(reference_date).max(1);
    let set_aside_per_month = liability.set_aside_amount / Decimal::from(months_remaining);

    log::debug!(
        "Summary of {} transactions: net={}, tax={}, months remaining={}",
        transactions.len(),
        net_profit,
        liability.set_aside_amount,
        months_remaining
    );

    Summary {
        total_income: round_money(income),
        total_expenses: round_money(expenses),
        net_profit: round_money(net_profit),
        estimated_tax: liability.set_aside_amount,
        set_aside_per_month: round_money(set_aside_per_month),
    }
}
