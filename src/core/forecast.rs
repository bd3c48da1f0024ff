use super::money::{bounded_decimal, round_money};
use super::period::{months_remaining_in_year, start_of_year, YearMonth};
use super::summary::total_by_kind;
use super::transaction::{Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Months projected when no horizon is given
pub const DEFAULT_HORIZON_MONTHS: u32 = 6;

/// Longest projection produced; larger horizons are cut to fifty years
pub const MAX_HORIZON_MONTHS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Annually,
}

/// Expected future income or expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecurringItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    #[serde(deserialize_with = "bounded_decimal")]
    #[schemars(with = "String")]
    pub amount: Decimal,
    pub frequency: Frequency,
    #[schemars(with = "String")]
    pub start_date: NaiveDate,
}

/// Average monthly income and expense over the recorded history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthlyAverages {
    pub income: Decimal,
    pub expense: Decimal,
    /// Divisor used for both averages
    pub months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastPoint {
    pub month: YearMonth,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Straight-line extrapolation of the historical averages over a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndOfYearProjection {
    pub projected_income: Decimal,
    pub projected_expense: Decimal,
    pub projected_net: Decimal,
    pub months_remaining: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct YearToDate {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashFlowForecast {
    pub averages: MonthlyAverages,
    pub points: Vec<ForecastPoint>,
    pub end_of_year: EndOfYearProjection,
    pub year_to_date: YearToDate,
}

/// Average monthly income and expense.
///
/// Amounts are summed per calendar month. Both totals are divided by the
/// number of months that recorded any income, with a floor of one.
pub fn monthly_averages(transactions: &[Transaction]) -> MonthlyAverages {
    let mut income_by_month: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    let mut expense_by_month: BTreeMap<YearMonth, Decimal> = BTreeMap::new();

    for t in transactions {
        let month = YearMonth::from_date(t.date);
        let bucket = match t.kind() {
            TransactionKind::Income => &mut income_by_month,
            TransactionKind::Expense => &mut expense_by_month,
        };
        *bucket.entry(month).or_default() += t.amount;
    }

    let months = (income_by_month.len() as u32).max(1);
    let divisor = Decimal::from(months);
    MonthlyAverages {
        income: income_by_month.values().copied().sum::<Decimal>() / divisor,
        expense: expense_by_month.values().copied().sum::<Decimal>() / divisor,
        months,
    }
}

/// Project cash flow for `horizon_months` months (at most
/// `MAX_HORIZON_MONTHS`) starting with the reference month.
///
/// Each month uses the total of monthly recurring items for a direction, or
/// the historical average when that total is zero. The end-of-year figures
/// extrapolate the historical averages only.
pub fn forecast(
    transactions: &[Transaction],
    recurring: &[RecurringItem],
    horizon_months: u32,
    reference_date: NaiveDate,
) -> CashFlowForecast {
    let averages = monthly_averages(transactions);

    let recurring_total = |kind: TransactionKind| -> Decimal {
        recurring
            .iter()
            .filter(|r| r.frequency == Frequency::Monthly && r.kind == kind)
            .map(|r| r.amount)
            .sum()
    };
    let recurring_income = recurring_total(TransactionKind::Income);
    let recurring_expense = recurring_total(TransactionKind::Expense);

    let projected_income = if recurring_income.is_zero() {
        averages.income
    } else {
        recurring_income
    };
    let projected_expense = if recurring_expense.is_zero() {
        averages.expense
    } else {
        recurring_expense
    };

    let horizon_months = horizon_months.min(MAX_HORIZON_MONTHS);
    let first_month = YearMonth::from_date(reference_date);
    let points = (0..horizon_months)
        .map(|i| ForecastPoint {
            month: first_month.plus_months(i),
            income: round_money(projected_income),
            expense: round_money(projected_expense),
            net: round_money(projected_income - projected_expense),
        })
        .collect();

    let end_of_year = EndOfYearProjection {
        projected_income: round_money(averages.income * dec!(12)),
        projected_expense: round_money(averages.expense * dec!(12)),
        projected_net: round_money((averages.income - averages.expense) * dec!(12)),
        months_remaining: months_remaining_in_year(reference_date),
    };

    log::debug!(
        "Forecast from {} over {} months: averages income={} expense={} across {} months",
        first_month,
        horizon_months,
        averages.income,
        averages.expense,
        averages.months
    );

    CashFlowForecast {
        averages: MonthlyAverages {
            income: round_money(averages.income),
            expense: round_money(averages.expense),
            months: averages.months,
        },
        points,
        end_of_year,
        year_to_date: year_to_date(transactions, reference_date),
    }
}

/// Totals for transactions dated from 1 January of the reference year
pub fn year_to_date(transactions: &[Transaction], reference_date: NaiveDate) -> YearToDate {
    let start = start_of_year(reference_date);
    let in_year: Vec<&Transaction> = transactions.iter().filter(|t| t.date >= start).collect();
    let income = total_by_kind(in_year.iter().copied(), TransactionKind::Income);
    let expense = total_by_kind(in_year.iter().copied(), TransactionKind::Expense);
    YearToDate {
        income: round_money(income),
        expense: round_money(expense),
        net: round_money(income - expense),
    }
}
