pub mod forecast;
pub mod invoice;
pub mod liability;
pub mod mileage;
pub mod money;
pub mod period;
pub mod report;
pub mod settings;
pub mod summary;
pub mod transaction;
pub mod vat;

// Flat public surface for domain types and calculators.
pub use forecast::{
    forecast, monthly_averages, year_to_date, CashFlowForecast, Frequency, RecurringItem,
    DEFAULT_HORIZON_MONTHS, MAX_HORIZON_MONTHS,
};
pub use invoice::{invoice_totals, validate_items, InvoiceItem, InvoiceTotals};
pub use liability::{compute_liability, BandBreakdown, LiabilityResult};
pub use mileage::{compute_mileage, MileageSummary, MileageTrip, NewTrip, TripError, VehicleType};
pub use money::{display_gbp, parse_amount, round_money, MAX_AMOUNT};
pub use period::{Period, YearMonth};
pub use report::{period_report, PeriodReport};
pub use settings::{ConfigError, TaxBand, TaxSettings};
pub use summary::{summarize, Summary};
pub use transaction::{
    Category, ExpenseCategory, IncomeCategory, NewTransaction, StoredTransaction, Transaction,
    TransactionError, TransactionKind, TransactionUpdate,
};
pub use vat::{compare_vat_schemes, VatComparison, DEFAULT_FLAT_RATE_PERCENT};
