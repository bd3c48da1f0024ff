use super::money::{bounded_decimal, is_whole_pence, MAX_AMOUNT};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("amount {0} is above the limit of {}", MAX_AMOUNT)]
    AmountTooLarge(Decimal),
    #[error("amount {0} has fractions of a penny")]
    SubPennyAmount(Decimal),
    #[error("unknown {kind} category: {id}")]
    UnknownCategory { kind: TransactionKind, id: String },
}

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IncomeCategory {
    Client,
    Sale,
    Refund,
    Other,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 4] = [
        IncomeCategory::Client,
        IncomeCategory::Sale,
        IncomeCategory::Refund,
        IncomeCategory::Other,
    ];

    pub fn id(self) -> &'static str {
        match self {
            IncomeCategory::Client => "client",
            IncomeCategory::Sale => "sale",
            IncomeCategory::Refund => "refund",
            IncomeCategory::Other => "other",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IncomeCategory::Client => "Client Payment",
            IncomeCategory::Sale => "Sale",
            IncomeCategory::Refund => "Refund",
            IncomeCategory::Other => "Other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            IncomeCategory::Client => "briefcase",
            IncomeCategory::Sale => "cart",
            IncomeCategory::Refund => "rotate-left",
            IncomeCategory::Other => "dots-horizontal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseCategory {
    Materials,
    Travel,
    Equipment,
    Meals,
    Office,
    Utilities,
    Insurance,
    Professional,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Materials,
        ExpenseCategory::Travel,
        ExpenseCategory::Equipment,
        ExpenseCategory::Meals,
        ExpenseCategory::Office,
        ExpenseCategory::Utilities,
        ExpenseCategory::Insurance,
        ExpenseCategory::Professional,
        ExpenseCategory::Other,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ExpenseCategory::Materials => "materials",
            ExpenseCategory::Travel => "travel",
            ExpenseCategory::Equipment => "equipment",
            ExpenseCategory::Meals => "meals",
            ExpenseCategory::Office => "office",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Insurance => "insurance",
            ExpenseCategory::Professional => "professional",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExpenseCategory::Materials => "Materials",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Equipment => "Equipment",
            ExpenseCategory::Meals => "Meals",
            ExpenseCategory::Office => "Office",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::Professional => "Professional",
            ExpenseCategory::Other => "Other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ExpenseCategory::Materials => "tools",
            ExpenseCategory::Travel => "car",
            ExpenseCategory::Equipment => "hammer-wrench",
            ExpenseCategory::Meals => "food",
            ExpenseCategory::Office => "desk",
            ExpenseCategory::Utilities => "lightning-bolt",
            ExpenseCategory::Insurance => "shield-check",
            ExpenseCategory::Professional => "account-tie",
            ExpenseCategory::Other => "dots-horizontal",
        }
    }

    /// Whether the expense is allowable against profit
    pub fn is_deductible(self) -> bool {
        !matches!(self, ExpenseCategory::Other)
    }
}

/// Transaction category; the variant fixes the transaction's kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Income(IncomeCategory),
    Expense(ExpenseCategory),
}

impl Category {
    pub fn kind(self) -> TransactionKind {
        match self {
            Category::Income(_) => TransactionKind::Income,
            Category::Expense(_) => TransactionKind::Expense,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Category::Income(c) => c.id(),
            Category::Expense(c) => c.id(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Income(c) => c.name(),
            Category::Expense(c) => c.name(),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Income(c) => c.icon(),
            Category::Expense(c) => c.icon(),
        }
    }

    /// Income has no deductibility; only expense categories can be deductible
    pub fn is_deductible(self) -> bool {
        match self {
            Category::Income(_) => false,
            Category::Expense(c) => c.is_deductible(),
        }
    }

    /// Look up a category by its id within the given kind
    pub fn parse(kind: TransactionKind, id: &str) -> Result<Category, TransactionError> {
        let id = id.trim().to_lowercase();
        let found = match kind {
            TransactionKind::Income => IncomeCategory::ALL
                .into_iter()
                .find(|c| c.id() == id)
                .map(Category::Income),
            TransactionKind::Expense => ExpenseCategory::ALL
                .into_iter()
                .find(|c| c.id() == id)
                .map(Category::Expense),
        };
        found.ok_or(TransactionError::UnknownCategory { kind, id })
    }

    pub fn all(kind: TransactionKind) -> Vec<Category> {
        match kind {
            TransactionKind::Income => IncomeCategory::ALL.into_iter().map(Category::Income).collect(),
            TransactionKind::Expense => ExpenseCategory::ALL
                .into_iter()
                .map(Category::Expense)
                .collect(),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTransaction", into = "StoredTransaction")]
pub struct Transaction {
    pub id: String,
    pub category: Category,
    pub amount: Decimal,
    pub description: Option<String>,
    /// Date the transaction is attributed to
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        self.category.kind()
    }

    /// Create a transaction, assigning its id and creation time
    pub fn create(new: NewTransaction, created_at: DateTime<Utc>) -> Result<Self, TransactionError> {
        new.validate()?;
        let id = transaction_id(&new, created_at);
        Ok(Transaction {
            id,
            category: new.category,
            amount: new.amount,
            description: new.description,
            date: new.date,
            created_at,
        })
    }

    /// Apply a partial update; id and creation time never change
    pub fn apply(&mut self, update: TransactionUpdate) -> Result<(), TransactionError> {
        if let Some(amount) = update.amount {
            check_amount(amount)?;
            self.amount = amount;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(description) = update.description {
            self.description = Some(description).filter(|d| !d.is_empty());
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        Ok(())
    }
}

/// Fields supplied when recording a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub category: Category,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), TransactionError> {
        check_amount(self.amount)
    }
}

/// A recordable amount is positive, in whole pence and at most `MAX_AMOUNT`
pub fn check_amount(amount: Decimal) -> Result<(), TransactionError> {
    if amount <= Decimal::ZERO {
        return Err(TransactionError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(TransactionError::AmountTooLarge(amount));
    }
    if !is_whole_pence(amount) {
        return Err(TransactionError::SubPennyAmount(amount));
    }
    Ok(())
}

/// Partial replacement of a transaction's editable fields.
/// An empty description clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionUpdate {
    pub category: Option<Category>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

fn transaction_id(new: &NewTransaction, created_at: DateTime<Utc>) -> String {
    let amount = new.amount.to_string();
    let date = new.date.to_string();
    digest_id(
        created_at,
        &[
            new.category.kind().as_str(),
            new.category.id(),
            &amount,
            &date,
            new.description.as_deref().unwrap_or_default(),
        ],
    )
}

/// Short hex id from a creation timestamp and record fields
pub fn digest_id(created_at: DateTime<Utc>, parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(created_at.to_rfc3339_opts(SecondsFormat::Nanos, true));
    for part in parts {
        hasher.update([0u8]);
        hasher.update(part);
    }
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

/// Persisted shape of a transaction
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StoredTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(deserialize_with = "bounded_decimal")]
    #[schemars(with = "String")]
    pub amount: Decimal,
    /// Category id, e.g. "client" or "materials"
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schemars(with = "String")]
    pub date: NaiveDate,
    #[schemars(with = "String")]
    pub created_at: DateTime<Utc>,
}

impl TryFrom<StoredTransaction> for Transaction {
    type Error = TransactionError;

    fn try_from(stored: StoredTransaction) -> Result<Self, Self::Error> {
        let category = Category::parse(stored.kind, &stored.category)?;
        Ok(Transaction {
            id: stored.id,
            category,
            amount: stored.amount,
            description: stored.description,
            date: stored.date,
            created_at: stored.created_at,
        })
    }
}

impl From<Transaction> for StoredTransaction {
    fn from(tx: Transaction) -> Self {
        StoredTransaction {
            id: tx.id,
            kind: tx.category.kind(),
            amount: tx.amount,
            category: tx.category.id().to_string(),
            description: tx.description,
            date: tx.date,
            created_at: tx.created_at,
        }
    }
}
