use super::{
    Store, StoreError, MILEAGE_TRIPS_KEY, RECURRING_ITEMS_KEY, TAX_SETTINGS_KEY, TRANSACTIONS_KEY,
};
use crate::core::transaction::{check_amount, digest_id};
use crate::core::{
    Frequency, MileageTrip, NewTransaction, NewTrip, RecurringItem, TaxSettings, Transaction,
    TransactionKind, TransactionUpdate,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

fn load<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: Store + ?Sized,
{
    match store.get(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

fn save<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: Store + ?Sized,
{
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// All transactions, newest first
pub fn get_transactions<S: Store + ?Sized>(store: &S) -> Result<Vec<Transaction>, StoreError> {
    Ok(load(store, TRANSACTIONS_KEY)?.unwrap_or_default())
}

/// Record a new transaction at the front of the list
pub fn save_transaction<S: Store + ?Sized>(
    store: &mut S,
    new: NewTransaction,
    now: DateTime<Utc>,
) -> Result<Transaction, StoreError> {
    let transaction = Transaction::create(new, now)?;
    let mut transactions = get_transactions(store)?;
    if transactions.iter().any(|t| t.id == transaction.id) {
        return Err(StoreError::DuplicateId(transaction.id));
    }
    transactions.insert(0, transaction.clone());
    save(store, TRANSACTIONS_KEY, &transactions)?;
    log::info!(
        "Saved {} {} of {}",
        transaction.kind(),
        transaction.id,
        transaction.amount
    );
    Ok(transaction)
}

/// Apply a partial update; `None` when no transaction has the id
pub fn update_transaction<S: Store + ?Sized>(
    store: &mut S,
    id: &str,
    update: TransactionUpdate,
) -> Result<Option<Transaction>, StoreError> {
    let mut transactions = get_transactions(store)?;
    let Some(transaction) = transactions.iter_mut().find(|t| t.id == id) else {
        return Ok(None);
    };
    transaction.apply(update)?;
    let updated = transaction.clone();
    save(store, TRANSACTIONS_KEY, &transactions)?;
    Ok(Some(updated))
}

/// Remove a transaction, returning whether it existed
pub fn delete_transaction<S: Store + ?Sized>(store: &mut S, id: &str) -> Result<bool, StoreError> {
    let mut transactions = get_transactions(store)?;
    let before = transactions.len();
    transactions.retain(|t| t.id != id);
    if transactions.len() == before {
        return Ok(false);
    }
    save(store, TRANSACTIONS_KEY, &transactions)?;
    Ok(true)
}

/// Stored tax settings, or the defaults when none are saved
pub fn get_tax_settings<S: Store + ?Sized>(store: &S) -> Result<TaxSettings, StoreError> {
    let settings: TaxSettings = load(store, TAX_SETTINGS_KEY)?.unwrap_or_default();
    settings.validate()?;
    Ok(settings)
}

pub fn save_tax_settings<S: Store + ?Sized>(
    store: &mut S,
    settings: &TaxSettings,
) -> Result<(), StoreError> {
    settings.validate()?;
    save(store, TAX_SETTINGS_KEY, settings)
}

/// Remove transactions and tax settings
pub fn clear_all_data<S: Store + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.delete(TRANSACTIONS_KEY)?;
    store.delete(TAX_SETTINGS_KEY)?;
    log::info!("Cleared transactions and tax settings");
    Ok(())
}

pub fn get_recurring_items<S: Store + ?Sized>(store: &S) -> Result<Vec<RecurringItem>, StoreError> {
    Ok(load(store, RECURRING_ITEMS_KEY)?.unwrap_or_default())
}

pub fn add_recurring_item<S: Store + ?Sized>(
    store: &mut S,
    kind: TransactionKind,
    description: String,
    amount: Decimal,
    frequency: Frequency,
    start_date: NaiveDate,
    now: DateTime<Utc>,
) -> Result<RecurringItem, StoreError> {
    check_amount(amount)?;
    let amount_text = amount.to_string();
    let item = RecurringItem {
        id: digest_id(now, &[kind.as_str(), &description, &amount_text]),
        kind,
        description,
        amount,
        frequency,
        start_date,
    };
    let mut items = get_recurring_items(store)?;
    items.push(item.clone());
    save(store, RECURRING_ITEMS_KEY, &items)?;
    Ok(item)
}

pub fn delete_recurring_item<S: Store + ?Sized>(store: &mut S, id: &str) -> Result<bool, StoreError> {
    let mut items = get_recurring_items(store)?;
    let before = items.len();
    items.retain(|i| i.id != id);
    if items.len() == before {
        return Ok(false);
    }
    save(store, RECURRING_ITEMS_KEY, &items)?;
    Ok(true)
}

/// Trips, newest recorded first
pub fn get_trips<S: Store + ?Sized>(store: &S) -> Result<Vec<MileageTrip>, StoreError> {
    Ok(load(store, MILEAGE_TRIPS_KEY)?.unwrap_or_default())
}

pub fn add_trip<S: Store + ?Sized>(
    store: &mut S,
    trip: NewTrip,
    now: DateTime<Utc>,
) -> Result<MileageTrip, StoreError> {
    let miles = trip.miles.to_string();
    let date = trip.date.to_string();
    let id = digest_id(now, &[&trip.purpose, &miles, &date]);
    let trip = MileageTrip::new(id, trip)?;
    let mut trips = get_trips(store)?;
    trips.insert(0, trip.clone());
    save(store, MILEAGE_TRIPS_KEY, &trips)?;
    log::info!("Recorded trip {} of {} miles", trip.id, trip.miles);
    Ok(trip)
}

pub fn delete_trip<S: Store + ?Sized>(store: &mut S, id: &str) -> Result<bool, StoreError> {
    let mut trips = get_trips(store)?;
    let before = trips.len();
    trips.retain(|t| t.id != id);
    if trips.len() == before {
        return Ok(false);
    }
    save(store, MILEAGE_TRIPS_KEY, &trips)?;
    Ok(true)
}
