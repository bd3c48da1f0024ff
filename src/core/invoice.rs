use super::money::{round_money, MAX_AMOUNT};
use super::vat::STANDARD_RATE;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvoiceError {
    #[error("expected DESCRIPTION:QUANTITY:RATE, got '{0}'")]
    Format(String),
    #[error("line item '{0}' needs a description")]
    MissingDescription(String),
    #[error("line item '{description}' has invalid {field}: {value}")]
    InvalidNumber {
        description: String,
        field: &'static str,
        value: String,
    },
    #[error("line item '{0}' must have a rate above zero")]
    NonPositiveRate(String),
    #[error("line item '{0}' must have a quantity above zero")]
    NonPositiveQuantity(String),
    #[error("line item '{0}' has a quantity or rate above {}", MAX_AMOUNT)]
    TooLarge(String),
    #[error("an invoice needs at least one line item")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
}

impl InvoiceItem {
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.rate
    }
}

impl FromStr for InvoiceItem {
    type Err = InvoiceError;

    /// Parse `description:quantity:rate`; the description may itself contain colons
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, ':');
        let (rate, quantity, description) = match (parts.next(), parts.next(), parts.next()) {
            (Some(rate), Some(quantity), Some(description)) => (rate, quantity, description),
            _ => return Err(InvoiceError::Format(s.to_string())),
        };

        let description = description.trim().to_string();
        let number = |field: &'static str, value: &str| {
            Decimal::from_str(value.trim()).map_err(|_| InvoiceError::InvalidNumber {
                description: description.clone(),
                field,
                value: value.to_string(),
            })
        };
        let quantity = number("quantity", quantity)?;
        let rate = number("rate", rate)?;

        Ok(InvoiceItem {
            description,
            quantity,
            rate,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
}

/// Reject items without a description, or with a quantity or rate that is
/// not positive or is above `MAX_AMOUNT`
pub fn validate_items(items: &[InvoiceItem]) -> Result<(), InvoiceError> {
    if items.is_empty() {
        return Err(InvoiceError::Empty);
    }
    for item in items {
        if item.description.is_empty() {
            return Err(InvoiceError::MissingDescription(format!(
                "{}:{}",
                item.quantity, item.rate
            )));
        }
        if item.rate <= Decimal::ZERO {
            return Err(InvoiceError::NonPositiveRate(item.description.clone()));
        }
        if item.quantity <= Decimal::ZERO {
            return Err(InvoiceError::NonPositiveQuantity(item.description.clone()));
        }
        if item.rate > MAX_AMOUNT || item.quantity > MAX_AMOUNT {
            return Err(InvoiceError::TooLarge(item.description.clone()));
        }
    }
    Ok(())
}

/// Subtotal of all lines with VAT added at the standard rate
pub fn invoice_totals(items: &[InvoiceItem]) -> InvoiceTotals {
    let subtotal: Decimal = items.iter().map(InvoiceItem::line_total).sum();
    let vat = subtotal * STANDARD_RATE;
    InvoiceTotals {
        subtotal: round_money(subtotal),
        vat: round_money(vat),
        total: round_money(subtotal + vat),
    }
}
