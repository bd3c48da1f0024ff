use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer};
use std::str::FromStr;

/// Decimal places kept on every reported monetary figure
pub const MONEY_DP: u32 = 2;

/// Largest amount (or mileage) a single record may carry, one billion.
/// Keeps every total and product well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Whether the value has no fraction of a penny; trailing zeros are ignored
pub fn is_whole_pence(value: Decimal) -> bool {
    value.normalize().scale() <= MONEY_DP
}

/// Deserialize a decimal whose magnitude is at most `MAX_AMOUNT`
pub fn bounded_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = <Decimal as Deserialize>::deserialize(deserializer)?;
    if value.abs() > MAX_AMOUNT {
        return Err(de::Error::custom(format!(
            "{value} is above the limit of {MAX_AMOUNT}"
        )));
    }
    Ok(value)
}

/// Round a monetary value to pence, halves rounded away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Lenient amount parsing: `£`, thousands separators and whitespace are
/// ignored; anything unparsable collapses to zero.
pub fn parse_amount(input: &str) -> Decimal {
    let cleaned: String = input
        .trim()
        .trim_start_matches('£')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Format as pounds sterling, e.g. `£1,234.50` or `-£12.00`
pub fn display_gbp(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, pence) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}£{grouped}.{pence}")
}
