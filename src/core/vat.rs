use super::money::round_money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// UK standard VAT rate
pub const STANDARD_RATE: Decimal = dec!(0.20);

/// Turnover at which VAT registration becomes mandatory
pub const REGISTRATION_THRESHOLD: Decimal = dec!(85000);

/// Flat-rate percentage used when none (or zero) is supplied
pub const DEFAULT_FLAT_RATE_PERCENT: Decimal = dec!(12);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandardScheme {
    pub output_vat: Decimal,
    pub input_vat: Decimal,
    /// Negative when a refund is due
    pub net_vat: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlatRateScheme {
    pub flat_rate_percent: Decimal,
    pub flat_vat: Decimal,
    /// Reclaimable VAT on capital purchases
    pub input_vat: Decimal,
    pub net_vat: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VatComparison {
    pub turnover: Decimal,
    pub standard: StandardScheme,
    pub flat_rate: FlatRateScheme,
    /// Standard net VAT minus flat-rate net VAT; positive when flat rate is cheaper
    pub savings: Decimal,
    pub must_register: bool,
}

impl VatComparison {
    pub fn flat_rate_is_cheaper(&self) -> bool {
        self.savings > Decimal::ZERO
    }
}

/// Compare net VAT under the standard and flat-rate schemes.
///
/// `purchases_vat` is multiplied by the standard rate for the input VAT of
/// both schemes, so a figure that is already VAT is counted at 20% of itself.
pub fn compare_vat_schemes(
    turnover: Decimal,
    purchases_vat: Decimal,
    flat_rate_percent: Decimal,
) -> VatComparison {
    let output_vat = turnover * STANDARD_RATE;
    let input_vat = purchases_vat * STANDARD_RATE;
    let standard_net = output_vat - input_vat;

    let flat_vat = turnover * (flat_rate_percent / dec!(100));
    let flat_net = flat_vat - input_vat;

    VatComparison {
        turnover,
        standard: StandardScheme {
            output_vat: round_money(output_vat),
            input_vat: round_money(input_vat),
            net_vat: round_money(standard_net),
        },
        flat_rate: FlatRateScheme {
            flat_rate_percent,
            flat_vat: round_money(flat_vat),
            input_vat: round_money(input_vat),
            net_vat: round_money(flat_net),
        },
        savings: round_money(standard_net - flat_net),
        must_register: turnover >= REGISTRATION_THRESHOLD,
    }
}
