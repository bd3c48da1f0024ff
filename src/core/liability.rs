use super::money::round_money;
use super::settings::{TaxBand, TaxSettings};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Tax due in each income tax band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BandBreakdown {
    pub basic: Decimal,
    pub higher: Decimal,
    pub additional: Decimal,
}

impl BandBreakdown {
    pub fn get(&self, band: TaxBand) -> Decimal {
        match band {
            TaxBand::Basic => self.basic,
            TaxBand::Higher => self.higher,
            TaxBand::Additional => self.additional,
        }
    }

    pub fn total(&self) -> Decimal {
        self.basic + self.higher + self.additional
    }

    fn rounded(&self) -> Self {
        BandBreakdown {
            basic: round_money(self.basic),
            higher: round_money(self.higher),
            additional: round_money(self.additional),
        }
    }
}

/// Income tax liability for a year's income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiabilityResult {
    /// Personal allowance after tapering
    pub personal_allowance: Decimal,
    pub taxable_income: Decimal,
    pub breakdown: BandBreakdown,
    pub total_tax: Decimal,
    /// Percentage of gross income, 0 when income is not positive
    pub effective_rate: Decimal,
    /// Amount to reserve for the tax bill; equal to `total_tax`
    pub set_aside_amount: Decimal,
}

/// Calculate income tax on `annual_income`.
///
/// The personal allowance tapers by £1 for every £2 of income above
/// `settings.higher_threshold`. Bands are then applied to taxable income.
/// Every figure is computed at full precision and rounded to pence at the end.
pub fn compute_liability(annual_income: Decimal, settings: &TaxSettings) -> LiabilityResult {
    let mut personal_allowance = settings.personal_allowance;
    if annual_income > settings.higher_threshold {
        let reduction = (annual_income - settings.higher_threshold) / dec!(2);
        personal_allowance = (personal_allowance - reduction).max(Decimal::ZERO);
    }

    let taxable_income = (annual_income - personal_allowance).max(Decimal::ZERO);

    let basic_amount = taxable_income.min(settings.basic_threshold).max(Decimal::ZERO);
    let higher_amount = (taxable_income.min(settings.higher_threshold) - settings.basic_threshold)
        .max(Decimal::ZERO);
    let additional_amount = (taxable_income - settings.higher_threshold).max(Decimal::ZERO);

    let breakdown = BandBreakdown {
        basic: basic_amount * settings.rate(TaxBand::Basic),
        higher: higher_amount * settings.rate(TaxBand::Higher),
        additional: additional_amount * settings.rate(TaxBand::Additional),
    };

    let total_tax = breakdown.total();
    let effective_rate = if annual_income > Decimal::ZERO {
        total_tax / annual_income * dec!(100)
    } else {
        Decimal::ZERO
    };

    log::debug!(
        "Liability on {}: allowance={}, taxable={}, tax={}",
        annual_income,
        personal_allowance,
        taxable_income,
        total_tax
    );

    LiabilityResult {
        personal_allowance: round_money(personal_allowance),
        taxable_income: round_money(taxable_income),
        breakdown: breakdown.rounded(),
        total_tax: round_money(total_tax),
        effective_rate: round_money(effective_rate),
        set_aside_amount: round_money(total_tax),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn liability(income: Decimal) -> LiabilityResult {
        compute_liability(income, &TaxSettings::default())
    }

    #[test]
    fn no_tax_within_personal_allowance() {
        for income in [dec!(0), dec!(1), dec!(5000), dec!(12569.99), dec!(12570)] {
            let result = liability(income);
            assert_eq!(result.total_tax, Decimal::ZERO, "income {income}");
            assert_eq!(result.taxable_income, Decimal::ZERO);
        }
    }

    #[test]
    fn negative_income_yields_zero() {
        let result = liability(dec!(-2500));
        assert_eq!(result.total_tax, Decimal::ZERO);
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.effective_rate, Decimal::ZERO);
        assert_eq!(result.personal_allowance, dec!(12570));
    }

    #[test]
    fn sixty_thousand_is_all_basic_rate() {
        // Bands apply to taxable income, so 47,430 sits inside the 50,270 basic band
        let result = liability(dec!(60000));
        assert_eq!(result.personal_allowance, dec!(12570));
        assert_eq!(result.taxable_income, dec!(47430));
        assert_eq!(result.breakdown.basic, dec!(9486));
        assert_eq!(result.breakdown.higher, dec!(0));
        assert_eq!(result.breakdown.additional, dec!(0));
        assert_eq!(result.total_tax, dec!(9486.00));
        assert_eq!(result.effective_rate, dec!(15.81));
        assert_eq!(result.set_aside_amount, result.total_tax);
    }

    #[test]
    fn higher_rate_band() {
        let result = liability(dec!(100000));
        assert_eq!(result.taxable_income, dec!(87430));
        assert_eq!(result.breakdown.basic, dec!(10054));
        assert_eq!(result.breakdown.higher, dec!(14864));
        assert_eq!(result.total_tax, dec!(24918));
        assert_eq!(result.effective_rate, dec!(24.92));
    }

    #[test]
    fn taper_starts_above_higher_threshold() {
        let at_threshold = liability(dec!(125140));
        assert_eq!(at_threshold.personal_allowance, dec!(12570));

        let above = liability(dec!(130140));
        assert_eq!(above.personal_allowance, dec!(10070));
        assert_eq!(above.taxable_income, dec!(120070));
    }

    #[test]
    fn allowance_exhausted_at_150280() {
        let result = liability(dec!(150280));
        assert_eq!(result.personal_allowance, Decimal::ZERO);
        assert_eq!(result.taxable_income, dec!(150280));
        assert_eq!(result.breakdown.basic, dec!(10054));
        assert_eq!(result.breakdown.higher, dec!(29948));
        assert_eq!(result.breakdown.additional, dec!(11313));
        assert_eq!(result.total_tax, dec!(51315));

        let beyond = liability(dec!(200000));
        assert_eq!(beyond.personal_allowance, Decimal::ZERO);
    }

    #[test]
    fn bands_sum_to_total_and_are_non_negative() {
        for income in [
            dec!(-100),
            dec!(0),
            dec!(12570.01),
            dec!(33333.33),
            dec!(62840),
            dec!(99999.99),
            dec!(137710),
            dec!(150280),
            dec!(1000000),
        ] {
            let result = liability(income);
            let b = result.breakdown;
            assert!(b.basic >= Decimal::ZERO && b.higher >= Decimal::ZERO);
            assert!(b.additional >= Decimal::ZERO);
            // Components are rounded separately so allow a penny of drift per band
            assert!((b.total() - result.total_tax).abs() <= dec!(0.02), "income {income}");
        }
    }

    #[test]
    fn rounding_happens_once_at_the_end() {
        let result = liability(dec!(12570.03));
        // 0.03 * 0.20 = 0.006 -> 0.01
        assert_eq!(result.total_tax, dec!(0.01));
        assert_eq!(result.taxable_income, dec!(0.03));
    }

    #[test]
    fn malformed_settings_do_not_panic() {
        let settings = TaxSettings {
            basic_threshold: dec!(200000),
            higher_threshold: dec!(100000),
            ..TaxSettings::default()
        };
        let result = compute_liability(dec!(150000), &settings);
        assert!(result.total_tax >= Decimal::ZERO);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let settings = TaxSettings::default();
        let first = compute_liability(dec!(87654.32), &settings);
        let second = compute_liability(dec!(87654.32), &settings);
        assert_eq!(first, second);
    }
}
