use super::money::MAX_AMOUNT;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Income tax band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaxBand {
    #[default]
    Basic,
    Higher,
    Additional,
}

impl TaxBand {
    pub const ALL: [TaxBand; 3] = [TaxBand::Basic, TaxBand::Higher, TaxBand::Additional];

    pub fn name(self) -> &'static str {
        match self {
            TaxBand::Basic => "Basic",
            TaxBand::Higher => "Higher",
            TaxBand::Additional => "Additional",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must not be negative (got {value})")]
    NegativeThreshold { field: &'static str, value: Decimal },
    #[error("{field} must not exceed {} (got {value})", MAX_AMOUNT)]
    ThresholdTooLarge { field: &'static str, value: Decimal },
    #[error("{field} must be between 0 and 1 (got {value})")]
    RateOutOfRange { field: &'static str, value: Decimal },
    #[error("basic threshold ({basic}) must be below higher threshold ({higher})")]
    ThresholdOrder { basic: Decimal, higher: Decimal },
    #[error("invalid tax settings document: {0}")]
    Malformed(String),
}

/// UK income tax parameters for one tax year.
///
/// `basic_threshold` and `higher_threshold` are applied against taxable
/// income (after the personal allowance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxSettings {
    #[schemars(with = "String")]
    pub personal_allowance: Decimal,
    #[schemars(with = "String")]
    pub basic_threshold: Decimal,
    #[schemars(with = "String")]
    pub higher_threshold: Decimal,
    #[schemars(with = "String")]
    pub basic_rate: Decimal,
    #[schemars(with = "String")]
    pub higher_rate: Decimal,
    #[schemars(with = "String")]
    pub additional_rate: Decimal,
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings {
            personal_allowance: dec!(12570),
            basic_threshold: dec!(50270),
            higher_threshold: dec!(125140),
            basic_rate: dec!(0.20),
            higher_rate: dec!(0.40),
            additional_rate: dec!(0.45),
        }
    }
}

impl TaxSettings {
    /// Marginal rate for a band
    pub fn rate(&self, band: TaxBand) -> Decimal {
        match band {
            TaxBand::Basic => self.basic_rate,
            TaxBand::Higher => self.higher_rate,
            TaxBand::Additional => self.additional_rate,
        }
    }

    /// Check the settings are usable. Calculators never call this; settings
    /// are validated where they are loaded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("personal_allowance", self.personal_allowance),
            ("basic_threshold", self.basic_threshold),
            ("higher_threshold", self.higher_threshold),
        ];
        for (field, value) in thresholds {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(ConfigError::NegativeThreshold { field, value });
            }
            if value > MAX_AMOUNT {
                return Err(ConfigError::ThresholdTooLarge { field, value });
            }
        }

        let rates = [
            ("basic_rate", self.basic_rate),
            ("higher_rate", self.higher_rate),
            ("additional_rate", self.additional_rate),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ConfigError::RateOutOfRange { field, value });
            }
        }

        if self.basic_threshold >= self.higher_threshold {
            return Err(ConfigError::ThresholdOrder {
                basic: self.basic_threshold,
                higher: self.higher_threshold,
            });
        }
        Ok(())
    }

    /// Read and validate settings from JSON
    pub fn read_json<R: Read>(reader: R) -> Result<TaxSettings, ConfigError> {
        let settings: TaxSettings =
            serde_json::from_reader(reader).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}
