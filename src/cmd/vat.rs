//! VAT command - compare the standard and flat-rate schemes

use super::{parse_bounded_amount, print_json};
use crate::core::{compare_vat_schemes, display_gbp, DEFAULT_FLAT_RATE_PERCENT};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct VatCommand {
    /// Annual VAT-exclusive turnover
    #[arg(short, long)]
    turnover: String,

    /// VAT paid on purchases
    #[arg(short, long, default_value = "0")]
    purchases_vat: String,

    /// Flat-rate percentage for the trade sector
    #[arg(short, long, default_value = "12")]
    flat_rate: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl VatCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut flat_rate = parse_bounded_amount(&self.flat_rate)?;
        if flat_rate == Decimal::ZERO {
            log::warn!(
                "Flat rate '{}' is not usable, falling back to {}%",
                self.flat_rate,
                DEFAULT_FLAT_RATE_PERCENT
            );
            flat_rate = DEFAULT_FLAT_RATE_PERCENT;
        }
        let comparison = compare_vat_schemes(
            parse_bounded_amount(&self.turnover)?,
            parse_bounded_amount(&self.purchases_vat)?,
            flat_rate,
        );

        if self.json {
            return print_json(&comparison);
        }

        println!();
        println!("VAT COMPARISON (turnover {})", display_gbp(comparison.turnover));
        println!();
        println!("STANDARD SCHEME");
        println!(
            "  Output VAT: {} | Input VAT: {} | Net: {}",
            display_gbp(comparison.standard.output_vat),
            display_gbp(comparison.standard.input_vat),
            display_gbp(comparison.standard.net_vat)
        );
        println!();
        println!("FLAT RATE SCHEME ({}%)", comparison.flat_rate.flat_rate_percent);
        println!(
            "  Flat VAT: {} | Input VAT: {} | Net: {}",
            display_gbp(comparison.flat_rate.flat_vat),
            display_gbp(comparison.flat_rate.input_vat),
            display_gbp(comparison.flat_rate.net_vat)
        );
        println!();
        if comparison.flat_rate_is_cheaper() {
            println!("Flat rate saves {} a year", display_gbp(comparison.savings));
        } else {
            println!(
                "Standard scheme saves {} a year",
                display_gbp(-comparison.savings)
            );
        }
        if comparison.must_register {
            println!("Turnover is at or above the VAT registration threshold: registration is required");
        }
        println!();
        Ok(())
    }
}
