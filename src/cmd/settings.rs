//! Settings commands - inspect and replace the tax band configuration

use super::{print_json, table, Context};
use crate::core::{display_gbp, TaxBand, TaxSettings};
use crate::store;
use clap::{Args, Subcommand};
use rust_decimal_macros::dec;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    /// Show the tax settings in use
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Replace the tax settings from a JSON file
    Set { file: PathBuf },
    /// Restore the default UK settings
    Reset,
}

#[derive(Debug, Clone, Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    band: &'static str,
    #[tabled(rename = "Up to")]
    limit: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

impl SettingsCommand {
    pub fn exec(&self, ctx: &mut Context) -> anyhow::Result<()> {
        match &self.command {
            SettingsSubcommand::Show { json } => {
                let settings = store::get_tax_settings(&ctx.store)?;
                if *json {
                    return print_json(&settings);
                }
                print_settings(&settings);
                Ok(())
            }
            SettingsSubcommand::Set { file } => {
                let settings = TaxSettings::read_json(BufReader::new(File::open(file)?))?;
                store::save_tax_settings(&mut ctx.store, &settings)?;
                log::info!("Tax settings replaced from {}", file.display());
                println!("Saved tax settings from {}", file.display());
                print_settings(&settings);
                Ok(())
            }
            SettingsSubcommand::Reset => {
                store::save_tax_settings(&mut ctx.store, &TaxSettings::default())?;
                println!("Restored default tax settings");
                Ok(())
            }
        }
    }
}

fn print_settings(settings: &TaxSettings) {
    println!();
    println!("  Personal allowance: {}", display_gbp(settings.personal_allowance));
    println!();
    let rows = TaxBand::ALL.iter().map(|&band| BandRow {
        band: band.name(),
        limit: match band {
            TaxBand::Basic => display_gbp(settings.basic_threshold),
            TaxBand::Higher => display_gbp(settings.higher_threshold),
            TaxBand::Additional => "-".to_string(),
        },
        rate: format!("{}%", (settings.rate(band) * dec!(100)).normalize()),
    });
    println!("{}", table(rows));
    println!();
}
