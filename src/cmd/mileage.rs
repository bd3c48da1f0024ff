//! Mileage commands - record trips and total the allowable deduction

use super::{print_json, table, Context};
use crate::core::{compute_mileage, display_gbp, parse_amount, MileageTrip, NewTrip, VehicleType};
use crate::store;
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use rust_decimal_macros::dec;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct MileageCommand {
    #[command(subcommand)]
    command: MileageSubcommand,
}

#[derive(Subcommand, Debug)]
enum MileageSubcommand {
    /// Record a trip
    Add(AddTrip),
    /// List recorded trips, newest first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Total miles and deduction, grouped by month
    Summary {
        #[arg(long)]
        json: bool,
    },
    /// Remove a trip
    Delete { id: String },
}

#[derive(Args, Debug)]
struct AddTrip {
    /// Reason for the journey
    #[arg(short, long)]
    purpose: String,

    #[arg(short, long)]
    miles: String,

    #[arg(short, long, value_enum, default_value = "car")]
    vehicle: VehicleArg,

    #[arg(long)]
    from: Option<String>,

    #[arg(long)]
    to: Option<String>,

    /// Trip date, defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Record as a personal trip, excluded from the deduction
    #[arg(long)]
    personal: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VehicleArg {
    Car,
    Motorcycle,
    Bicycle,
    Van,
}

impl From<VehicleArg> for VehicleType {
    fn from(vehicle: VehicleArg) -> Self {
        match vehicle {
            VehicleArg::Car => VehicleType::Car,
            VehicleArg::Motorcycle => VehicleType::Motorcycle,
            VehicleArg::Bicycle => VehicleType::Bicycle,
            VehicleArg::Van => VehicleType::Van,
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct TripRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Purpose")]
    purpose: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Miles")]
    miles: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Deduction")]
    deduction: String,
}

impl From<&MileageTrip> for TripRow {
    fn from(trip: &MileageTrip) -> Self {
        let route = match (&trip.start_location, &trip.end_location) {
            (Some(from), Some(to)) => format!("{from} -> {to}"),
            (Some(from), None) => from.clone(),
            (None, Some(to)) => format!("-> {to}"),
            (None, None) => String::new(),
        };
        TripRow {
            id: trip.id.clone(),
            date: trip.date.to_string(),
            purpose: trip.purpose.clone(),
            route,
            miles: trip.miles.normalize().to_string(),
            rate: format!("{}p", (trip.rate * dec!(100)).normalize()),
            deduction: if trip.is_business {
                display_gbp(trip.deduction())
            } else {
                "personal".to_string()
            },
        }
    }
}

impl MileageCommand {
    pub fn exec(&self, ctx: &mut Context) -> anyhow::Result<()> {
        match &self.command {
            MileageSubcommand::Add(add) => {
                let trip = NewTrip {
                    date: add.date.unwrap_or(ctx.today),
                    purpose: add.purpose.clone(),
                    start_location: add.from.clone(),
                    end_location: add.to.clone(),
                    miles: parse_amount(&add.miles),
                    vehicle: add.vehicle.into(),
                    is_business: !add.personal,
                };
                let trip = store::add_trip(&mut ctx.store, trip, ctx.now)?;
                println!(
                    "Recorded {} miles for '{}' on {} [{}]",
                    trip.miles, trip.purpose, trip.date, trip.id
                );
                Ok(())
            }
            MileageSubcommand::List { json } => {
                let trips = store::get_trips(&ctx.store)?;
                if *json {
                    return print_json(&trips);
                }
                if trips.is_empty() {
                    println!("No trips recorded");
                } else {
                    println!("{}", table(trips.iter().map(TripRow::from)));
                }
                Ok(())
            }
            MileageSubcommand::Summary { json } => {
                let trips = store::get_trips(&ctx.store)?;
                let summary = compute_mileage(&trips);
                if *json {
                    return print_json(&summary);
                }

                println!();
                println!("MILEAGE");
                println!(
                    "  Total: {} miles | Business: {} miles | Deduction: {}",
                    summary.total_miles.normalize(),
                    summary.total_business_miles.normalize(),
                    display_gbp(summary.total_deduction)
                );
                println!();
                for group in &summary.by_month {
                    println!("{}", group.month.long_label());
                    println!("{}", table(group.trips.iter().map(TripRow::from)));
                    println!();
                }
                Ok(())
            }
            MileageSubcommand::Delete { id } => {
                if !store::delete_trip(&mut ctx.store, id)? {
                    anyhow::bail!("No trip with id {id}");
                }
                println!("Deleted {id}");
                Ok(())
            }
        }
    }
}
