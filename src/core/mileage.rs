use super::money::{bounded_decimal, round_money, MAX_AMOUNT};
use super::period::YearMonth;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TripError {
    #[error("miles must be greater than zero (got {0})")]
    NonPositiveMiles(Decimal),
    #[error("{0} miles is above the limit of {}", MAX_AMOUNT)]
    TooManyMiles(Decimal),
    #[error("a trip needs a purpose")]
    MissingPurpose,
}

/// Vehicle used for a journey, each with a flat per-mile rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Car,
    Motorcycle,
    Bicycle,
    Van,
}

impl VehicleType {
    /// Per-mile allowance. No reduced rate after 10,000 miles is applied.
    pub fn rate(self) -> Decimal {
        match self {
            VehicleType::Car => dec!(0.45),
            VehicleType::Motorcycle => dec!(0.24),
            VehicleType::Bicycle => dec!(0.20),
            VehicleType::Van => dec!(0.27),
        }
    }
}

/// A recorded journey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MileageTrip {
    pub id: String,
    #[schemars(with = "String")]
    pub date: NaiveDate,
    pub purpose: String,
    #[serde(default)]
    pub start_location: Option<String>,
    #[serde(default)]
    pub end_location: Option<String>,
    #[serde(deserialize_with = "bounded_decimal")]
    #[schemars(with = "String")]
    pub miles: Decimal,
    /// Per-mile rate captured when the trip was recorded
    #[serde(deserialize_with = "bounded_decimal")]
    #[schemars(with = "String")]
    pub rate: Decimal,
    pub is_business: bool,
}

/// Journey details supplied when recording a trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrip {
    pub date: NaiveDate,
    pub purpose: String,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub miles: Decimal,
    pub vehicle: VehicleType,
    pub is_business: bool,
}

impl MileageTrip {
    /// Record a trip, fixing its rate from the vehicle table
    pub fn new(id: String, trip: NewTrip) -> Result<Self, TripError> {
        if trip.miles <= Decimal::ZERO {
            return Err(TripError::NonPositiveMiles(trip.miles));
        }
        if trip.miles > MAX_AMOUNT {
            return Err(TripError::TooManyMiles(trip.miles));
        }
        let purpose = trip.purpose.trim().to_string();
        if purpose.is_empty() {
            return Err(TripError::MissingPurpose);
        }
        Ok(MileageTrip {
            id,
            date: trip.date,
            purpose,
            start_location: trip.start_location.filter(|s| !s.is_empty()),
            end_location: trip.end_location.filter(|s| !s.is_empty()),
            miles: trip.miles,
            rate: trip.vehicle.rate(),
            is_business: trip.is_business,
        })
    }

    pub fn deduction(&self) -> Decimal {
        self.miles * self.rate
    }
}

/// Trips recorded in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTrips {
    pub month: YearMonth,
    pub trips: Vec<MileageTrip>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MileageSummary {
    pub total_miles: Decimal,
    pub total_business_miles: Decimal,
    pub total_deduction: Decimal,
    /// Newest month first
    pub by_month: Vec<MonthTrips>,
}

/// Total miles and the deductible amount for business trips
pub fn compute_mileage(trips: &[MileageTrip]) -> MileageSummary {
    let total_miles: Decimal = trips.iter().map(|t| t.miles).sum();
    let business = trips.iter().filter(|t| t.is_business);
    let total_business_miles: Decimal = business.clone().map(|t| t.miles).sum();
    let total_deduction: Decimal = business.map(MileageTrip::deduction).sum();

    let mut by_month: Vec<MonthTrips> = Vec::new();
    for trip in trips {
        let month = YearMonth::from_date(trip.date);
        match by_month.iter_mut().find(|m| m.month == month) {
            Some(group) => group.trips.push(trip.clone()),
            None => by_month.push(MonthTrips {
                month,
                trips: vec![trip.clone()],
            }),
        }
    }
    by_month.sort_by(|a, b| b.month.cmp(&a.month));

    MileageSummary {
        total_miles,
        total_business_miles,
        total_deduction: round_money(total_deduction),
        by_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn trip(id: &str, on: &str, miles: Decimal, vehicle: VehicleType, is_business: bool) -> MileageTrip {
        MileageTrip::new(
            id.to_string(),
            NewTrip {
                date: date(on),
                purpose: "Client visit".to_string(),
                start_location: Some("Leeds".to_string()),
                end_location: Some(String::new()),
                miles,
                vehicle,
                is_business,
            },
        )
        .unwrap()
    }

    #[test]
    fn car_trip_of_100_miles() {
        let summary = compute_mileage(&[trip("1", "2026-05-01", dec!(100), VehicleType::Car, true)]);
        assert_eq!(summary.total_miles, dec!(100));
        assert_eq!(summary.total_business_miles, dec!(100));
        assert_eq!(summary.total_deduction, dec!(45.00));
    }

    #[test]
    fn vehicle_rates() {
        assert_eq!(VehicleType::Car.rate(), dec!(0.45));
        assert_eq!(VehicleType::Motorcycle.rate(), dec!(0.24));
        assert_eq!(VehicleType::Bicycle.rate(), dec!(0.20));
        assert_eq!(VehicleType::Van.rate(), dec!(0.27));
    }

    #[test]
    fn rate_is_fixed_at_creation() {
        let mut stored = trip("1", "2026-05-01", dec!(10), VehicleType::Van, true);
        assert_eq!(stored.rate, dec!(0.27));
        stored.rate = dec!(0.25);
        assert_eq!(compute_mileage(&[stored]).total_deduction, dec!(2.50));
    }

    #[test]
    fn personal_trips_count_towards_miles_only() {
        let trips = vec![
            trip("1", "2026-05-01", dec!(12.3), VehicleType::Car, true),
            trip("2", "2026-05-02", dec!(40), VehicleType::Car, false),
            trip("3", "2026-06-01", dec!(5), VehicleType::Bicycle, true),
        ];
        let summary = compute_mileage(&trips);
        assert_eq!(summary.total_miles, dec!(57.3));
        assert_eq!(summary.total_business_miles, dec!(17.3));
        // 12.3 * 0.45 + 5 * 0.20 = 5.535 + 1.00
        assert_eq!(summary.total_deduction, dec!(6.54));
    }

    #[test]
    fn no_tiering_beyond_ten_thousand_miles() {
        let summary = compute_mileage(&[trip("1", "2026-01-01", dec!(12000), VehicleType::Car, true)]);
        assert_eq!(summary.total_deduction, dec!(5400));
    }

    #[test]
    fn groups_by_month_newest_first() {
        let trips = vec![
            trip("a", "2026-04-03", dec!(1), VehicleType::Car, true),
            trip("b", "2026-06-10", dec!(1), VehicleType::Car, true),
            trip("c", "2026-04-20", dec!(1), VehicleType::Car, true),
        ];
        let summary = compute_mileage(&trips);
        let months: Vec<String> = summary.by_month.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(months, vec!["2026-06", "2026-04"]);
        let april: Vec<&str> = summary.by_month[1].trips.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(april, vec!["a", "c"]);
    }

    #[test]
    fn empty_locations_are_dropped() {
        let t = trip("1", "2026-05-01", dec!(1), VehicleType::Car, true);
        assert_eq!(t.start_location.as_deref(), Some("Leeds"));
        assert_eq!(t.end_location, None);
    }

    #[test]
    fn rejects_invalid_trips() {
        let base = NewTrip {
            date: date("2026-05-01"),
            purpose: "Supplier".to_string(),
            start_location: None,
            end_location: None,
            miles: dec!(0),
            vehicle: VehicleType::Car,
            is_business: true,
        };
        assert_eq!(
            MileageTrip::new("x".to_string(), base.clone()),
            Err(TripError::NonPositiveMiles(dec!(0)))
        );
        let endless = NewTrip {
            miles: Decimal::MAX,
            ..base.clone()
        };
        assert_eq!(
            MileageTrip::new("x".to_string(), endless),
            Err(TripError::TooManyMiles(Decimal::MAX))
        );
        let no_purpose = NewTrip {
            miles: dec!(3),
            purpose: "  ".to_string(),
            ..base
        };
        assert_eq!(
            MileageTrip::new("x".to_string(), no_purpose),
            Err(TripError::MissingPurpose)
        );
    }

    #[test]
    fn empty_trip_list() {
        let summary = compute_mileage(&[]);
        assert_eq!(summary.total_miles, Decimal::ZERO);
        assert_eq!(summary.total_deduction, Decimal::ZERO);
        assert!(summary.by_month.is_empty());
    }
}
