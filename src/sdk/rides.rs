// Ride quotes offered once a pickup and drop have been routed
use clap::ValueEnum;
use serde::Serialize;
use std::{fmt, str::FromStr};

use super::polyline::CoordinateSequence;
use super::routing::route::RoutePlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Tuk,
    Sedan,
    Suv,
    Van,
    Mini,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 5] = [
        VehicleClass::Tuk,
        VehicleClass::Sedan,
        VehicleClass::Suv,
        VehicleClass::Van,
        VehicleClass::Mini,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            VehicleClass::Tuk => "Tuk",
            VehicleClass::Sedan => "Sedan",
            VehicleClass::Suv => "SUV",
            VehicleClass::Van => "Van",
            VehicleClass::Mini => "Mini",
        }
    }

    pub fn seats(self) -> u8 {
        match self {
            VehicleClass::Tuk => 2,
            VehicleClass::Sedan => 4,
            VehicleClass::Suv => 6,
            VehicleClass::Van => 8,
            VehicleClass::Mini => 3,
        }
    }

    /// Flat fare for the class.
    pub fn price(self) -> u32 {
        match self {
            VehicleClass::Tuk => 5,
            VehicleClass::Sedan => 10,
            VehicleClass::Suv => 15,
            VehicleClass::Van => 20,
            VehicleClass::Mini => 8,
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for VehicleClass {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleClass::ALL
            .into_iter()
            .find(|v| v.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown vehicle class: {}", s))
    }
}

/// Everything the confirm-ride view needs for one vehicle.
#[derive(Debug, Clone, Serialize)]
pub struct RideQuote {
    pub vehicle: VehicleClass,
    pub seats: u8,
    pub pickup: String,
    pub drop: String,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub price: u32,
    pub route: CoordinateSequence,
}

impl RideQuote {
    pub fn new(vehicle: VehicleClass, pickup: &str, drop: &str, plan: &RoutePlan) -> Self {
        Self {
            vehicle,
            seats: vehicle.seats(),
            pickup: pickup.to_string(),
            drop: drop.to_string(),
            distance_km: plan.summary.distance_km,
            duration_minutes: plan.summary.duration_hours * 60.0,
            price: vehicle.price(),
            route: plan.geometry.clone(),
        }
    }
}

/// One quote per vehicle class, cheapest first.
pub fn quote_all(pickup: &str, drop: &str, plan: &RoutePlan) -> Vec<RideQuote> {
    let mut quotes: Vec<RideQuote> = VehicleClass::ALL
        .into_iter()
        .map(|v| RideQuote::new(v, pickup, drop, plan))
        .collect();
    quotes.sort_by_key(|q| q.price);
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::polyline::Coordinate;
    use crate::sdk::routing::route::RouteSummary;

    fn plan() -> RoutePlan {
        RoutePlan {
            summary: RouteSummary {
                distance_km: 4.0,
                duration_hours: 0.2,
            },
            geometry: vec![Coordinate::new(7.29, 80.63), Coordinate::new(7.27, 80.59)],
            encoded: String::new(),
        }
    }

    #[test]
    fn quotes_are_sorted_by_price() {
        let quotes = quote_all("Kandy", "Peradeniya", &plan());
        let order: Vec<_> = quotes.iter().map(|q| q.vehicle).collect();
        assert_eq!(
            order,
            vec![
                VehicleClass::Tuk,
                VehicleClass::Mini,
                VehicleClass::Sedan,
                VehicleClass::Suv,
                VehicleClass::Van
            ]
        );
    }

    #[test]
    fn quote_carries_route_details() {
        let quote = RideQuote::new(VehicleClass::Suv, "Kandy", "Peradeniya", &plan());
        assert_eq!(quote.seats, 6);
        assert_eq!(quote.price, 15);
        assert!((quote.duration_minutes - 12.0).abs() < 1e-9);
        assert_eq!(quote.route.len(), 2);
    }

    #[test]
    fn parses_vehicle_names_case_insensitively() {
        assert_eq!("suv".parse::<VehicleClass>(), Ok(VehicleClass::Suv));
        assert_eq!(" TUK ".parse::<VehicleClass>(), Ok(VehicleClass::Tuk));
        assert!("bike".parse::<VehicleClass>().is_err());
    }
}
