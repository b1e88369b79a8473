use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownTransportMode;

/// Average weeks in a month. A deliberate simplification: every displayed
/// monthly travel figure is derived from it, so it stays fixed.
pub const WEEKS_PER_MONTH: f64 = 4.3;
pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const KG_PER_TONNE: f64 = 1000.0;

// kg CO2 per km.
pub const CAR_KG_PER_KM: f64 = 0.192;
pub const BIKE_KG_PER_KM: f64 = 0.103;
pub const BUS_KG_PER_KM: f64 = 0.027;
pub const TRAIN_KG_PER_KM: f64 = 0.041;
pub const FLIGHT_KG_PER_KM: f64 = 0.250;

/// Flat grid-average factor, kg CO2 per kWh. Not regional, not time-of-use.
pub const ELECTRICITY_KG_PER_KWH: f64 = 0.82;

/// kg CO2 per domestic cylinder (~14.2 kg LPG, full combustion).
pub const LPG_KG_PER_CYLINDER: f64 = 42.0;

/// Commute transport modes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransportMode {
    #[default]
    Car,
    Bike,
    Bus,
    Train,
    Flight,
}

impl TransportMode {
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Car,
        TransportMode::Bike,
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Flight,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Car => "Car",
            TransportMode::Bike => "Bike",
            TransportMode::Bus => "Bus",
            TransportMode::Train => "Train",
            TransportMode::Flight => "Flight",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransportMode {
    type Err = UnknownTransportMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TransportMode::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTransportMode(s.to_string()))
    }
}

/// Per-mode travel factors in kg CO2/km.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
struct TravelFactors {
    car: f64,
    bike: f64,
    bus: f64,
    train: f64,
    flight: f64,
}

/// Static conversion table from activity quantities to kg CO2.
///
/// Consumers borrow [`EmissionFactorTable::STANDARD`]; there is no way to
/// mutate the shared table at runtime.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct EmissionFactorTable {
    travel: TravelFactors,
    electricity_kg_per_kwh: f64,
    lpg_kg_per_cylinder: f64,
}

impl EmissionFactorTable {
    pub const STANDARD: EmissionFactorTable = EmissionFactorTable {
        travel: TravelFactors {
            car: CAR_KG_PER_KM,
            bike: BIKE_KG_PER_KM,
            bus: BUS_KG_PER_KM,
            train: TRAIN_KG_PER_KM,
            flight: FLIGHT_KG_PER_KM,
        },
        electricity_kg_per_kwh: ELECTRICITY_KG_PER_KWH,
        lpg_kg_per_cylinder: LPG_KG_PER_CYLINDER,
    };

    /// Total over the enum: a new mode without a factor does not compile.
    pub fn travel_kg_per_km(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Car => self.travel.car,
            TransportMode::Bike => self.travel.bike,
            TransportMode::Bus => self.travel.bus,
            TransportMode::Train => self.travel.train,
            TransportMode::Flight => self.travel.flight,
        }
    }

    pub fn electricity_kg_per_kwh(&self) -> f64 {
        self.electricity_kg_per_kwh
    }

    pub fn lpg_kg_per_cylinder(&self) -> f64 {
        self.lpg_kg_per_cylinder
    }
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        EmissionFactorTable::STANDARD
    }
}
