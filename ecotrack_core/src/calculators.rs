use serde::Serialize;

use crate::factors::{EmissionFactorTable, KG_PER_TONNE, MONTHS_PER_YEAR, WEEKS_PER_MONTH};
use crate::state::{ElectricityInput, LpgInput, TravelInput};

/// Travel figures in kg CO2. Travel is the only category with a daily cadence.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct TravelEmission {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
}

/// Monthly and yearly kg CO2 for categories without a daily figure.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PeriodEmission {
    pub monthly: f64,
    pub yearly: f64,
}

impl TravelEmission {
    pub fn yearly_tonnes(&self) -> f64 {
        self.yearly / KG_PER_TONNE
    }
}

impl PeriodEmission {
    pub fn yearly_tonnes(&self) -> f64 {
        self.yearly / KG_PER_TONNE
    }
}

/// Out-of-contract scalars (negative, NaN, infinite) count as zero.
pub(crate) fn non_negative(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

pub const MAX_DAYS_PER_WEEK: u8 = 7;

/// daily = km * factor; monthly = daily * days * 4.3; yearly = monthly * 12.
pub fn compute_travel_emission(
    input: &TravelInput,
    factors: &EmissionFactorTable,
) -> TravelEmission {
    let distance = non_negative(input.distance_km);
    let days = f64::from(input.days_per_week.min(MAX_DAYS_PER_WEEK));
    let daily = distance * factors.travel_kg_per_km(input.mode);
    let monthly = daily * days * WEEKS_PER_MONTH;
    TravelEmission {
        daily,
        monthly,
        yearly: monthly * MONTHS_PER_YEAR,
    }
}

/// monthly = kWh * factor; yearly = monthly * 12.
pub fn compute_electricity_emission(
    input: &ElectricityInput,
    factors: &EmissionFactorTable,
) -> PeriodEmission {
    let monthly = non_negative(input.monthly_kwh) * factors.electricity_kg_per_kwh();
    PeriodEmission {
        monthly,
        yearly: monthly * MONTHS_PER_YEAR,
    }
}

/// LPG is reported per year, so it normalizes the other way:
/// yearly = cylinders * factor; monthly = yearly / 12.
pub fn compute_lpg_emission(input: &LpgInput, factors: &EmissionFactorTable) -> PeriodEmission {
    let yearly = non_negative(input.cylinders_per_year) * factors.lpg_kg_per_cylinder();
    PeriodEmission {
        monthly: yearly / MONTHS_PER_YEAR,
        yearly,
    }
}
