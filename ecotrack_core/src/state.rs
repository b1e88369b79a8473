use serde::{Deserialize, Serialize};

use crate::calculators::non_negative;
use crate::factors::TransportMode;

pub const DEFAULT_DAYS_PER_WEEK: u8 = 5;

/// Daily commute, repeated `days_per_week` times a week.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelInput {
    pub mode: TransportMode,
    pub distance_km: f64,
    pub days_per_week: u8,
}

impl Default for TravelInput {
    fn default() -> Self {
        TravelInput {
            mode: TransportMode::Car,
            distance_km: 0.0,
            days_per_week: DEFAULT_DAYS_PER_WEEK,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricityInput {
    pub monthly_kwh: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LpgInput {
    pub cylinders_per_year: f64,
}

/// All three categories, always fully populated.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CarbonState {
    pub travel: TravelInput,
    pub electricity: ElectricityInput,
    pub lpg: LpgInput,
}

/// Partial travel update. `None` keeps the current value.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TravelPatch {
    pub mode: Option<TransportMode>,
    pub distance_km: Option<f64>,
    pub days_per_week: Option<u8>,
}

impl TravelPatch {
    pub fn mode(mode: TransportMode) -> Self {
        TravelPatch {
            mode: Some(mode),
            ..TravelPatch::default()
        }
    }

    pub fn distance_km(distance_km: f64) -> Self {
        TravelPatch {
            distance_km: Some(distance_km),
            ..TravelPatch::default()
        }
    }

    pub fn days_per_week(days: u8) -> Self {
        TravelPatch {
            days_per_week: Some(days),
            ..TravelPatch::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mode.is_none() && self.distance_km.is_none() && self.days_per_week.is_none()
    }

    fn merge_into(&self, current: TravelInput) -> TravelInput {
        TravelInput {
            mode: self.mode.unwrap_or(current.mode),
            distance_km: self.distance_km.map(non_negative).unwrap_or(current.distance_km),
            days_per_week: self.days_per_week.unwrap_or(current.days_per_week),
        }
    }
}

impl From<TravelInput> for TravelPatch {
    fn from(input: TravelInput) -> Self {
        TravelPatch {
            mode: Some(input.mode),
            distance_km: Some(input.distance_km),
            days_per_week: Some(input.days_per_week),
        }
    }
}

/// Whole-category update; exactly one category is touched.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CategoryPatch {
    Travel(TravelPatch),
    Electricity(ElectricityInput),
    Lpg(LpgInput),
}

impl CategoryPatch {
    pub fn category_name(&self) -> &'static str {
        match self {
            CategoryPatch::Travel(_) => "travel",
            CategoryPatch::Electricity(_) => "electricity",
            CategoryPatch::Lpg(_) => "lpg",
        }
    }
}

impl From<TravelPatch> for CategoryPatch {
    fn from(patch: TravelPatch) -> Self {
        CategoryPatch::Travel(patch)
    }
}

impl From<TravelInput> for CategoryPatch {
    fn from(input: TravelInput) -> Self {
        CategoryPatch::Travel(input.into())
    }
}

impl From<ElectricityInput> for CategoryPatch {
    fn from(input: ElectricityInput) -> Self {
        CategoryPatch::Electricity(input)
    }
}

impl From<LpgInput> for CategoryPatch {
    fn from(input: LpgInput) -> Self {
        CategoryPatch::Lpg(input)
    }
}

impl CarbonState {
    /// Returns the state with `patch` merged in; `self` is untouched.
    ///
    /// Negative and non-finite quantities are stored as 0 so every state
    /// this returns serializes to a snapshot that loads back.
    pub fn apply(&self, patch: &CategoryPatch) -> CarbonState {
        let mut next = *self;
        match patch {
            CategoryPatch::Travel(p) => next.travel = p.merge_into(self.travel),
            CategoryPatch::Electricity(e) => {
                next.electricity = ElectricityInput {
                    monthly_kwh: non_negative(e.monthly_kwh),
                }
            }
            CategoryPatch::Lpg(l) => {
                next.lpg = LpgInput {
                    cylinders_per_year: non_negative(l.cylinders_per_year),
                }
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CarbonState {
        CarbonState {
            travel: TravelInput {
                mode: TransportMode::Bus,
                distance_km: 12.5,
                days_per_week: 4,
            },
            electricity: ElectricityInput { monthly_kwh: 180.0 },
            lpg: LpgInput {
                cylinders_per_year: 9.0,
            },
        }
    }

    #[test]
    fn test_default_state() {
        let s = CarbonState::default();
        assert_eq!(s.travel.mode, TransportMode::Car);
        assert_eq!(s.travel.distance_km, 0.0);
        assert_eq!(s.travel.days_per_week, 5);
        assert_eq!(s.electricity.monthly_kwh, 0.0);
        assert_eq!(s.lpg.cylinders_per_year, 0.0);
    }

    #[test]
    fn test_mode_only_patch_preserves_distance_and_days() {
        let s = sample();
        let next = s.apply(&TravelPatch::mode(TransportMode::Train).into());
        assert_eq!(next.travel.mode, TransportMode::Train);
        assert_eq!(next.travel.distance_km, 12.5);
        assert_eq!(next.travel.days_per_week, 4);
        assert_eq!(next.electricity, s.electricity);
        assert_eq!(next.lpg, s.lpg);
    }

    #[test]
    fn test_electricity_patch_is_isolated() {
        let s = sample();
        let next = s.apply(&ElectricityInput { monthly_kwh: 250.0 }.into());
        assert_eq!(next.electricity.monthly_kwh, 250.0);
        assert_eq!(next.travel, s.travel);
        assert_eq!(next.lpg, s.lpg);
    }

    #[test]
    fn test_full_travel_input_replaces_everything() {
        let s = sample();
        let full = TravelInput {
            mode: TransportMode::Flight,
            distance_km: 300.0,
            days_per_week: 1,
        };
        assert_eq!(s.apply(&full.into()).travel, full);
    }

    #[test]
    fn test_out_of_range_quantities_are_stored_as_zero() {
        let s = sample();
        for bad in [-3.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let next = s
                .apply(&ElectricityInput { monthly_kwh: bad }.into())
                .apply(&LpgInput { cylinders_per_year: bad }.into())
                .apply(&TravelPatch::distance_km(bad).into());
            assert_eq!(next.electricity.monthly_kwh, 0.0, "kwh {bad}");
            assert_eq!(next.lpg.cylinders_per_year, 0.0, "cylinders {bad}");
            assert_eq!(next.travel.distance_km, 0.0, "distance {bad}");
            assert_eq!(next.travel.mode, s.travel.mode);
            assert_eq!(next.travel.days_per_week, s.travel.days_per_week);
        }
    }

    #[test]
    fn test_persisted_layout_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["travel"]["mode"], "Bus");
        assert_eq!(json["travel"]["distanceKm"], 12.5);
        assert_eq!(json["travel"]["daysPerWeek"], 4);
        assert_eq!(json["electricity"]["monthlyKwh"], 180.0);
        assert_eq!(json["lpg"]["cylindersPerYear"], 9.0);
    }
}
