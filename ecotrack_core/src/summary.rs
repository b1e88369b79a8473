use std::fmt;

use serde::Serialize;

use crate::calculators::{
    compute_electricity_emission, compute_lpg_emission, compute_travel_emission,
};
use crate::factors::{EmissionFactorTable, KG_PER_TONNE, MONTHS_PER_YEAR};
use crate::state::CarbonState;

/// Reference monthly footprints (kg CO2 per person).
pub const INDIA_AVG_MONTHLY_KG: f64 = 158.0;
pub const GLOBAL_AVG_MONTHLY_KG: f64 = 375.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Travel,
    Electricity,
    Lpg,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Travel, Category::Electricity, Category::Lpg];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Travel => "Travel",
            Category::Electricity => "Electricity",
            Category::Lpg => "LPG",
        }
    }

    /// Chart colour for the category segment.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Travel => "#3b82f6",
            Category::Electricity => "#f59e0b",
            Category::Lpg => "#ef4444",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-category monthly kg CO2 plus their total.
///
/// Only constructible from the three category figures, so `total` is
/// always their sum. Derived on every read, never persisted.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct EmissionSummary {
    travel: f64,
    electricity: f64,
    lpg: f64,
    total: f64,
}

/// One pie segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub name: &'static str,
    pub value: f64,
    pub color: &'static str,
}

/// One bar of the "you vs. averages" comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Benchmark {
    pub name: &'static str,
    pub monthly_kg: f64,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl EmissionSummary {
    pub fn from_components(travel: f64, electricity: f64, lpg: f64) -> Self {
        EmissionSummary {
            travel,
            electricity,
            lpg,
            total: travel + electricity + lpg,
        }
    }

    pub fn from_state(state: &CarbonState, factors: &EmissionFactorTable) -> Self {
        let travel = compute_travel_emission(&state.travel, factors);
        let electricity = compute_electricity_emission(&state.electricity, factors);
        let lpg = compute_lpg_emission(&state.lpg, factors);
        Self::from_components(travel.monthly, electricity.monthly, lpg.monthly)
    }

    pub fn travel(&self) -> f64 {
        self.travel
    }

    pub fn electricity(&self) -> f64 {
        self.electricity
    }

    pub fn lpg(&self) -> f64 {
        self.lpg
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn category(&self, category: Category) -> f64 {
        match category {
            Category::Travel => self.travel,
            Category::Electricity => self.electricity,
            Category::Lpg => self.lpg,
        }
    }

    pub fn yearly_total_kg(&self) -> f64 {
        self.total * MONTHS_PER_YEAR
    }

    pub fn yearly_total_tonnes(&self) -> f64 {
        self.yearly_total_kg() / KG_PER_TONNE
    }

    /// Largest monthly contributor; ties resolve in `Category::ALL` order.
    pub fn dominant_category(&self) -> Option<Category> {
        if self.total <= 0.0 {
            return None;
        }
        let mut best = Category::Travel;
        for c in Category::ALL {
            if self.category(c) > self.category(best) {
                best = c;
            }
        }
        Some(best)
    }

    pub fn chart_slices(&self) -> [ChartSlice; 3] {
        Category::ALL.map(|c| ChartSlice {
            name: c.label(),
            value: round2(self.category(c)),
            color: c.color(),
        })
    }

    pub fn comparison(&self) -> [Benchmark; 3] {
        [
            Benchmark {
                name: "You",
                monthly_kg: self.total,
            },
            Benchmark {
                name: "India Avg",
                monthly_kg: INDIA_AVG_MONTHLY_KG,
            },
            Benchmark {
                name: "Global Avg",
                monthly_kg: GLOBAL_AVG_MONTHLY_KG,
            },
        ]
    }
}
