use ecotrack_core::{CarbonState, EmissionSummary};

pub const ADVICE_TIP_COUNT: usize = 3;
pub const MAX_TIP_WORDS: usize = 30;
pub const ROADMAP_STEPS: usize = 4;

pub const BILL_SCAN_INSTRUCTION: &str = "Read this electricity bill and extract the total \
units consumed for the billing month in kWh. Reply with JSON holding a single numeric key \
'kwh'. If no reading is visible, reply with an 'error' key explaining why.";

pub const CHAT_SYSTEM_INSTRUCTION: &str = "You are the EcoTrack assistant. Help people \
understand their household carbon footprint and suggest practical ways to shrink it. Be \
encouraging, concise and scientifically accurate.";

pub fn advice_prompt(summary: &EmissionSummary) -> String {
    format!(
        "Monthly carbon footprint of a household, in kg CO2:\n\
         - Travel: {:.2}\n\
         - Electricity: {:.2}\n\
         - LPG: {:.2}\n\
         - Total: {:.2}\n\n\
         Give {ADVICE_TIP_COUNT} specific, actionable and encouraging tips to reduce it. \
         Keep each tip under {MAX_TIP_WORDS} words and tag it with the category it targets.",
        summary.travel(),
        summary.electricity(),
        summary.lpg(),
        summary.total(),
    )
}

pub fn roadmap_prompt(state: &CarbonState, summary: &EmissionSummary) -> String {
    let leverage = match summary.dominant_category() {
        Some(c) => format!("The largest share comes from {c}; start there."),
        None => "No emissions are recorded yet; focus on habits that keep it low.".to_string(),
    };
    format!(
        "Build a {ROADMAP_STEPS}-step carbon reduction roadmap for a household with:\n\
         - Monthly travel: {:.1} kg CO2 (mode: {})\n\
         - Monthly electricity: {:.1} kg CO2 ({} kWh)\n\
         - Monthly cooking fuel: {:.1} kg CO2\n\n\
         {leverage} For each step give a title, a description, the estimated monthly \
         saving in kg CO2 and a timeline. Return JSON.",
        summary.travel(),
        state.travel.mode,
        summary.electricity(),
        state.electricity.monthly_kwh,
        summary.lpg(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecotrack_core::{
        ElectricityInput, EmissionFactorTable, LpgInput, TransportMode, TravelInput,
    };

    fn state() -> CarbonState {
        CarbonState {
            travel: TravelInput {
                mode: TransportMode::Car,
                distance_km: 10.0,
                days_per_week: 5,
            },
            electricity: ElectricityInput { monthly_kwh: 200.0 },
            lpg: LpgInput {
                cylinders_per_year: 12.0,
            },
        }
    }

    #[test]
    fn test_advice_prompt_embeds_summary() {
        let s = EmissionSummary::from_state(&state(), &EmissionFactorTable::STANDARD);
        let p = advice_prompt(&s);
        assert!(p.contains("Travel: 41.28"));
        assert!(p.contains("Electricity: 164.00"));
        assert!(p.contains("LPG: 42.00"));
        assert!(p.contains("Total: 247.28"));
        assert!(p.contains("Give 3 specific"));
    }

    #[test]
    fn test_roadmap_prompt_names_leverage_point() {
        let st = state();
        let s = EmissionSummary::from_state(&st, &EmissionFactorTable::STANDARD);
        let p = roadmap_prompt(&st, &s);
        assert!(p.contains("4-step"));
        assert!(p.contains("Monthly travel: 41.3 kg CO2 (mode: Car)"));
        assert!(p.contains("(200 kWh)"));
        assert!(p.contains("largest share comes from Electricity"));
    }

    #[test]
    fn test_roadmap_prompt_without_emissions() {
        let st = CarbonState::default();
        let s = EmissionSummary::from_state(&st, &EmissionFactorTable::STANDARD);
        assert!(roadmap_prompt(&st, &s).contains("No emissions are recorded yet"));
    }
}
