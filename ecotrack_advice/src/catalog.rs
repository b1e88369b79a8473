use serde::Serialize;

use crate::types::AdviceTip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReductionTip {
    pub title: &'static str,
    pub description: &'static str,
}

pub const REDUCTION_TIPS: [ReductionTip; 5] = [
    ReductionTip {
        title: "Carpool or take public transit",
        description: "Sharing a ride divides its emissions between everyone on board.",
    },
    ReductionTip {
        title: "Switch to LEDs",
        description: "LED bulbs use a fraction of the energy of incandescent ones.",
    },
    ReductionTip {
        title: "Buy efficient appliances",
        description: "Pick devices with a high energy-efficiency rating.",
    },
    ReductionTip {
        title: "Go solar",
        description: "Rooftop panels offset part of your grid electricity.",
    },
    ReductionTip {
        title: "Eat local",
        description: "Locally produced food travels fewer kilometres to reach you.",
    },
];

pub const SUSTAINABILITY_FACTS: [&str; 5] = [
    "The average global carbon footprint is about 4 tonnes per person per year.",
    "Public transport can cut travel emissions by up to 75%.",
    "LED lighting saves 50-80% of lighting energy.",
    "Eating less meat noticeably lowers a food-related footprint.",
    "One tree absorbs roughly 22 kg of CO2 per year.",
];

/// Shown whenever the advice service fails or replies with garbage.
pub fn fallback_advice() -> Vec<AdviceTip> {
    vec![
        AdviceTip::new(
            "Reduce high-emission travel by using bikes for short distances.",
            "Travel",
        ),
        AdviceTip::new(
            "Unplug electronics when not in use to stop 'vampire' energy loss.",
            "Electricity",
        ),
    ]
}

/// Rotates through the facts, one per day number.
pub fn fact_for_day(day: u64) -> &'static str {
    SUSTAINABILITY_FACTS[(day % SUSTAINABILITY_FACTS.len() as u64) as usize]
}
