use serde::Deserialize;

use crate::types::{AdviceTip, BillScanOutcome, CollaboratorReply, RoadmapStep};

pub const BILL_NOT_FOUND: &str = "Could not find kWh value on bill.";

/// Models sometimes wrap JSON in a markdown fence even when asked not to.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Advice must be a non-empty array of `{tip, category}` with text in both.
pub fn parse_advice(raw: &str) -> CollaboratorReply<Vec<AdviceTip>> {
    match serde_json::from_str::<Vec<AdviceTip>>(strip_code_fence(raw)) {
        Ok(tips)
            if !tips.is_empty() && tips.iter().all(|t| !blank(&t.tip) && !blank(&t.category)) =>
        {
            CollaboratorReply::Parsed(tips)
        }
        _ => CollaboratorReply::Malformed(raw.to_string()),
    }
}

pub fn parse_roadmap(raw: &str) -> CollaboratorReply<Vec<RoadmapStep>> {
    match serde_json::from_str::<Vec<RoadmapStep>>(strip_code_fence(raw)) {
        Ok(steps) if !steps.is_empty() && steps.iter().all(|s| !blank(&s.title)) => {
            CollaboratorReply::Parsed(steps)
        }
        _ => CollaboratorReply::Malformed(raw.to_string()),
    }
}

#[derive(Debug, Deserialize)]
struct RawBillScan {
    kwh: Option<f64>,
    error: Option<String>,
}

/// Only a finite, positive reading counts; anything else is "not found".
pub fn parse_bill_scan(raw: &str) -> CollaboratorReply<BillScanOutcome> {
    let scan = match serde_json::from_str::<RawBillScan>(strip_code_fence(raw)) {
        Ok(scan) => scan,
        Err(_) => return CollaboratorReply::Malformed(raw.to_string()),
    };
    match scan.kwh {
        Some(kwh) if kwh.is_finite() && kwh > 0.0 => {
            CollaboratorReply::Parsed(BillScanOutcome::Reading(kwh))
        }
        _ => {
            let reason = scan
                .error
                .filter(|e| !blank(e))
                .unwrap_or_else(|| BILL_NOT_FOUND.to_string());
            CollaboratorReply::Parsed(BillScanOutcome::NotFound(reason))
        }
    }
}
