// Consistency invariants — every surface must agree on the same tier for the
// same reading, and the lifecycle state must never carry a stale tier.

use crate::constants::MONITORED_SITE;
use crate::logic::{
    alert_for, case_card, classify, gauge_view, presentation_of, severity_rank, summarize,
};
use crate::types::*;

pub fn unmounted_has_no_reading(state: &State) -> bool {
    if !state.mounted {
        state.reading.is_none() && state.last_alert.is_none()
    } else {
        true
    }
}

pub fn tier_present_iff_reading(state: &State) -> bool {
    state.reading.is_some() == state.tier.is_some()
}

pub fn tier_matches_reading(state: &State) -> bool {
    match (state.reading, state.tier) {
        (Some(r), Some(t)) => classify(r.value()) == t,
        _ => true,
    }
}

/// A stored alert is never Safe and always matches the current tier.
pub fn alert_only_for_elevated_tier(state: &State) -> bool {
    match &state.last_alert {
        Some(alert) => alert.tier != SeverityTier::Safe && Some(alert.tier) == state.tier,
        None => state.tier.map_or(true, |t| t == SeverityTier::Safe),
    }
}

/// Gauge, carousel card, alert generator and summary tiles report one tier.
pub fn consumers_agree(state: &State) -> bool {
    let Some(reading) = state.reading else {
        return true;
    };
    let value = reading.value();
    let tier = classify(value);

    let gauge = gauge_view(value);
    let card = case_card(&CaseRecord {
        id: "current".to_string(),
        site: MONITORED_SITE.to_string(),
        toxicity: value,
    });
    let alert_tier = alert_for(MONITORED_SITE, value).map_or(SeverityTier::Safe, |a| a.tier);
    let summary = summarize(&[value]);
    let summary_tier = if summary.critical == 1 {
        SeverityTier::Critical
    } else if summary.warning == 1 {
        SeverityTier::Warning
    } else {
        SeverityTier::Safe
    };

    gauge.tier == tier
        && gauge.color == presentation_of(tier).color
        && card.tier == tier
        && card.priority == presentation_of(tier).priority
        && alert_tier == tier
        && summary_tier == tier
}

pub fn critical_has_emergency_actions(state: &State) -> bool {
    if state.tier == Some(SeverityTier::Critical) {
        let actions = presentation_of(SeverityTier::Critical).actions;
        actions.iter().any(|a| a.to_lowercase().contains("isolate"))
            && actions.iter().any(|a| a.to_lowercase().contains("emergency"))
    } else {
        true
    }
}

/// All individual invariants with names for reporting.
pub const ALL_INVARIANTS: &[(&str, fn(&State) -> bool)] = &[
    ("unmountedHasNoReading", unmounted_has_no_reading),
    ("tierPresentIffReading", tier_present_iff_reading),
    ("tierMatchesReading", tier_matches_reading),
    ("alertOnlyForElevatedTier", alert_only_for_elevated_tier),
    ("consumersAgree", consumers_agree),
    ("criticalHasEmergencyActions", critical_has_emergency_actions),
];

pub fn safety_invariant(state: &State) -> bool {
    ALL_INVARIANTS.iter().all(|(_, check)| check(state))
}

/// Check all invariants and return the name of the first violated one, if any.
pub fn check_invariants(state: &State) -> Result<(), &'static str> {
    for (name, check) in ALL_INVARIANTS {
        if !check(state) {
            return Err(*name);
        }
    }
    Ok(())
}

/// Classifier self-check: for any two readings, the higher one never gets a
/// lower tier rank. Order-independent, so it says nothing about a trace.
pub fn monotone_pair(a: ToxicityValue, b: ToxicityValue) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    severity_rank(classify(lo)) <= severity_rank(classify(hi))
}
