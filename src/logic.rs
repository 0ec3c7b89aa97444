// Pure functions — the classification rule, its presentation table, every
// consumer surface built on top of it, and the reading lifecycle transitions.

use tracing::{debug, warn};

use crate::constants::*;
use crate::types::*;

/// Map a reading to its tier. Boundaries are strict: 40 is Safe, 70 is Warning.
///
/// Total over `f64`: negatives and NaN fall through to Safe, anything above
/// 100 is Critical.
pub fn classify(value: ToxicityValue) -> SeverityTier {
    if value > CRITICAL_THRESHOLD {
        SeverityTier::Critical
    } else if value > WARNING_THRESHOLD {
        SeverityTier::Warning
    } else {
        SeverityTier::Safe
    }
}

pub fn severity_rank(tier: SeverityTier) -> u8 {
    match tier {
        SeverityTier::Safe => 0,
        SeverityTier::Warning => 1,
        SeverityTier::Critical => 2,
    }
}

pub fn presentation_of(tier: SeverityTier) -> SeverityPresentation {
    match tier {
        SeverityTier::Safe => SeverityPresentation {
            label: "Normal",
            color: ColorToken::Green,
            actions: SAFE_ACTIONS,
            priority: Priority::Low,
        },
        SeverityTier::Warning => SeverityPresentation {
            label: "Warning",
            color: ColorToken::Yellow,
            actions: WARNING_ACTIONS,
            priority: Priority::Medium,
        },
        SeverityTier::Critical => SeverityPresentation {
            label: "Critical",
            color: ColorToken::Red,
            actions: CRITICAL_ACTIONS,
            priority: Priority::High,
        },
    }
}

/// Cosmetic secondary metrics keyed by tier.
pub fn derived_metrics(tier: SeverityTier) -> DerivedMetrics {
    let (ph, turbidity_ntu, chlorine_mg_l, bacteria_cfu_per_100ml) = match tier {
        SeverityTier::Safe => SAFE_METRICS,
        SeverityTier::Warning => WARNING_METRICS,
        SeverityTier::Critical => CRITICAL_METRICS,
    };
    DerivedMetrics {
        ph,
        turbidity_ntu,
        chlorine_mg_l,
        bacteria_cfu_per_100ml,
    }
}

pub fn is_out_of_range(value: ToxicityValue) -> bool {
    !(SCALE_MIN..=SCALE_MAX).contains(&value)
}

/// Apply the out-of-range policy to a raw value.
pub fn normalize(value: ToxicityValue, policy: ReadingPolicy) -> ToxicityValue {
    if is_out_of_range(value) {
        warn!(value, ?policy, "toxicity reading outside 0-100 scale");
    }
    match policy {
        ReadingPolicy::Passthrough => value,
        ReadingPolicy::Clamp => value.clamp(SCALE_MIN, SCALE_MAX),
    }
}

pub fn classify_with(value: ToxicityValue, policy: ReadingPolicy) -> SeverityTier {
    classify(normalize(value, policy))
}

pub fn gauge_view(value: ToxicityValue) -> GaugeView {
    let tier = classify(value);
    let presentation = presentation_of(tier);
    GaugeView {
        value,
        tier,
        label: presentation.label,
        color: presentation.color,
        metrics: derived_metrics(tier),
    }
}

pub fn case_card(case: &CaseRecord) -> CaseCard {
    let tier = classify(case.toxicity);
    let presentation = presentation_of(tier);
    CaseCard {
        id: case.id.clone(),
        site: case.site.clone(),
        toxicity: case.toxicity,
        tier,
        label: presentation.label,
        color: presentation.color,
        priority: presentation.priority,
        actions: presentation.actions,
    }
}

/// Live alert for a reading; Safe readings raise nothing.
pub fn alert_for(site: &str, value: ToxicityValue) -> Option<Alert> {
    let tier = classify(value);
    if tier == SeverityTier::Safe {
        return None;
    }
    let presentation = presentation_of(tier);
    let first_action = presentation.actions.first().copied().unwrap_or("Review reading");
    Some(Alert {
        site: site.to_string(),
        value,
        tier,
        priority: presentation.priority,
        message: format!(
            "{} toxicity at {}: {:.1}% - {}",
            presentation.label, site, value, first_action
        ),
    })
}

/// Tier counts, mean and peak for the summary tiles.
///
/// Non-finite values are counted (NaN lands in Safe, like `classify`) but are
/// left out of `mean` and `peak`.
pub fn summarize(values: &[ToxicityValue]) -> DashboardSummary {
    let mut summary = DashboardSummary {
        total: values.len(),
        safe: 0,
        warning: 0,
        critical: 0,
        mean: None,
        peak: None,
    };
    let mut finite_sum = 0.0;
    let mut finite_count = 0usize;
    for &v in values {
        match classify(v) {
            SeverityTier::Safe => summary.safe += 1,
            SeverityTier::Warning => summary.warning += 1,
            SeverityTier::Critical => summary.critical += 1,
        }
        if v.is_finite() {
            finite_sum += v;
            finite_count += 1;
            summary.peak = Some(summary.peak.map_or(v, |p: ToxicityValue| p.max(v)));
        }
    }
    if finite_count > 0 {
        summary.mean = Some(finite_sum / finite_count as ToxicityValue);
    }
    summary
}

/// Tier filter plus case-insensitive search over id and site. Keeps input order.
pub fn filter_cases<'a>(
    cases: &'a [CaseRecord],
    tier: Option<SeverityTier>,
    query: &str,
) -> Vec<&'a CaseRecord> {
    let needle = query.trim().to_lowercase();
    cases
        .iter()
        .filter(|c| tier.map_or(true, |t| classify(c.toxicity) == t))
        .filter(|c| {
            needle.is_empty()
                || c.id.to_lowercase().contains(&needle)
                || c.site.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Fresh, unmounted lifecycle state.
pub fn init_state() -> State {
    State {
        mounted: false,
        reading: None,
        tier: None,
        alerts_raised: 0,
        last_alert: None,
    }
}

fn with_reading(state: &State, reading: ToxicityReading) -> State {
    let tier = classify(reading.value());
    let alert = alert_for(MONITORED_SITE, reading.value());
    State {
        mounted: true,
        reading: Some(reading),
        tier: Some(tier),
        alerts_raised: state.alerts_raised + u32::from(alert.is_some()),
        last_alert: alert,
    }
}

pub fn mount_reading(state: &State, value: ToxicityValue) -> TransitionResult {
    if state.mounted {
        return TransitionResult {
            success: false,
            new_state: state.clone(),
        };
    }
    match ToxicityReading::new(value) {
        Ok(reading) => TransitionResult {
            success: true,
            new_state: with_reading(state, reading),
        },
        Err(err) => {
            debug!(%err, "mount rejected");
            TransitionResult {
                success: false,
                new_state: state.clone(),
            }
        }
    }
}

pub fn replace_reading(state: &State, value: ToxicityValue) -> TransitionResult {
    if !state.mounted {
        return TransitionResult {
            success: false,
            new_state: state.clone(),
        };
    }
    match ToxicityReading::new(value) {
        Ok(reading) => TransitionResult {
            success: true,
            new_state: with_reading(state, reading),
        },
        Err(err) => {
            debug!(%err, "replace rejected");
            TransitionResult {
                success: false,
                new_state: state.clone(),
            }
        }
    }
}

pub fn unmount(state: &State) -> TransitionResult {
    if !state.mounted {
        TransitionResult {
            success: false,
            new_state: state.clone(),
        }
    } else {
        TransitionResult {
            success: true,
            new_state: State {
                mounted: false,
                reading: None,
                tier: None,
                last_alert: None,
                ..state.clone()
            },
        }
    }
}
