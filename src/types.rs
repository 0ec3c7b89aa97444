// Types — readings, tiers, presentation bundles and the reading lifecycle state.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Raw toxicity percentage as supplied by mock records.
pub type ToxicityValue = f64;

/// A single aggregate contamination reading.
///
/// Only finiteness is enforced; the [0, 100] scale is left to [`ReadingPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ToxicityReading(ToxicityValue);

impl ToxicityReading {
    pub fn new(value: ToxicityValue) -> Result<Self> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(Error::NonFiniteReading(value))
        }
    }

    pub fn value(self) -> ToxicityValue {
        self.0
    }
}

/// Severity tier, ordered Safe < Warning < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Safe,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Cosmetic/content bundle rendered for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityPresentation {
    pub label: &'static str,
    pub color: ColorToken,
    pub actions: &'static [&'static str],
    pub priority: Priority,
}

/// Secondary "measurements" synthesized from the tier, not from sensors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub ph: f64,
    pub turbidity_ntu: f64,
    pub chlorine_mg_l: f64,
    pub bacteria_cfu_per_100ml: u32,
}

/// How readings outside [0, 100] are treated before classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingPolicy {
    /// Classify the raw value; negatives fall into Safe, >100 into Critical.
    #[default]
    Passthrough,
    /// Pin to [0, 100] first.
    Clamp,
}

/// Mock case record feeding the priority carousel, filters and summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRecord {
    pub id: String,
    pub site: String,
    pub toxicity: ToxicityValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeView {
    pub value: ToxicityValue,
    pub tier: SeverityTier,
    pub label: &'static str,
    pub color: ColorToken,
    pub metrics: DerivedMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseCard {
    pub id: String,
    pub site: String,
    pub toxicity: ToxicityValue,
    pub tier: SeverityTier,
    pub label: &'static str,
    pub color: ColorToken,
    pub priority: Priority,
    pub actions: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub site: String,
    pub value: ToxicityValue,
    pub tier: SeverityTier,
    pub priority: Priority,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub safe: usize,
    pub warning: usize,
    pub critical: usize,
    pub mean: Option<ToxicityValue>,
    pub peak: Option<ToxicityValue>,
}

/// Reading lifecycle for one mounted dashboard surface.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub mounted: bool,
    pub reading: Option<ToxicityReading>,
    pub tier: Option<SeverityTier>,
    pub alerts_raised: u32,
    pub last_alert: Option<Alert>,
}

/// Labels for each lifecycle transition, enabling deterministic trace replay.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionLabel {
    NoAction,
    Mount { value: ToxicityValue },
    Replace { value: ToxicityValue },
    Unmount,
}

impl std::fmt::Display for TransitionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionLabel::NoAction => write!(f, "NoAction"),
            TransitionLabel::Mount { value } => write!(f, "Mount({})", value),
            TransitionLabel::Replace { value } => write!(f, "Replace({})", value),
            TransitionLabel::Unmount => write!(f, "Unmount"),
        }
    }
}

/// Result of a pure transition function.
pub struct TransitionResult {
    pub success: bool,
    pub new_state: State,
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  mounted:        {}", self.mounted)?;
        match self.reading {
            Some(r) => writeln!(f, "  reading:        {:.4} %", r.value())?,
            None => writeln!(f, "  reading:        -")?,
        }
        match self.tier {
            Some(t) => writeln!(f, "  tier:           {}", t)?,
            None => writeln!(f, "  tier:           -")?,
        }
        writeln!(f, "  alerts_raised:  {}", self.alerts_raised)?;
        match &self.last_alert {
            Some(a) => write!(f, "  last_alert:     {}", a.message),
            None => write!(f, "  last_alert:     -"),
        }
    }
}
