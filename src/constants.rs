// Constants — tier boundaries, presentation content and sampling sets.

use crate::types::ToxicityValue;

// Tier boundaries (percent). Both comparisons are strict `>`.
pub const WARNING_THRESHOLD: ToxicityValue = 40.0;
pub const CRITICAL_THRESHOLD: ToxicityValue = 70.0;

// Nominal reading scale
pub const SCALE_MIN: ToxicityValue = 0.0;
pub const SCALE_MAX: ToxicityValue = 100.0;

// Recommended actions per tier, in display order
pub const SAFE_ACTIONS: &[&str] = &[
    "Continue routine monitoring",
    "Log reading in weekly report",
];
pub const WARNING_ACTIONS: &[&str] = &[
    "Increase sampling frequency",
    "Notify water quality team",
    "Prepare treatment adjustment",
];
pub const CRITICAL_ACTIONS: &[&str] = &[
    "Isolate affected water source",
    "Initiate emergency response protocol",
    "Issue public health advisory",
    "Dispatch field team for resampling",
];

// Derived cosmetic metrics per tier: (pH, turbidity NTU, chlorine mg/L, bacteria CFU/100mL)
pub const SAFE_METRICS: (f64, f64, f64, u32) = (7.4, 0.8, 1.2, 0);
pub const WARNING_METRICS: (f64, f64, f64, u32) = (7.4, 3.5, 0.6, 45);
pub const CRITICAL_METRICS: (f64, f64, f64, u32) = (9.2, 12.0, 0.1, 320);

// Nondeterministic selection set for the simulator, boundaries included
pub const SAMPLE_READINGS: &[ToxicityValue] = &[
    0.0, 12.5, 30.0, 40.0, 40.0001, 55.0, 70.0, 70.0001, 85.0, 100.0,
];

// Default uniform sampling range, wide enough to exercise out-of-range handling
pub const DEFAULT_VALUE_RANGE: (ToxicityValue, ToxicityValue) = (-10.0, 110.0);

// Site label used by the lifecycle monitor when raising alerts
pub const MONITORED_SITE: &str = "Primary intake";
