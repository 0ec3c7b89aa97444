// Simulator — random mount/replace/unmount walks standing in for the
// dashboard's timer-driven mock feed. Invariants are checked after every step.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::constants::*;
use crate::error::Result;
use crate::invariants;
use crate::logic;
use crate::types::*;

/// The set of actions the simulator can choose from.
#[derive(Debug, Clone, Copy)]
pub enum Action {
    Mount,
    Replace,
    Unmount,
}

const ALL_ACTIONS: &[Action] = &[Action::Mount, Action::Replace, Action::Unmount];

pub use crate::logic::init_state;

/// Draw a reading: either a fixed sample (boundaries included) or a uniform
/// value from the configured range, then apply the out-of-range policy.
/// The config must already be validated.
pub(crate) fn sample_reading(config: &SimulationConfig, rng: &mut impl Rng) -> ToxicityValue {
    let raw = if rng.gen_bool(config.sample_bias) {
        SAMPLE_READINGS.choose(rng).copied().unwrap_or(SCALE_MIN)
    } else {
        let (lo, hi) = config.value_range;
        rng.gen_range(lo..hi)
    };
    logic::normalize(raw, config.policy)
}

struct LabeledResult {
    result: TransitionResult,
    label: TransitionLabel,
}

/// Execute a single step: shuffle the actions and take the first enabled one.
pub(crate) fn step(
    state: &State,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> (TransitionLabel, State) {
    let mut actions: Vec<Action> = ALL_ACTIONS.to_vec();
    actions.shuffle(rng);

    for action in &actions {
        let labeled = execute_action_labeled(state, *action, config, rng);
        if labeled.result.success {
            return (labeled.label, labeled.result.new_state);
        }
    }

    (TransitionLabel::NoAction, state.clone())
}

fn execute_action_labeled(
    state: &State,
    action: Action,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> LabeledResult {
    match action {
        Action::Mount => {
            let value = sample_reading(config, rng);
            LabeledResult {
                result: logic::mount_reading(state, value),
                label: TransitionLabel::Mount { value },
            }
        }
        Action::Replace => {
            let value = sample_reading(config, rng);
            LabeledResult {
                result: logic::replace_reading(state, value),
                label: TransitionLabel::Replace { value },
            }
        }
        Action::Unmount => LabeledResult {
            result: logic::unmount(state),
            label: TransitionLabel::Unmount,
        },
    }
}

/// Result of running one simulation trace.
pub struct TraceResult {
    pub steps: usize,
    pub violation: Option<(&'static str, usize, State)>,
    pub final_state: State,
}

/// Run a single trace for up to `max_steps`, checking invariants after each step.
pub(crate) fn run_trace(config: &SimulationConfig, rng: &mut impl Rng, verbose: bool) -> TraceResult {
    let mut state = init_state();

    if verbose {
        println!("[State 0] init");
        println!("{}\n", state);
    }

    if let Err(violated) = invariants::check_invariants(&state) {
        return TraceResult {
            steps: 0,
            violation: Some((violated, 0, state.clone())),
            final_state: state,
        };
    }

    for step_num in 1..=config.max_steps {
        let (label, new_state) = step(&state, config, rng);
        debug!(step = step_num, %label, "applied transition");

        if verbose && new_state != state {
            println!("[State {}] {}", step_num, label);
            println!("{}\n", new_state);
        }

        state = new_state;

        if let Err(violated) = invariants::check_invariants(&state) {
            warn!(invariant = violated, step = step_num, "invariant violated");
            return TraceResult {
                steps: step_num,
                violation: Some((violated, step_num, state.clone())),
                final_state: state,
            };
        }
    }

    TraceResult {
        steps: config.max_steps,
        violation: None,
        final_state: state,
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

/// Run many traces from one seeded RNG, stopping at the first violation.
pub fn run_simulation(config: &SimulationConfig, verbose: bool) -> Result<SimulationResult> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let start = std::time::Instant::now();
    let mut violation = None;
    let mut alerts_raised: u64 = 0;

    for trace_num in 0..config.max_samples {
        let result = run_trace(config, &mut rng, verbose && trace_num == 0);
        alerts_raised += u64::from(result.final_state.alerts_raised);

        if let Some((inv_name, step, state)) = result.violation {
            violation = Some(ViolationInfo {
                invariant: inv_name,
                trace: trace_num,
                step,
                state,
            });
            break;
        }
    }

    let elapsed = start.elapsed();
    info!(
        seed,
        traces = config.max_samples,
        alerts_raised,
        violated = violation.is_some(),
        "simulation finished"
    );

    Ok(SimulationResult {
        max_steps: config.max_steps,
        max_samples: config.max_samples,
        seed,
        policy: config.policy,
        elapsed,
        alerts_raised,
        violation,
    })
}

pub struct ViolationInfo {
    pub invariant: &'static str,
    pub trace: usize,
    pub step: usize,
    pub state: State,
}

pub struct SimulationResult {
    pub max_steps: usize,
    pub max_samples: usize,
    pub seed: u64,
    pub policy: ReadingPolicy,
    pub elapsed: std::time::Duration,
    pub alerts_raised: u64,
    pub violation: Option<ViolationInfo>,
}

impl std::fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let traces_per_sec = self.max_samples as f64 / self.elapsed.as_secs_f64().max(1e-9);
        writeln!(f)?;
        match &self.violation {
            None => {
                writeln!(
                    f,
                    "[ok] No violation found ({:.0}ms at {:.0} traces/second).",
                    self.elapsed.as_millis(),
                    traces_per_sec,
                )?;
                writeln!(
                    f,
                    "Checked {} traces of {} steps each ({:?} policy, {} alerts raised).",
                    self.max_samples, self.max_steps, self.policy, self.alerts_raised,
                )?;
            }
            Some(v) => {
                writeln!(
                    f,
                    "[VIOLATION] Invariant '{}' violated at trace {} step {}.",
                    v.invariant, v.trace, v.step,
                )?;
                writeln!(f, "State at violation:")?;
                writeln!(f, "{}", v.state)?;
            }
        }
        writeln!(f, "Seed: {} ", self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn seeded(policy: ReadingPolicy) -> SimulationConfig {
        SimulationConfig {
            max_steps: 30,
            max_samples: 300,
            seed: Some(42),
            policy,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn default_walk_finds_no_violation() {
        let result = run_simulation(&seeded(ReadingPolicy::Passthrough), false).unwrap();
        assert!(result.violation.is_none());
        assert!(result.alerts_raised > 0);
    }

    #[test]
    fn inverted_range_is_rejected_before_sampling() {
        let config = SimulationConfig {
            value_range: (50.0, 10.0),
            sample_bias: 0.0,
            ..seeded(ReadingPolicy::Passthrough)
        };
        assert!(matches!(
            run_simulation(&config, false),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn out_of_unit_bias_is_rejected() {
        let config = SimulationConfig {
            sample_bias: 1.5,
            ..seeded(ReadingPolicy::Passthrough)
        };
        assert!(matches!(
            run_simulation(&config, false),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn clamp_keeps_readings_in_scale() {
        let config = seeded(ReadingPolicy::Clamp);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let v = sample_reading(&config, &mut rng);
            assert!((SCALE_MIN..=SCALE_MAX).contains(&v));
        }
    }

    #[test]
    fn same_seed_same_trace() {
        let config = seeded(ReadingPolicy::Passthrough);
        let a = run_trace(&config, &mut StdRng::seed_from_u64(9), false);
        let b = run_trace(&config, &mut StdRng::seed_from_u64(9), false);
        assert_eq!(a.final_state, b.final_state);
    }
}
