// Deterministic trace replay.
// Given a sequence of TransitionLabels, applies each to the lifecycle logic
// and returns the resulting state sequence.

use crate::invariants;
use crate::logic;
use crate::types::*;

/// Apply a single labeled transition to the state.
pub fn apply_transition(state: &State, label: &TransitionLabel) -> TransitionResult {
    match label {
        TransitionLabel::NoAction => TransitionResult {
            success: true,
            new_state: state.clone(),
        },
        TransitionLabel::Mount { value } => logic::mount_reading(state, *value),
        TransitionLabel::Replace { value } => logic::replace_reading(state, *value),
        TransitionLabel::Unmount => logic::unmount(state),
    }
}

/// Replay a full trace of labeled transitions starting from `init`.
/// Each step must succeed; panics with a descriptive message if a transition fails.
/// Returns the sequence of (label, resulting state) pairs.
pub fn replay_trace(init: State, labels: &[TransitionLabel]) -> Vec<(TransitionLabel, State)> {
    let mut trace = Vec::with_capacity(labels.len());
    let mut state = init;

    for (i, label) in labels.iter().enumerate() {
        let result = apply_transition(&state, label);
        assert!(
            result.success,
            "Transition {} failed at step {} from state:\n{}",
            label, i, state,
        );

        if let Err(violated) = invariants::check_invariants(&result.new_state) {
            panic!(
                "Invariant '{}' violated after step {} ({})\nState:\n{}",
                violated, i, label, result.new_state,
            );
        }

        state = result.new_state;
        trace.push((label.clone(), state.clone()));
    }

    trace
}
