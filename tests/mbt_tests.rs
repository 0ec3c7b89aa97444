// Integration tests — deterministic trace replay via TransitionLabel sequences.
// Each test replays a hardcoded label sequence and asserts the resulting states.

use toxicity_sim::mbt::replay_trace;
use toxicity_sim::simulator::init_state;
use toxicity_sim::types::*;

/// 1. Mount a safe reading, escalate through Warning to Critical, then unmount.
#[test]
fn trace_escalation() {
    let labels = vec![
        TransitionLabel::Mount { value: 30.0 },
        TransitionLabel::Replace { value: 55.0 },
        TransitionLabel::Replace { value: 85.0 },
        TransitionLabel::Unmount,
    ];

    let trace = replay_trace(init_state(), &labels);

    assert_eq!(trace[0].1.tier, Some(SeverityTier::Safe));
    assert!(trace[0].1.last_alert.is_none());

    assert_eq!(trace[1].1.tier, Some(SeverityTier::Warning));
    assert_eq!(trace[1].1.last_alert.as_ref().unwrap().priority, Priority::Medium);

    let critical = &trace[2].1;
    assert_eq!(critical.tier, Some(SeverityTier::Critical));
    assert_eq!(critical.alerts_raised, 2);

    let final_state = &trace.last().unwrap().1;
    assert!(!final_state.mounted);
    assert!(final_state.reading.is_none());
    assert_eq!(final_state.alerts_raised, 2);
}

/// 2. Boundary values sit in the lower tier.
#[test]
fn trace_boundaries() {
    let labels = vec![
        TransitionLabel::Mount { value: 40.0 },
        TransitionLabel::Replace { value: 40.0001 },
        TransitionLabel::Replace { value: 70.0 },
        TransitionLabel::Replace { value: 70.0001 },
    ];

    let trace = replay_trace(init_state(), &labels);
    let tiers: Vec<_> = trace.iter().map(|(_, s)| s.tier.unwrap()).collect();
    assert_eq!(
        tiers,
        vec![
            SeverityTier::Safe,
            SeverityTier::Warning,
            SeverityTier::Warning,
            SeverityTier::Critical,
        ]
    );
}

/// 3. De-escalation clears the stored alert but keeps the session counter.
#[test]
fn trace_recovery() {
    let labels = vec![
        TransitionLabel::Mount { value: 92.0 },
        TransitionLabel::Replace { value: 15.0 },
        TransitionLabel::NoAction,
    ];

    let trace = replay_trace(init_state(), &labels);
    let final_state = &trace.last().unwrap().1;
    assert_eq!(final_state.tier, Some(SeverityTier::Safe));
    assert!(final_state.last_alert.is_none());
    assert_eq!(final_state.alerts_raised, 1);
}

/// 4. Remount after unmount starts from a fresh reading.
#[test]
fn trace_remount() {
    let labels = vec![
        TransitionLabel::Mount { value: 60.0 },
        TransitionLabel::Unmount,
        TransitionLabel::Mount { value: 5.0 },
    ];

    let trace = replay_trace(init_state(), &labels);
    let final_state = &trace.last().unwrap().1;
    assert!(final_state.mounted);
    assert_eq!(final_state.reading.map(|r| r.value()), Some(5.0));
    assert_eq!(final_state.tier, Some(SeverityTier::Safe));
}

/// 5. Out-of-range readings fall through without clamping.
#[test]
fn trace_out_of_range_passthrough() {
    let labels = vec![
        TransitionLabel::Mount { value: -12.0 },
        TransitionLabel::Replace { value: 140.0 },
    ];

    let trace = replay_trace(init_state(), &labels);
    assert_eq!(trace[0].1.tier, Some(SeverityTier::Safe));
    assert_eq!(trace[1].1.tier, Some(SeverityTier::Critical));
    assert_eq!(trace[1].1.reading.map(|r| r.value()), Some(140.0));
}

#[test]
#[should_panic(expected = "failed at step 1")]
fn trace_double_mount_panics() {
    let labels = vec![
        TransitionLabel::Mount { value: 10.0 },
        TransitionLabel::Mount { value: 20.0 },
    ];
    replay_trace(init_state(), &labels);
}
