//! Environment API tests: the reset/step/terminate contract.

use crate::action::{ThrustGimbal, ThrustOnly};
use crate::config::LanderConfig;
use crate::constants::TIMESTEP;
use crate::env::Lander;
use crate::error::LanderError;
use crate::termination::TerminationReason;

fn free_fall_env(seed: u64) -> Lander {
    // Default curriculum: fixed 1 m spawn, upright, turning disabled.
    Lander::from_config(LanderConfig::default().with_seed(seed)).unwrap()
}

/// Run with a constant action until the episode ends, returning the
/// number of steps and the terminal reason.
fn run_to_termination(env: &mut Lander, action: usize, max_steps: usize) -> (usize, TerminationReason) {
    for step in 1..=max_steps {
        let outcome = env.step(action).unwrap();
        if let Some(reason) = outcome.terminated {
            return (step, reason);
        }
    }
    panic!("episode did not terminate within {max_steps} steps");
}

// ============================================================================
// Termination Contract
// ============================================================================

#[test]
fn should_terminate_exactly_once_and_refuse_further_steps() {
    let mut env = free_fall_env(1);

    let mut terminations = 0;
    for _ in 0..200 {
        match env.step(0) {
            Ok(outcome) => {
                if outcome.terminated.is_some() {
                    terminations += 1;
                }
            }
            Err(LanderError::EpisodeFinished { .. }) => break,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(terminations, 1, "termination must be reported exactly once");
    assert!(env.is_finished());

    // Still finished: stepping keeps failing with the same error.
    for _ in 0..3 {
        let err = env.step(0).unwrap_err();
        assert!(matches!(err, LanderError::EpisodeFinished { reason } if reason == "landed"));
    }

    // Reset unlocks stepping again.
    env.reset();
    assert!(!env.is_finished());
    assert!(env.step(0).is_ok());
}

#[test]
fn should_keep_terminal_state_readable_after_episode_end() {
    let mut env = free_fall_env(2);
    let (steps, reason) = run_to_termination(&mut env, 0, 200);
    assert_eq!(reason, TerminationReason::Landed);

    // Terminal observation survives the failed step calls.
    let terminal_obs = env.observation();
    assert!(terminal_obs[0] <= 0.0, "altitude fraction at/below ground");
    let _ = env.step(0).unwrap_err();
    assert_eq!(env.observation(), terminal_obs);

    // Flight log holds the whole episode.
    assert_eq!(env.flight_log().len(), steps);
    let last = env.flight_log().latest().unwrap();
    assert!(last.position_y <= 0.0);

    // Summary digest matches the episode.
    let summary = env.episode_summary().unwrap();
    assert_eq!(summary.steps, steps);
    assert_eq!(summary.outcome, TerminationReason::Landed);
    assert!((summary.duration - steps as f64 * TIMESTEP).abs() < 1e-12);
}

#[test]
fn should_clear_episode_state_on_reset_but_keep_summary() {
    let mut env = free_fall_env(3);
    run_to_termination(&mut env, 0, 200);
    assert!(env.episode_summary().is_some());

    let obs = env.reset();
    assert_eq!(env.steps(), 0);
    assert_eq!(env.elapsed(), 0.0);
    assert_eq!(env.total_reward(), 0.0);
    assert!(env.flight_log().is_empty());
    assert!(!env.is_finished());
    assert!((obs[0] - 1.0).abs() < 1e-6);

    // The last episode's digest is still there for the caller.
    assert!(env.episode_summary().is_some());
}

// ============================================================================
// Decoder Gating
// ============================================================================

#[test]
fn should_suppress_nozzle_commands_while_turning_is_disabled() {
    let mut env = free_fall_env(4);
    assert!(!env.curriculum().turn_enabled());

    // Action 2 = thrust up + nudge left. The nozzle part must be
    // swallowed by the curriculum gate.
    loop {
        let outcome = env.step(2).unwrap();
        assert_eq!(env.tvc().level(), 0.0);
        assert_eq!(env.rocket().angular_velocity(), 0.0);
        if outcome.terminated.is_some() {
            break;
        }
    }

    // With turning enabled the same action deflects the nozzle.
    env.curriculum_mut().enable_turn();
    env.reset();
    env.step(2).unwrap();
    assert!(env.tvc().level() < 0.0);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn should_reproduce_episodes_bit_for_bit_with_same_seed() {
    let build = || {
        let mut env: Lander<ThrustGimbal> =
            Lander::from_config(LanderConfig::default().with_seed(77)).unwrap();
        env.curriculum_mut().set_random_height(3.0, 9.0).unwrap();
        env.curriculum_mut().enable_random_starting_tilt();
        env.curriculum_mut().enable_turn();
        env.reset();
        env
    };
    let mut a = build();
    let mut b = build();
    assert_eq!(a.observation(), b.observation());
    assert_eq!(a.spawn_height(), b.spawn_height());

    let actions = [2usize, 8, 4, 5, 0, 7, 2, 2, 6, 1];
    for (step, action) in actions.iter().cycle().take(300).enumerate() {
        let oa = a.step(*action);
        let ob = b.step(*action);
        match (oa, ob) {
            (Ok(oa), Ok(ob)) => {
                assert_eq!(oa, ob, "trajectories diverged at step {step}");
                if oa.terminated.is_some() {
                    break;
                }
            }
            (Err(ea), Err(eb)) => {
                assert_eq!(ea, eb);
                break;
            }
            _ => panic!("one environment finished before the other at step {step}"),
        }
    }
}

#[test]
fn should_resample_spawn_conditions_across_resets() {
    let mut env = free_fall_env(5);
    env.curriculum_mut().set_random_height(2.0, 9.0).unwrap();

    env.reset();
    let first = env.spawn_height();
    env.reset();
    let second = env.spawn_height();
    assert!(
        (first - second).abs() > 1e-12,
        "independent draws should differ: {first} vs {second}"
    );
}

// ============================================================================
// Actuation Delay
// ============================================================================

#[test]
fn should_delay_commands_by_the_configured_latency() {
    let config = LanderConfig::default().with_actuation_delay(2.0 * TIMESTEP);
    let mut env: Lander<ThrustOnly> = Lander::from_config(config).unwrap();

    // Two steps of queued neutral commands before Increase lands.
    env.step(2).unwrap();
    assert_eq!(env.tvc().thrust(), 0.0);
    env.step(2).unwrap();
    assert_eq!(env.tvc().thrust(), 0.0);

    env.step(2).unwrap();
    let per_step = env.config().tvc.thrust_rate * TIMESTEP;
    assert!((env.tvc().thrust() - per_step).abs() < 1e-9);
}

// ============================================================================
// Observation Semantics
// ============================================================================

#[test]
fn should_report_descending_altitude_fraction() {
    let mut env = free_fall_env(6);
    let mut previous = env.observation()[0];
    loop {
        let outcome = env.step(0).unwrap();
        assert!(
            outcome.observation[0] < previous,
            "free fall must descend monotonically"
        );
        previous = outcome.observation[0];
        if outcome.terminated.is_some() {
            break;
        }
    }
}
