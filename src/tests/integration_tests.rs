//! End-to-end scenarios: whole episodes flown against the physics,
//! batched rollouts, and telemetry export.

use crate::action::{ActionDecoder, BangBang, ThrustCommand, ThrustOnly};
use crate::adapter::LanderPool;
use crate::config::LanderConfig;
use crate::constants::{DEFAULT_NOZZLE_RATE, GRAVITY, MAX_NOZZLE_ROTATION, TIMESTEP};
use crate::env::Lander;
use crate::flight_log::FlightSample;
use crate::observation::OBSERVATION_SIZE;
use crate::physics::{Rocket, RocketConfig, ThrustVectorControl, TvcConfig};
use crate::termination::TerminationReason;
use crate::types::UnitVec2;

/// Hold one action until the episode ends.
fn fly<D: ActionDecoder>(
    env: &mut Lander<D>,
    action: usize,
    max_steps: usize,
) -> (usize, TerminationReason) {
    for step in 1..=max_steps {
        let outcome = env.step(action).unwrap();
        if let Some(reason) = outcome.terminated {
            return (step, reason);
        }
    }
    panic!("no termination within {max_steps} steps");
}

// ============================================================================
// Held-Throttle Descents
// ============================================================================

#[test]
fn should_land_softer_than_free_fall_under_held_subgravity_thrust() {
    // A deep-throttled engine: even wide open it cannot hover (6.7 m/s^2
    // of thrust against 9.81 of gravity), so holding max throttle slows
    // the fall instead of stopping it.
    let subgravity = TvcConfig {
        max_thrust: 3.0e6,
        thrust_rate: 3.0e6 / TIMESTEP,
        max_rotation: MAX_NOZZLE_ROTATION,
        rotation_rate: DEFAULT_NOZZLE_RATE,
    };
    let config = LanderConfig::default().with_tvc(subgravity).with_seed(20);

    let mut powered: Lander<ThrustOnly> = Lander::from_config(config).unwrap();
    powered.curriculum_mut().set_fixed_height(10.0).unwrap();
    powered.reset();
    let (powered_steps, powered_reason) = fly(&mut powered, 2, 1_000);

    let mut coasting: Lander<ThrustOnly> = Lander::from_config(config).unwrap();
    coasting.curriculum_mut().set_fixed_height(10.0).unwrap();
    coasting.reset();
    let (coasting_steps, coasting_reason) = fly(&mut coasting, 0, 1_000);

    assert_eq!(powered_reason, TerminationReason::Landed);
    assert_eq!(coasting_reason, TerminationReason::Landed);

    // Sub-gravity thrust never reverses the descent, it only stretches it.
    assert!(
        powered
            .flight_log()
            .samples()
            .iter()
            .all(|sample| sample.velocity_y < 0.0),
        "a sub-gravity burn must keep descending"
    );
    assert!(powered_steps > coasting_steps);

    let powered_impact = powered.rocket().velocity_y();
    let coasting_impact = coasting.rocket().velocity_y();
    assert!(
        powered_impact > coasting_impact + 3.0,
        "powered impact {powered_impact} not clearly softer than free fall {coasting_impact}"
    );
    assert!(powered_impact < -1.0, "this is still a hard descent, not a hover");
}

#[test]
fn should_escape_when_held_max_thrust_overwhelms_gravity() {
    // The full-scale booster has a thrust-to-weight ratio above one:
    // held max throttle dips while the engine ramps, then climbs
    // straight out the top of the corridor.
    let mut env: Lander<ThrustOnly> =
        Lander::from_config(LanderConfig::default().with_seed(21)).unwrap();
    env.curriculum_mut().set_fixed_height(10.0).unwrap();
    env.reset();

    let (_, reason) = fly(&mut env, 2, 1_000);
    assert_eq!(reason, TerminationReason::Escaped);
    assert!(env.rocket().position_y() > 2.0 * env.spawn_height());

    // The ramp loses some altitude first but never comes near the pad.
    let min_altitude = env
        .flight_log()
        .samples()
        .iter()
        .map(|sample| sample.position_y)
        .fold(f64::INFINITY, f64::min);
    assert!(min_altitude < 9.7, "the ramp phase should dip");
    assert!(min_altitude > 5.0, "but stay far above the ground");
}

// ============================================================================
// Attitude Without Gimbal Authority
// ============================================================================

#[test]
fn should_hold_a_horizontal_attitude_with_a_centered_nozzle() {
    // Lying exactly on its side with the nozzle flush: all thrust is
    // push, none is torque, so nothing ever rights the body.
    let axis = UnitVec2::new(1.0, 0.0);
    let mut rocket = Rocket::new(RocketConfig::default(), 0.0, 50.0, axis);
    let mut tvc = ThrustVectorControl::new(TvcConfig::bang_bang(), axis);
    tvc.apply_thrust_command(ThrustCommand::Increase, TIMESTEP);
    assert!((tvc.thrust() - tvc.config().max_thrust).abs() < 1e-6);

    for step in 1..=100 {
        rocket.step(&mut tvc, TIMESTEP);
        assert_eq!(rocket.angular_velocity(), 0.0);
        assert!((rocket.signed_tilt() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        // Horizontal thrust leaves the vertical axis to gravity alone.
        let expected_vy = -GRAVITY * TIMESTEP * step as f64;
        assert!((rocket.velocity_y() - expected_vy).abs() < 1e-9);
    }
    assert!(rocket.velocity_x() > 30.0, "the push all went sideways");
}

#[test]
fn should_never_correct_a_spawn_tilt_while_turning_is_disabled() {
    let config = LanderConfig::default()
        .with_tvc(TvcConfig::bang_bang())
        .with_seed(22);
    let mut env: Lander<BangBang> = Lander::from_config(config).unwrap();
    env.curriculum_mut().enable_random_starting_tilt();

    // Resample until the lean is clearly visible.
    let mut obs = env.reset();
    let mut attempts = 0;
    while obs[5].abs() < 0.05 {
        obs = env.reset();
        attempts += 1;
        assert!(attempts < 100, "random tilt never produced a visible lean");
    }
    let spawn_tilt = obs[5];

    // Full thrust with a centered setpoint; the nozzle part of the
    // command is suppressed anyway until the curriculum unlocks it.
    let mut outcome = None;
    for _ in 0..1_000 {
        let o = env.step(1).unwrap();
        assert_eq!(o.observation[4], 0.0, "no gimbal authority, no spin");
        assert!(
            (o.observation[5] - spawn_tilt).abs() < 1e-6,
            "the attitude error must persist untouched"
        );
        if o.terminated.is_some() {
            outcome = o.terminated;
            break;
        }
    }

    // Tilted at most 45 degrees, the thrust still out-climbs gravity.
    assert_eq!(outcome, Some(TerminationReason::Escaped));
}

// ============================================================================
// Closed-Loop Landing
// ============================================================================

#[test]
fn should_fly_a_bang_bang_burn_to_a_soft_touchdown() {
    // The simplest possible landing controller: engine on below the
    // target sink rate, off above it. Chatters around -2 m/s all the
    // way down.
    let config = LanderConfig::default()
        .with_tvc(TvcConfig::bang_bang())
        .with_seed(23);
    let mut env: Lander<BangBang> = Lander::from_config(config).unwrap();
    env.curriculum_mut().set_fixed_height(5.0).unwrap();
    let mut obs = env.reset();

    let mut landed = None;
    for _ in 0..1_000 {
        let action = if obs[1] < -2.0 { 1 } else { 3 };
        let outcome = env.step(action).unwrap();
        obs = outcome.observation;
        if outcome.terminated.is_some() {
            landed = outcome.terminated;
            break;
        }
    }
    assert_eq!(landed, Some(TerminationReason::Landed));

    let summary = env.episode_summary().unwrap();
    assert_eq!(summary.outcome, TerminationReason::Landed);
    assert!(
        summary.final_velocity_y > -3.0 && summary.final_velocity_y < -0.5,
        "touchdown at {} m/s missed the control band",
        summary.final_velocity_y
    );
    assert!(summary.total_reward > 5.0, "a controlled landing should pay well");
}

// ============================================================================
// Batched Rollouts
// ============================================================================

#[test]
fn should_drive_batched_rollouts_with_periodic_resets() {
    let mut pool: LanderPool =
        LanderPool::from_config(LanderConfig::default().with_seed(31), 4).unwrap();
    for env in pool.iter_mut() {
        env.curriculum_mut().set_random_height(2.0, 6.0).unwrap();
    }
    pool.reset_all();

    // A scripted random policy, the shape of an exploration phase.
    let mut rng = fastrand::Rng::with_seed(99);
    let mut completed = 0;
    let mut reward_sum = 0.0;
    for _ in 0..400 {
        let actions: Vec<usize> = (0..pool.len()).map(|_| rng.usize(0..9)).collect();
        let outcomes = pool.step(&actions).unwrap();
        for outcome in &outcomes {
            assert!(outcome.reward.is_finite());
            reward_sum += outcome.reward;
        }
        completed += pool.reset_finished().len();
    }
    assert!(completed > 0, "400 random steps x 4 envs should finish episodes");
    assert!(reward_sum.is_finite());

    let mut buffer = vec![0.0f32; pool.len() * OBSERVATION_SIZE];
    pool.write_observations(&mut buffer).unwrap();
    assert!(buffer.iter().all(|value| value.is_finite()));
}

// ============================================================================
// Telemetry Export
// ============================================================================

#[test]
fn should_export_episode_telemetry_for_offline_analysis() {
    let mut env: Lander = Lander::from_config(LanderConfig::default().with_seed(41)).unwrap();
    let (steps, reason) = fly(&mut env, 4, 1_000);
    assert_eq!(reason, TerminationReason::Landed);
    assert_eq!(env.flight_log().len(), steps);

    // Samples are stamped with the time their step began.
    let last = env.flight_log().latest().unwrap();
    assert!((last.time - TIMESTEP * (steps - 1) as f64).abs() < 1e-9);

    let dir = std::env::temp_dir();
    let csv_path = dir.join(format!("tvc_lander_episode_{}.csv", std::process::id()));
    let json_path = dir.join(format!("tvc_lander_episode_{}.json", std::process::id()));

    env.flight_log().write_csv(&csv_path).unwrap();
    env.flight_log().write_json(&json_path).unwrap();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    std::fs::remove_file(&csv_path).ok();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "time,position_x,position_y,velocity_x,velocity_y,angular_velocity_deg,rocket_angle_deg,tvc_angle_deg,thrust"
    );
    assert_eq!(lines.count(), steps);

    let json = std::fs::read_to_string(&json_path).unwrap();
    std::fs::remove_file(&json_path).ok();
    let parsed: Vec<FlightSample> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), steps);
    let final_sample = parsed.last().unwrap();
    assert!(final_sample.position_y <= 0.0, "the last sample is the touchdown");
}
