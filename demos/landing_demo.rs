//! Scripted bang-bang landing.
//!
//! Flies one episode with the simplest controller that lands: engine on
//! below the target sink rate, off above it. Prints telemetry on the
//! way down, the episode summary at touchdown, and writes the full
//! flight log next to the working directory for plotting.
//!
//! ```bash
//! cargo run --example landing_demo
//! ```

use tvc_lander::{BangBang, Lander, LanderConfig, TerminationReason, TvcConfig};

const SPAWN_HEIGHT: f64 = 5.0;
const TARGET_SINK_RATE: f32 = -2.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LanderConfig::default()
        .with_tvc(TvcConfig::bang_bang())
        .with_seed(7);
    let mut env: Lander<BangBang> = Lander::from_config(config)?;
    env.curriculum_mut().set_fixed_height(SPAWN_HEIGHT)?;
    let mut obs = env.reset();

    println!("=== Bang-bang landing from {SPAWN_HEIGHT} m ===");
    println!("{:>5} {:>9} {:>9} {:>11}", "step", "alt (m)", "vy (m/s)", "thrust (N)");

    let outcome = loop {
        // On below the sink-rate band, off above it.
        let action = if obs[1] < TARGET_SINK_RATE { 1 } else { 3 };
        let outcome = env.step(action)?;
        obs = outcome.observation;

        if env.steps() % 25 == 0 {
            println!(
                "{:>5} {:>9.3} {:>9.3} {:>11.0}",
                env.steps(),
                env.rocket().position_y(),
                env.rocket().velocity_y(),
                env.tvc().thrust(),
            );
        }
        if let Some(reason) = outcome.terminated {
            break reason;
        }
    };

    let summary = env
        .episode_summary()
        .copied()
        .ok_or("episode ended without a summary")?;
    println!();
    println!("=== Episode over: {outcome} ===");
    println!("steps:          {}", summary.steps);
    println!("flight time:    {:.2} s", summary.duration);
    println!("touchdown vy:   {:.2} m/s", summary.final_velocity_y);
    println!("final tilt:     {:.3} rad", summary.final_tilt);
    println!("total reward:   {:.2}", summary.total_reward);

    if outcome == TerminationReason::Landed {
        let path = "landing_demo.csv";
        env.flight_log().write_csv(path)?;
        println!("flight log:     {path}");
    }

    Ok(())
}
