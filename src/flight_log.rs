//! Per-step flight recording and export.
//!
//! Every step of an episode appends one [`FlightSample`]; the log is
//! cleared on reset, so it always holds exactly the current (or most
//! recently finished) episode. Export targets are CSV for plotting
//! dashboards and JSON for programmatic replay. Angles are stored in
//! radians and converted to degrees only in the CSV, which is meant
//! for human eyes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::termination::TerminationReason;

/// One step of telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightSample {
    /// Elapsed episode time (s) when the step began.
    pub time: f64,
    /// Horizontal position (m).
    pub position_x: f64,
    /// Height above the pad (m).
    pub position_y: f64,
    /// Horizontal velocity (m/s).
    pub velocity_x: f64,
    /// Vertical velocity (m/s).
    pub velocity_y: f64,
    /// Spin rate (rad/s).
    pub angular_velocity: f64,
    /// Signed body tilt from vertical (rad).
    pub rocket_angle: f64,
    /// Nozzle deflection from the body axis (rad).
    pub tvc_angle: f64,
    /// Thrust magnitude (N).
    pub thrust: f64,
}

/// Digest of a finished episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Steps taken.
    pub steps: usize,
    /// Flight time (s).
    pub duration: f64,
    /// Sum of all step rewards, terminal bonus included.
    pub total_reward: f64,
    /// How it ended.
    pub outcome: TerminationReason,
    /// Horizontal velocity at the final step (m/s).
    pub final_velocity_x: f64,
    /// Vertical velocity at the final step (m/s).
    pub final_velocity_y: f64,
    /// Horizontal position at the final step (m).
    pub final_position_x: f64,
    /// Unsigned tilt at the final step (rad).
    pub final_tilt: f64,
}

/// Telemetry for one episode.
#[derive(Debug, Clone, Default)]
pub struct FlightLog {
    samples: Vec<FlightSample>,
}

impl FlightLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one step of telemetry.
    pub fn push(&mut self, sample: FlightSample) {
        self.samples.push(sample);
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples. Called on episode reset.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// The recorded samples, oldest first.
    pub fn samples(&self) -> &[FlightSample] {
        &self.samples
    }

    /// The most recent sample, if any.
    pub fn latest(&self) -> Option<&FlightSample> {
        self.samples.last()
    }

    /// Write the log as CSV, angles in degrees.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(
            writer,
            "time,position_x,position_y,velocity_x,velocity_y,angular_velocity_deg,rocket_angle_deg,tvc_angle_deg,thrust"
        )?;
        for sample in &self.samples {
            writeln!(
                writer,
                "{:.2},{:.6},{:.6},{:.6},{:.6},{:.4},{:.4},{:.4},{:.1}",
                sample.time,
                sample.position_x,
                sample.position_y,
                sample.velocity_x,
                sample.velocity_y,
                sample.angular_velocity.to_degrees(),
                sample.rocket_angle.to_degrees(),
                sample.tvc_angle.to_degrees(),
                sample.thrust
            )?;
        }
        writer.flush()
    }

    /// Write the log as a JSON array of samples, angles in radians.
    pub fn write_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.samples)?;
        writer.flush()
    }
}
